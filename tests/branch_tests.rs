//! Tests for branch resolution and the single delay slot.

use mips_simulator::common::SimError;
use mips_simulator::config::Config;
use mips_simulator::core::Cpu;
use mips_simulator::isa::Instruction;

/// Creates a configuration with a deterministic memory latency.
fn fixed_config(latency: u32) -> Config {
    let mut config = Config::default();
    config.memory.latency_model = "Fixed".to_string();
    config.memory.fixed_latency = latency;
    config
}

/// A taken branch lets its delay slot complete, then redirects; anything
/// mis-fetched beyond the slot is discarded.
#[test]
fn test_taken_branch_executes_delay_slot_only() {
    // beq $t0, $t0 always compares equal.
    let program = vec![
        Instruction::beq(8, 8, 3),
        Instruction::addi(9, 0, 1),  // delay slot, always executes
        Instruction::addi(10, 0, 2), // skipped by the redirect
        Instruction::addi(11, 0, 3), // branch target
    ];
    let mut cpu = Cpu::new(program, &fixed_config(0));
    let summary = cpu.run().expect("run should converge");

    assert_eq!(cpu.regs.read(9).unwrap(), 1, "delay slot must complete");
    assert_eq!(cpu.regs.read(10).unwrap(), 0, "skipped instruction must not");
    assert_eq!(cpu.regs.read(11).unwrap(), 3, "target must execute");
    assert_eq!(summary.instructions, 3, "beq + delay slot + target");
    assert_eq!(summary.branch_delay_total, 1);
    assert_eq!(summary.branch_delay_effective, 1);
}

/// A not-taken branch continues after its delay slot; every instruction
/// completes.
#[test]
fn test_not_taken_branch_falls_through() {
    let program = vec![
        Instruction::addi(8, 0, 1),
        Instruction::beq(8, 9, 0), // $t0 == 1, $t1 == 0: not taken
        Instruction::addi(9, 0, 2), // delay slot
        Instruction::addi(10, 0, 3),
    ];
    let mut cpu = Cpu::new(program, &fixed_config(0));
    let summary = cpu.run().expect("run should converge");

    assert_eq!(cpu.regs.read(8).unwrap(), 1);
    assert_eq!(cpu.regs.read(9).unwrap(), 2);
    assert_eq!(cpu.regs.read(10).unwrap(), 3);
    assert_eq!(summary.instructions, 4);
    assert_eq!(summary.branch_delay_total, 1);
    assert_eq!(summary.branch_delay_effective, 1);
}

/// The branch comparison uses forwarded operands: a producer immediately
/// before the branch is visible without a stall.
#[test]
fn test_branch_compares_forwarded_values() {
    let program = vec![
        Instruction::addi(8, 0, 6),
        Instruction::beq(8, 9, 4), // forwarded $t0 == 6, $t1 == 0: not taken
        Instruction::addi(10, 0, 1), // delay slot
        Instruction::addi(11, 0, 2),
    ];
    let mut cpu = Cpu::new(program, &fixed_config(0));
    let summary = cpu.run().expect("run should converge");

    assert_eq!(summary.data_hazard_stalls, 0, "forwarding, not stalling");
    assert_eq!(cpu.regs.read(11).unwrap(), 2, "fall-through path taken");
}

/// A resolved target beyond the last instruction clamps to the program
/// length and the simulator still terminates.
#[test]
fn test_branch_target_clamps_to_program_length() {
    let program = vec![
        Instruction::addi(8, 0, 1),
        Instruction::beq(8, 8, 99), // taken, far past the end
    ];
    let mut cpu = Cpu::new(program, &fixed_config(0));
    let summary = cpu.run().expect("run should converge");

    assert_eq!(summary.instructions, 2);
    assert_eq!(summary.branch_delay_total, 1);
}

/// A branch never writes the register file but still counts as completed
/// when it exits the memory stage.
#[test]
fn test_branch_completes_without_register_write() {
    let program = vec![Instruction::beq(0, 0, 1)];
    let mut cpu = Cpu::new(program, &fixed_config(0));
    let summary = cpu.run().expect("run should converge");

    assert_eq!(summary.instructions, 1);
    for idx in 0..32 {
        assert_eq!(cpu.regs.read(idx).unwrap(), 0);
    }
}

/// A tight branch-to-self loop never drains; the cycle ceiling turns it
/// into a non-convergence error instead of a hang.
#[test]
fn test_infinite_loop_hits_cycle_ceiling() {
    let program = vec![Instruction::beq(0, 0, 0)];
    let mut cpu = Cpu::new(program, &fixed_config(0));

    match cpu.run() {
        Err(SimError::CycleLimitExceeded { limit, .. }) => assert_eq!(limit, 100),
        other => panic!(
            "expected non-convergence, got {:?}",
            other.map(|s| s.cycles)
        ),
    }
}
