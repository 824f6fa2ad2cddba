use crate::common::SimError;
use crate::core::pipeline::hazards;
use crate::core::Cpu;
use crate::isa::Opcode;

pub fn decode_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if cpu.stall || cpu.memory_stall {
        return Ok(());
    }

    let Some(inst) = cpu.if_id.occupant().cloned() else {
        cpu.id_ex.clear();
        return Ok(());
    };

    if hazards::need_stall_load_use(&cpu.id_ex, &inst) {
        cpu.stall = true;
        cpu.stats.data_hazard_stalls += 1;
        cpu.id_ex.clear();
        if cpu.trace {
            eprintln!("ID  load-use stall, bubble issued before {}", inst);
        }
        return Ok(());
    }

    // Capture operand snapshots from the register file.
    let mut rs_value = 0;
    let mut rt_value = 0;
    if let Some(rs) = inst.rs {
        rs_value = cpu.regs.read(rs)?;
    }
    if let Some(rt) = inst.rt {
        rt_value = cpu.regs.read(rt)?;
    }

    cpu.id_ex.clear();
    cpu.id_ex.rs_value = rs_value;
    cpu.id_ex.rt_value = rt_value;
    cpu.id_ex.dest_reg = inst.writes_register();
    cpu.id_ex.instr = Some(inst.clone());
    cpu.id_ex.valid = true;

    hazards::forward_operands(&mut cpu.id_ex, &cpu.ex_mem, &cpu.mem_wb);

    if cpu.trace {
        eprintln!(
            "ID  {} rs_value={} rt_value={}",
            inst, cpu.id_ex.rs_value, cpu.id_ex.rt_value
        );
    }

    if inst.opcode == Opcode::Beq {
        resolve_branch(cpu);
    }
    Ok(())
}

/// Resolves a branch against the forwarded operand snapshots.
///
/// The computed target does not take effect here: the stage driver applies
/// the redirect one cycle later, after the delay-slot instruction has
/// entered the pipeline.
fn resolve_branch(cpu: &mut Cpu) {
    let Some(inst) = cpu.id_ex.occupant() else {
        return;
    };
    let taken = cpu.id_ex.rs_value == cpu.id_ex.rt_value;
    let target = if taken {
        inst.imm.unwrap_or(0).max(0) as usize
    } else {
        // First instruction after the delay slot.
        cpu.pc + 1
    };
    // Branching past the last instruction behaves like running off the end.
    let target = target.min(cpu.program.len());
    cpu.branch_target = Some(target);

    if cpu.trace {
        eprintln!(
            "ID  beq {}: target {}",
            if taken { "taken" } else { "not taken" },
            target
        );
    }
}
