use crate::core::Cpu;
use crate::isa::Opcode;

pub fn execute_stage(cpu: &mut Cpu) {
    if cpu.stall || cpu.memory_stall {
        // EX/MEM may be holding an in-flight memory access; leave it alone.
        return;
    }

    let Some(inst) = cpu.id_ex.occupant().cloned() else {
        cpu.ex_mem.clear();
        return;
    };

    let rs_value = cpu.id_ex.rs_value;
    let rt_value = cpu.id_ex.rt_value;
    let imm = inst.imm.unwrap_or(0);

    let alu_result = match inst.opcode {
        Opcode::Add => rs_value.wrapping_add(rt_value),
        Opcode::Sub => rs_value.wrapping_sub(rt_value),
        Opcode::Addi => rs_value.wrapping_add(imm),
        // Address computation for memory operations.
        Opcode::Lw | Opcode::Sw => rs_value.wrapping_add(imm),
        Opcode::Beq | Opcode::Nop => 0,
    };

    if cpu.trace {
        eprintln!("EX  {} alu_result={}", inst, alu_result);
    }

    cpu.ex_mem.clear();
    cpu.ex_mem.rs_value = rs_value;
    cpu.ex_mem.rt_value = rt_value;
    cpu.ex_mem.alu_result = alu_result;
    cpu.ex_mem.dest_reg = cpu.id_ex.dest_reg;
    cpu.ex_mem.instr = Some(inst);
    cpu.ex_mem.valid = true;
}
