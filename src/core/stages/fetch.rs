use crate::core::Cpu;

pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.stall || cpu.memory_stall {
        // IF/ID holds its contents while the pipeline is frozen
        return;
    }

    if cpu.pc < cpu.program.len() {
        let instr = cpu.program[cpu.pc].clone();
        if cpu.trace {
            eprintln!("IF  pc={} {}", cpu.pc, instr);
        }
        cpu.if_id.clear();
        cpu.if_id.instr = Some(instr);
        cpu.if_id.valid = true;
        cpu.pc += 1;
    } else {
        cpu.if_id.clear();
    }
}
