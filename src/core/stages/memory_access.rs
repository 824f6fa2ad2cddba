use crate::core::Cpu;
use crate::isa::Opcode;

pub fn memory_stage(cpu: &mut Cpu) {
    // A load or store occupying EX/MEM is held for a drawn number of extra
    // cycles before it may complete. While the countdown runs, the whole
    // front end freezes behind `memory_stall`.
    let pending = cpu
        .ex_mem
        .occupant()
        .map(|inst| (inst.is_memory_op(), inst.is_load()));
    if let Some((true, is_load)) = pending {
        let remaining = match cpu.ex_mem.cycles_remaining {
            Some(n) => n,
            None => {
                let drawn = cpu.latency.next_delay();
                cpu.ex_mem.cycles_remaining = Some(drawn);
                drawn
            }
        };
        if remaining > 0 {
            cpu.ex_mem.cycles_remaining = Some(remaining - 1);
            cpu.memory_stall = true;
            cpu.stats.memory_delay_cycles += 1;
            if is_load {
                cpu.stats.load_stalls += 1;
            }
            if cpu.trace {
                eprintln!("MEM wait, {} cycles left", remaining - 1);
            }
            return;
        }
    }

    // Completing pass: the freeze drops and younger stages advance this
    // same cycle.
    cpu.memory_stall = false;

    if let Some(inst) = cpu.ex_mem.occupant().cloned() {
        cpu.mem_wb.clear();
        cpu.mem_wb.dest_reg = cpu.ex_mem.dest_reg;

        match inst.opcode {
            Opcode::Lw => {
                let addr = cpu.ex_mem.alu_result;
                cpu.mem_wb.mem_result = cpu.mem.load(addr);
                cpu.mem_wb.valid = true;
                if cpu.trace {
                    eprintln!("MEM {} addr={} read={}", inst, addr, cpu.mem_wb.mem_result);
                }
            }
            Opcode::Sw => {
                let addr = cpu.ex_mem.alu_result;
                cpu.mem.store(addr, cpu.ex_mem.rt_value);
                // Stores retire here; they never reach writeback.
                cpu.stats.instructions_completed += 1;
                if cpu.trace {
                    eprintln!("MEM {} addr={} wrote={}", inst, addr, cpu.ex_mem.rt_value);
                }
            }
            Opcode::Add | Opcode::Sub | Opcode::Addi => {
                cpu.mem_wb.mem_result = cpu.ex_mem.alu_result;
                cpu.mem_wb.valid = true;
            }
            Opcode::Beq => {
                // Branches retire at memory exit without a writeback step.
                cpu.stats.instructions_completed += 1;
            }
            Opcode::Nop => {}
        }

        cpu.mem_wb.instr = Some(inst);
        cpu.ex_mem.clear();
    } else {
        cpu.mem_wb.clear();
    }

    cpu.stall = false;
}
