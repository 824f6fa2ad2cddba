use crate::common::SimError;
use crate::core::Cpu;
use crate::isa::Opcode;

pub fn wb_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(inst) = cpu.mem_wb.occupant().cloned() else {
        return Ok(());
    };

    match inst.opcode {
        Opcode::Add | Opcode::Sub | Opcode::Addi | Opcode::Lw => {
            if let Some(dest) = cpu.mem_wb.dest_reg {
                cpu.regs.write(dest, cpu.mem_wb.mem_result)?;
                if cpu.trace {
                    eprintln!("WB  {} ${} <= {}", inst, dest, cpu.mem_wb.mem_result);
                }
            }
            cpu.stats.instructions_completed += 1;
        }
        // Stores and branches retired at memory exit and never appear here.
        Opcode::Sw | Opcode::Beq | Opcode::Nop => {}
    }

    cpu.mem_wb.clear();
    Ok(())
}
