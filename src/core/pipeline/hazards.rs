//! Data hazard detection and register forwarding.
//!
//! Detects load-use hazards one stage ahead of where they would bite and
//! resolves every other register dependency by forwarding not-yet-committed
//! results into the operand snapshots captured at decode. The architectural
//! register file is never touched here.

use crate::core::pipeline::latches::StageLatch;
use crate::isa::{Instruction, Opcode};

/// Checks whether decode must stall for a load-use hazard.
///
/// True exactly when the ID/EX latch holds a load whose destination matches
/// a non-zero source register of the instruction currently being decoded.
/// The check runs one stage ahead: the load is entering execute while the
/// consumer is still in decode, so a single bubble is enough for the loaded
/// value to become forwardable from the MEM/WB latch.
///
/// A store consumer is checked only on its base-address register; the value
/// register is deliberately not treated as a hazard source here.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch holding the potential producer
/// * `decoding` - The instruction currently being decoded out of IF/ID
///
/// # Returns
///
/// `true` if decode must insert a bubble this cycle.
pub fn need_stall_load_use(id_ex: &StageLatch, decoding: &Instruction) -> bool {
    let Some(producer) = id_ex.occupant() else {
        return false;
    };
    if !producer.is_load() {
        return false;
    }
    let Some(dest) = id_ex.dest_reg else {
        return false;
    };
    if dest == 0 {
        return false;
    }

    source_registers(decoding)
        .into_iter()
        .flatten()
        .any(|src| src != 0 && src == dest)
}

/// Rewrites the operand snapshots of the instruction entering ID/EX with the
/// freshest in-flight result available.
///
/// Per operand, first match wins:
///
/// 1. the EX/MEM latch ALU result, if its destination matches and the
///    producer is not a load (a load's value is not ready this early; the
///    load-use case is handled by stalling instead);
/// 2. the MEM/WB latch result, if its destination matches.
///
/// Register 0 never receives a forwarded value. The `rt` operand is only
/// forwarded where `rt` is a semantic source (`add`/`sub`/`beq`); a store's
/// value register keeps whatever the register file supplied.
pub fn forward_operands(id_ex: &mut StageLatch, ex_mem: &StageLatch, mem_wb: &StageLatch) {
    let Some(inst) = id_ex.occupant() else {
        return;
    };
    let opcode = inst.opcode;
    let rs = inst.rs;
    let rt = inst.rt;

    if let Some(src) = rs.filter(|&r| r != 0) {
        if let Some(value) = forwarded_value(src, ex_mem, mem_wb) {
            id_ex.rs_value = value;
        }
    }

    let rt_is_source = matches!(opcode, Opcode::Add | Opcode::Sub | Opcode::Beq);
    if rt_is_source {
        if let Some(src) = rt.filter(|&r| r != 0) {
            if let Some(value) = forwarded_value(src, ex_mem, mem_wb) {
                id_ex.rt_value = value;
            }
        }
    }
}

/// The freshest in-flight value destined for `src`, if any stage holds one.
fn forwarded_value(src: usize, ex_mem: &StageLatch, mem_wb: &StageLatch) -> Option<i32> {
    if let Some(producer) = ex_mem.occupant() {
        if ex_mem.dest_reg == Some(src) && !producer.is_load() {
            return Some(ex_mem.alu_result);
        }
    }
    if mem_wb.valid && mem_wb.dest_reg == Some(src) {
        return Some(mem_wb.mem_result);
    }
    None
}

/// Registers the instruction genuinely reads, for hazard purposes.
///
/// `rt` names the destination for `addi`/`lw`, not a source, and a store's
/// value register is excluded by design.
fn source_registers(inst: &Instruction) -> [Option<usize>; 2] {
    match inst.opcode {
        Opcode::Add | Opcode::Sub | Opcode::Beq => [inst.rs, inst.rt],
        Opcode::Addi | Opcode::Lw | Opcode::Sw => [inst.rs, None],
        Opcode::Nop => [None, None],
    }
}
