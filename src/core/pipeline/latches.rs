//! Pipeline latch storage for inter-stage communication.
//!
//! One latch sits at each of the four stage boundaries (IF/ID, ID/EX,
//! EX/MEM, MEM/WB). A latch is written by exactly one stage per cycle and
//! read by the following stage in the next cycle; because the stage driver
//! advances stages in writeback-to-fetch order, no stage ever observes a
//! value written within the same cycle.

use crate::isa::Instruction;

/// State carried across one stage boundary.
///
/// `valid` marks whether the latch carries an instruction this cycle; an
/// invalid latch is a pipeline bubble. The operand values are snapshots
/// captured at decode and are independent of later register-file writes.
/// Every field is always present: `cycles_remaining` is `None` whenever no
/// memory access is in progress rather than being structurally absent.
#[derive(Clone, Debug, Default)]
pub struct StageLatch {
    /// Instruction occupying the latch.
    pub instr: Option<Instruction>,
    /// Whether the latch carries an instruction this cycle.
    pub valid: bool,
    /// Captured value of the `rs` source register.
    pub rs_value: i32,
    /// Captured value of the `rt` source register.
    pub rt_value: i32,
    /// Result computed by the execute stage.
    pub alu_result: i32,
    /// Result produced by the memory stage (ALU pass-through for
    /// non-memory instructions).
    pub mem_result: i32,
    /// Destination register, if the instruction writes one.
    pub dest_reg: Option<usize>,
    /// Remaining memory-access hold cycles; `None` when no access is in
    /// progress.
    pub cycles_remaining: Option<u32>,
}

impl StageLatch {
    /// Empties the latch, turning it into a bubble.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The instruction in the latch, if it is carrying one this cycle.
    pub fn occupant(&self) -> Option<&Instruction> {
        if self.valid {
            self.instr.as_ref()
        } else {
            None
        }
    }
}
