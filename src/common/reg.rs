//! Architectural register file.
//!
//! Thirty-two general-purpose registers with register 0 hard-wired to zero.
//! Read by the decode stage, written only by writeback.

use crate::common::SimError;

/// General-purpose register file.
///
/// Register 0 always reads as zero; writes to it are accepted and silently
/// discarded. Indices outside 0-31 are an internal invariant violation and
/// surface as an explicit error.
pub struct RegisterFile {
    regs: [i32; 32],
}

impl RegisterFile {
    /// Creates a register file with every register initialized to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a register value.
    ///
    /// # Errors
    ///
    /// Returns `SimError::RegisterOutOfRange` for indices outside 0-31.
    pub fn read(&self, idx: usize) -> Result<i32, SimError> {
        match self.regs.get(idx) {
            Some(&val) => Ok(val),
            None => Err(SimError::RegisterOutOfRange(idx)),
        }
    }

    /// Writes a register value.
    ///
    /// Writes to register 0 are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `SimError::RegisterOutOfRange` for indices outside 0-31.
    pub fn write(&mut self, idx: usize, val: i32) -> Result<(), SimError> {
        if idx >= self.regs.len() {
            return Err(SimError::RegisterOutOfRange(idx));
        }
        if idx != 0 {
            self.regs[idx] = val;
        }
        Ok(())
    }

    /// Dumps all registers to stdout, two per line.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            println!(
                "${:<2} = {:#010x}    ${:<2} = {:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
