//! Instruction set definitions for the simulated MIPS subset.
//!
//! The simulator models six operations (add, sub, addi, lw, sw, beq) plus an
//! explicit no-operation used for pipeline bubbles. Instructions arrive from
//! the loader fully decoded, with branch targets already resolved to absolute
//! instruction indices.

use std::fmt;

/// Register name mapping for the MIPS calling convention.
pub mod abi;

/// Operation kind of a decoded instruction.
///
/// Every pipeline stage dispatches on this tag with an exhaustive match,
/// so adding a variant forces every stage to handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// Register-register addition (`add rd, rs, rt`).
    Add,
    /// Register-register subtraction (`sub rd, rs, rt`).
    Sub,
    /// Add immediate (`addi rt, rs, imm`).
    Addi,
    /// Load word (`lw rt, offset(rs)`).
    Lw,
    /// Store word (`sw rt, offset(rs)`).
    Sw,
    /// Branch if equal (`beq rs, rt, target`).
    Beq,
    /// No operation.
    Nop,
}

/// A decoded instruction.
///
/// Immutable after creation: the loader builds one per source line and the
/// pipeline only ever copies it between latches. `rt` doubles as the
/// destination register for `addi` and `lw` (MIPS I-format), while `rd` is
/// present only for the R-format `add`/`sub`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    /// First source register index.
    pub rs: Option<usize>,
    /// Second source register index, or the destination for `addi`/`lw`.
    pub rt: Option<usize>,
    /// Destination register index (`add`/`sub` only).
    pub rd: Option<usize>,
    /// Immediate, memory offset, or pre-resolved branch target index.
    pub imm: Option<i32>,
    /// Original source text, kept for trace output only.
    pub text: String,
}

impl Instruction {
    pub fn add(rd: usize, rs: usize, rt: usize) -> Self {
        Self {
            opcode: Opcode::Add,
            rs: Some(rs),
            rt: Some(rt),
            rd: Some(rd),
            imm: None,
            text: format!("add ${}, ${}, ${}", rd, rs, rt),
        }
    }

    pub fn sub(rd: usize, rs: usize, rt: usize) -> Self {
        Self {
            opcode: Opcode::Sub,
            rs: Some(rs),
            rt: Some(rt),
            rd: Some(rd),
            imm: None,
            text: format!("sub ${}, ${}, ${}", rd, rs, rt),
        }
    }

    pub fn addi(rt: usize, rs: usize, imm: i32) -> Self {
        Self {
            opcode: Opcode::Addi,
            rs: Some(rs),
            rt: Some(rt),
            rd: None,
            imm: Some(imm),
            text: format!("addi ${}, ${}, {}", rt, rs, imm),
        }
    }

    pub fn lw(rt: usize, offset: i32, rs: usize) -> Self {
        Self {
            opcode: Opcode::Lw,
            rs: Some(rs),
            rt: Some(rt),
            rd: None,
            imm: Some(offset),
            text: format!("lw ${}, {}(${})", rt, offset, rs),
        }
    }

    pub fn sw(rt: usize, offset: i32, rs: usize) -> Self {
        Self {
            opcode: Opcode::Sw,
            rs: Some(rs),
            rt: Some(rt),
            rd: None,
            imm: Some(offset),
            text: format!("sw ${}, {}(${})", rt, offset, rs),
        }
    }

    pub fn beq(rs: usize, rt: usize, target: usize) -> Self {
        Self {
            opcode: Opcode::Beq,
            rs: Some(rs),
            rt: Some(rt),
            rd: None,
            imm: Some(target as i32),
            text: format!("beq ${}, ${}, {}", rs, rt, target),
        }
    }

    pub fn nop() -> Self {
        Self {
            opcode: Opcode::Nop,
            rs: None,
            rt: None,
            rd: None,
            imm: None,
            text: "nop".to_string(),
        }
    }

    /// Replaces the display text, keeping the decoded fields.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// The register this instruction writes back, if any.
    ///
    /// `add`/`sub` write `rd`; `addi`/`lw` write `rt`. Stores, branches and
    /// no-ops write nothing.
    pub fn writes_register(&self) -> Option<usize> {
        match self.opcode {
            Opcode::Add | Opcode::Sub => self.rd,
            Opcode::Addi | Opcode::Lw => self.rt,
            Opcode::Sw | Opcode::Beq | Opcode::Nop => None,
        }
    }

    pub fn is_load(&self) -> bool {
        self.opcode == Opcode::Lw
    }

    pub fn is_memory_op(&self) -> bool {
        matches!(self.opcode, Opcode::Lw | Opcode::Sw)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
