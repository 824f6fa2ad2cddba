//! Instruction pipeline plumbing.
//!
//! Contains the inter-stage latches and the hazard detection and forwarding
//! logic shared by the stage implementations.

/// Data hazard detection and register forwarding.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

pub use latches::StageLatch;
