//! Pipeline core implementation.
//!
//! Implements the five-stage in-order pipeline (fetch, decode, execute,
//! memory, writeback), the stage driver that sequences it, and the
//! memory-latency models.

/// Simulator state and the per-cycle stage driver.
pub mod cpu;

/// Memory-access latency models.
pub mod latency;

/// Inter-stage latches plus hazard detection and forwarding.
pub mod pipeline;

/// The five pipeline stage implementations.
pub mod stages;

pub use cpu::Cpu;
