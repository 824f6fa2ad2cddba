//! Error types for the simulator.
//!
//! Recoverable conditions (malformed source lines, empty programs) are
//! reported as loader diagnostics and never reach this type; `SimError`
//! covers internal invariant violations and non-convergence, both of which
//! halt the run.

use thiserror::Error;

/// Fatal simulation errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A register index outside 0-31 reached the register file. The decode
    /// stage only produces indices in range, so this indicates an upstream
    /// defect rather than a user error.
    #[error("register index {0} is outside the architectural range 0-31")]
    RegisterOutOfRange(usize),

    /// The pipeline failed to drain within the configured cycle ceiling.
    #[error(
        "simulation exceeded the cycle limit of {limit} cycles without draining \
         (pipeline: {occupancy})"
    )]
    CycleLimitExceeded {
        limit: u64,
        cycles: u64,
        occupancy: String,
    },
}
