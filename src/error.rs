//! Crate error taxonomy.
//!
//! Configuration errors are fatal at construction; operator and
//! abort-predicate errors are surfaced to the caller of [`crate::engine::PalnsEngine::solve`]
//! and terminate the search; an invalid classification is a programmer error.

use thiserror::Error;

/// Errors produced by the PALNS engine.
#[derive(Error, Debug)]
pub enum PalnsError {
    /// An invalid configuration parameter (e.g. `initial_temperature <= 0`,
    /// `alpha` outside `(0, 1)`, or zero destroy/repair operators).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A destroy or repair operator failed. The search does not retry
    /// individual operators; the first failure terminates all workers.
    #[error("operator '{operator}' failed: {source}")]
    Operator {
        operator: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The abort predicate failed. Propagated identically to operator errors.
    #[error("abort predicate failed: {source}")]
    Abort {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The internal state machine produced a classification tag it does not
    /// recognize. This can only happen from a bug in the engine itself.
    #[error("internal error: unrecognized classification")]
    InvalidClassification,
}
