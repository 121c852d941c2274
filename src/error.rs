//! Crate error type.

/// Errors surfaced by the readers and report writers.
///
/// Nothing in the optimization core itself is fatal: an infeasible master
/// problem or an unproductive pricing search ends a phase, it does not
/// produce an [`Error`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O failure while reading an input file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A required cost-configuration key was never supplied.
    #[error("missing cost entry `{0}` in cost configuration")]
    MissingCost(&'static str),

    /// Report serialization failure.
    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
