use thiserror::Error;

/// Errors that may occur when generating credentials or producing/parsing
/// PHC hash strings
#[derive(Debug, Error)]
pub enum PhcGenError {
    /// Indicates that the user of a type or function has specified an invalid
    /// parameter or set of parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Indicates that a provided hash string was expected to be valid, but is
    /// invalid. This normally occurs when a hash string is improperly
    /// formatted.
    #[error("invalid PHC hash string: {0}")]
    InvalidHash(&'static str),

    /// An error reported by the underlying Argon2id implementation, such as a
    /// salt below the minimum length or a memory cost too small for the
    /// requested parallelism
    #[error("argon2id derivation failed: {0}")]
    Derivation(#[from] argon2::Error),

    /// The system's cryptographically secure random source could not produce
    /// the requested bytes. Unrecoverable; callers are expected to abort.
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand::Error),
}
