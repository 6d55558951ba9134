/// Errors returned by the checked operations of this crate.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// Inversion of a quantity whose value is exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Normalisation of a vector whose magnitude is exactly zero.
    #[error("cannot normalise a zero-magnitude vector")]
    ZeroMagnitude,
    /// Aggregate of an empty collection of particles.
    #[error("empty particle collection")]
    EmptyCollection,
    /// Rejected simulation configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type with [`Error`] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;
