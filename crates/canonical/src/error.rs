use thiserror::Error;

/// Errors that can occur while building or resampling canonical strokes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("stroke has no samples")]
    EmptyStroke,
    #[error("resampling needs {required} samples, limit is {limit}")]
    TooManySamples { required: u64, limit: usize },
}
