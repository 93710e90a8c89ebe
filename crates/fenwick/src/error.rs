use thiserror::Error;

/// Errors returned by [`FenwickTree`](crate::FenwickTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenwickError {
    /// A tree must hold at least one counter.
    #[error("capacity must be at least 1")]
    ZeroCapacity,

    #[error("index {index} is out of range for capacity {capacity}")]
    OutOfRange { index: usize, capacity: usize },

    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: usize, end: usize },
}

pub type Result<T> = std::result::Result<T, FenwickError>;
