use thiserror::Error;

/// Caller input that cannot be turned into a structured query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("result limit must be at least 1, got {0}")]
    InvalidLimit(u32),

    #[error("page index must be at least 1, got {0}")]
    InvalidPage(u32),
}
