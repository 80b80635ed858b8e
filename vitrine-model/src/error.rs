use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid artwork id: {0:?}")]
    InvalidArtworkId(String),
    #[error("invalid artwork source: {0:?}")]
    InvalidSource(String),
    #[error("invalid exhibition id: {0}")]
    InvalidExhibitionId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
