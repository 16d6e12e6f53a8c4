use thiserror::Error;

/// Errors produced by model constructors and validation routines.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("invalid status value: {0:?}")]
    InvalidStatus(String),

    #[error("invalid sort key: {0:?}")]
    InvalidSortKey(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
