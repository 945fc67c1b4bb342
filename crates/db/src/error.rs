use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by a [`crate::BookStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store's uniqueness constraint rejected a second record with this id.
    #[error("duplicate entry for ID: {0}")]
    Duplicate(String),

    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}
