//! Vocabulary error types

use thiserror::Error;
use uuid::Uuid;

use super::store::StoreError;

/// Rejected add or edit input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Word must not be empty")]
    EmptyWord,

    #[error("Context must not be empty")]
    EmptyContext,

    #[error("Word already exists: {0}")]
    DuplicateWord(String),
}

/// Errors from collection operations.
///
/// None of these are fatal; every one leaves the collection as it was.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("Invalid entry: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed import: {0}")]
    MalformedInput(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),

    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Entry not found: {0}")]
    NotFound(Uuid),
}

impl VocabError {
    /// Unknown id, or a transition the entry's box does not allow
    pub fn is_not_found(&self) -> bool {
        matches!(self, VocabError::NotFound(_))
    }
}

/// Result type alias for collection operations
pub type VocabResult<T> = Result<T, VocabError>;
