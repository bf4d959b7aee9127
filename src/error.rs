// Error types for store operations

use crate::record::RecordId;
use thiserror::Error;

/// Errors returned by [`Store`](crate::Store) mutations
///
/// Both variants are recoverable: the store is left exactly as it was before
/// the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} ID {id} already exists.")]
    DuplicateIdentifier { kind: &'static str, id: RecordId },

    #[error("{kind} ID {id} does not exist.")]
    NotFound { kind: &'static str, id: RecordId },
}

impl StoreError {
    /// Identifier the failing operation was called with
    pub fn id(&self) -> RecordId {
        match self {
            StoreError::DuplicateIdentifier { id, .. } | StoreError::NotFound { id, .. } => *id,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
