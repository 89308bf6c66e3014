use recipe_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    #[error("write to recipe {id} kept conflicting with concurrent writers")]
    UpdateConflict { id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored record {key} is invalid: {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("recipe failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 DeleteObject error: {0}")]
    DeleteObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),
}

/// Repository-level error. Transport failures are wrapped, semantic
/// outcomes (`NotFound`, `Validation`) are surfaced as their own variants.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("recipe not found: {0}")]
    NotFound(String),

    #[error("update must change at least one of title or content")]
    EmptyPatch,

    #[error(transparent)]
    Validation(ValidationError),

    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<ValidationError> for RepoError {
    fn from(e: ValidationError) -> Self {
        RepoError::Validation(e)
    }
}

impl From<StorageError> for RepoError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Validation(err) => RepoError::Validation(err),
            other => RepoError::Storage(other),
        }
    }
}
