use recipe_kinds::ContentError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("recipe id must not be empty")]
    EmptyId,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid content: {0}")]
    Content(#[from] ContentError),

    #[error("last_modified_at ({last_modified_at}) is earlier than created_at ({created_at})")]
    TimestampOrder {
        created_at: jiff::Timestamp,
        last_modified_at: jiff::Timestamp,
    },
}
