use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("unknown recipe kind: {0}")]
    UnknownKind(String),

    #[error("content must be an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("content is missing required field '{0}'")]
    MissingField(String),

    #[error("content has unexpected field '{0}'")]
    UnexpectedField(String),

    #[error("content field '{field}' must be {expected}, got {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("content field '{field}' exceeds {max_chars} characters")]
    TooLong { field: String, max_chars: usize },
}
