use crate::schema::{ContentSchema, FieldSpec};
use crate::Kind;

/// Memo: free-text note.
/// Content: `{ "memo": <text> }`.
pub struct Memo;

impl Kind for Memo {
    fn id(&self) -> &str {
        "memo"
    }

    fn name(&self) -> &str {
        "Memo"
    }

    fn schema(&self) -> &ContentSchema {
        static SCHEMA: std::sync::LazyLock<ContentSchema> =
            std::sync::LazyLock::new(|| ContentSchema::new(vec![FieldSpec::text("memo")]));
        &SCHEMA
    }
}
