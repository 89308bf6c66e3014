use crate::schema::{ContentSchema, FieldSpec};
use crate::Kind;

/// Web Link: a saved reference to a page.
/// Content: `{ "url": <text> }`. The URL is not parsed or fetched.
pub struct WebLink;

impl Kind for WebLink {
    fn id(&self) -> &str {
        "web_link"
    }

    fn name(&self) -> &str {
        "Web Link"
    }

    fn schema(&self) -> &ContentSchema {
        static SCHEMA: std::sync::LazyLock<ContentSchema> =
            std::sync::LazyLock::new(|| ContentSchema::new(vec![FieldSpec::text("url")]));
        &SCHEMA
    }
}
