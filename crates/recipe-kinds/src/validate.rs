//! Schema-driven content validation.
//!
//! The same algorithm runs for every kind: the only input that varies is
//! the [`ContentSchema`] looked up from the registry.

use serde_json::{Map, Value};

use crate::error::ContentError;
use crate::registry::schema_for;
use crate::schema::{json_type_name, ContentSchema};

/// Validate `content` against the schema registered for `kind`.
pub fn validate(kind: &str, content: &Value) -> Result<(), ContentError> {
    let schema = schema_for(kind).ok_or_else(|| ContentError::UnknownKind(kind.to_string()))?;
    validate_against(schema, content)
}

/// Validate `content` against an explicit schema.
///
/// Valid iff `content` is an object whose key set equals the schema's key
/// set and whose values match the declared field types. The first violation
/// is reported: unexpected keys (in sorted order) before missing or
/// mistyped fields (in schema order).
pub fn validate_against(schema: &ContentSchema, content: &Value) -> Result<(), ContentError> {
    let object = content.as_object().ok_or(ContentError::NotAnObject {
        found: json_type_name(content),
    })?;
    validate_fields(schema, object)
}

/// Validate an already-unwrapped JSON object against a schema.
pub fn validate_fields(
    schema: &ContentSchema,
    object: &Map<String, Value>,
) -> Result<(), ContentError> {
    let mut unexpected: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| schema.field(key).is_none())
        .collect();
    unexpected.sort_unstable();
    if let Some(key) = unexpected.first() {
        return Err(ContentError::UnexpectedField((*key).to_string()));
    }

    for field in &schema.fields {
        let value = object
            .get(&field.name)
            .ok_or_else(|| ContentError::MissingField(field.name.clone()))?;

        if !field.field_type.matches(value) {
            return Err(ContentError::WrongType {
                field: field.name.clone(),
                expected: field.field_type.as_str(),
                found: json_type_name(value),
            });
        }

        if let (Some(max_chars), Some(text)) = (field.max_chars, value.as_str())
            && text.chars().count() > max_chars
        {
            return Err(ContentError::TooLong {
                field: field.name.clone(),
                max_chars,
            });
        }
    }

    Ok(())
}
