//! The recipe entity.
//!
//! A recipe is one record with a `kind` tag and a kind-shaped `content`
//! object. Every constructor, every deserialization and every mutation
//! re-checks the content against the kind's schema, so a `Recipe` value in
//! hand always satisfies it.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use recipe_kinds::{validate_fields, RecipeKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Opaque recipe identifier. The format is chosen by the store that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored recipe.
///
/// Serializes as exactly `{id, kind, title, content, created_at,
/// last_modified_at}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeRecord")]
pub struct Recipe {
    pub id: RecipeId,
    pub kind: RecipeKind,
    pub title: String,
    pub content: Map<String, Value>,
    pub created_at: Timestamp,
    pub last_modified_at: Timestamp,
}

/// Unchecked wire shape; converted into [`Recipe`] only if it validates.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeRecord {
    id: RecipeId,
    kind: RecipeKind,
    title: String,
    content: Map<String, Value>,
    created_at: Timestamp,
    last_modified_at: Timestamp,
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = ValidationError;

    fn try_from(record: RecipeRecord) -> Result<Self, Self::Error> {
        let recipe = Recipe {
            id: record.id,
            kind: record.kind,
            title: record.title,
            content: record.content,
            created_at: record.created_at,
            last_modified_at: record.last_modified_at,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

/// Validated input for creating a recipe. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub kind: RecipeKind,
    pub title: String,
    pub content: Map<String, Value>,
}

/// A partial update. `None` leaves the field untouched.
/// Kind and timestamps are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub content: Option<Map<String, Value>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Recipe {
    /// Build a new recipe with `created_at == last_modified_at == now`.
    pub fn new(id: RecipeId, new: NewRecipe, now: Timestamp) -> Result<Self, ValidationError> {
        let recipe = Recipe {
            id,
            kind: new.kind,
            title: new.title,
            content: new.content,
            created_at: now,
            last_modified_at: now,
        };
        recipe.validate()?;
        Ok(recipe)
    }

    /// Check every entity invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        validate_title(&self.title)?;
        validate_content(self.kind, &self.content)?;
        if self.last_modified_at < self.created_at {
            return Err(ValidationError::TimestampOrder {
                created_at: self.created_at,
                last_modified_at: self.last_modified_at,
            });
        }
        Ok(())
    }

    /// Apply a partial update and advance `last_modified_at`.
    ///
    /// On error the recipe is left unchanged.
    pub fn apply(&mut self, patch: &RecipePatch) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(content) = &patch.content {
            next.content = content.clone();
        }
        next.last_modified_at = advance(self.last_modified_at);
        next.validate()?;
        *self = next;
        Ok(())
    }
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

pub fn validate_content(
    kind: RecipeKind,
    content: &Map<String, Value>,
) -> Result<(), ValidationError> {
    validate_fields(kind.schema(), content)?;
    Ok(())
}

/// The current time, or one microsecond past `previous` if the clock has
/// not moved beyond it.
fn advance(previous: Timestamp) -> Timestamp {
    let now = Timestamp::now();
    if now > previous {
        return now;
    }
    previous
        .checked_add(SignedDuration::from_micros(1))
        .unwrap_or(previous)
}
