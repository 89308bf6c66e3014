//! The fixed set of recipe kinds known to this build.
//!
//! Adding a kind: write a [`Kind`] impl under `kinds/`, add a
//! [`RecipeKind`] variant, and map it in [`RecipeKind::definition`].
//! Validation and request handling pick it up from here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::kinds::{memo::Memo, web_link::WebLink};
use crate::schema::ContentSchema;
use crate::Kind;

/// Discriminator tag selecting which content schema a recipe uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    Memo,
    WebLink,
}

impl RecipeKind {
    pub const ALL: [RecipeKind; 2] = [RecipeKind::Memo, RecipeKind::WebLink];

    pub fn definition(self) -> &'static dyn Kind {
        match self {
            RecipeKind::Memo => &Memo,
            RecipeKind::WebLink => &WebLink,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecipeKind::Memo => "memo",
            RecipeKind::WebLink => "web_link",
        }
    }

    pub fn schema(self) -> &'static ContentSchema {
        self.definition().schema()
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecipeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ContentError::UnknownKind(s.to_string()))
    }
}

/// Return all registered kinds.
pub fn all_kinds() -> Vec<&'static dyn Kind> {
    RecipeKind::ALL.iter().map(|k| k.definition()).collect()
}

/// Look up a kind by its wire identifier.
pub fn get_kind(id: &str) -> Option<&'static dyn Kind> {
    all_kinds().into_iter().find(|k| k.id() == id)
}

/// Content schema for a kind identifier, or `None` if the kind is unknown.
pub fn schema_for(kind: &str) -> Option<&'static ContentSchema> {
    get_kind(kind).map(|k| k.schema())
}

pub fn is_known_kind(value: &str) -> bool {
    get_kind(value).is_some()
}
