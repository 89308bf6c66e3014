//! Object key conventions.
//!
//! Pure string functions, no AWS SDK dependency. These define the canonical
//! layout of recipe objects in the bucket. `prefix` is a deployment-wide
//! namespace (may be empty) and, when set, should end with `/`.

use crate::models::recipe::RecipeId;

pub const RECIPES_DIR: &str = "recipes/";

pub fn recipes_prefix(prefix: &str) -> String {
    format!("{prefix}{RECIPES_DIR}")
}

pub fn recipe(prefix: &str, id: &RecipeId) -> String {
    format!("{prefix}{RECIPES_DIR}{id}.json")
}

/// Recover the recipe id from an object key, if the key is a recipe object.
pub fn recipe_id_from_key<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_prefix(RECIPES_DIR)?
        .strip_suffix(".json")
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

/// Keep only the keys that are recipe objects, in their original order.
pub fn recipe_keys(prefix: &str, keys: Vec<String>) -> Vec<String> {
    keys.into_iter()
        .filter(|key| recipe_id_from_key(prefix, key).is_some())
        .collect()
}
