//! recipe-core
//!
//! Pure domain types and object key conventions.
//! No AWS SDK dependency; this is the shared vocabulary of the recipe store.

pub mod error;
pub mod models;
pub mod s3_keys;

pub use error::ValidationError;
pub use models::recipe::{NewRecipe, Recipe, RecipeId, RecipePatch};
pub use recipe_kinds::RecipeKind;
