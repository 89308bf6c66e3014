use std::future::Future;
use std::pin::Pin;

use recipe_core::{Recipe, RecipeId, RecipePatch};

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One impl per storage backend.
///
/// Every method touching a single id is atomic for that id. Bulk methods
/// (`list`, `remove_all`) give no atomicity across the collection.
pub trait RecipeStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Whether `id` is syntactically an id this store could have issued.
    /// Checked before any lookup so malformed ids never reach the backend.
    fn is_valid_id(&self, id: &str) -> bool;

    /// Issue a fresh id. Ids are never reused, even after deletion.
    fn next_id(&self) -> RecipeId;

    /// All recipes, in store-native order.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Recipe>, StorageError>>;

    /// None = no record with this id.
    fn get<'a>(
        &'a self,
        id: &'a RecipeId,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>>;

    /// Persist a new recipe. The recipe is re-validated first.
    fn insert(&self, recipe: Recipe) -> BoxFuture<'_, Result<(), StorageError>>;

    /// Read, apply `patch`, and write back one record as a single step.
    /// None = no record matched (including one deleted mid-update).
    fn update<'a>(
        &'a self,
        id: &'a RecipeId,
        patch: &'a RecipePatch,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>>;

    /// Remove one record, returning its last state.
    fn remove<'a>(
        &'a self,
        id: &'a RecipeId,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>>;

    /// Remove every record. Returns how many were removed.
    fn remove_all(&self) -> BoxFuture<'_, Result<u64, StorageError>>;
}
