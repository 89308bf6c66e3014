//! In-process store backed by a `Vec` behind a Tokio `RwLock`.
//!
//! Ids mimic document-database object ids: 24 lowercase hex characters made
//! of the creation second (8 hex) and a per-store counter (16 hex).

use std::sync::atomic::{AtomicU64, Ordering};

use recipe_core::{Recipe, RecipeId, RecipePatch};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::{BoxFuture, RecipeStore};

const ID_LEN: usize = 24;

/// Recipes in insertion order.
#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
    counter: AtomicU64,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        id.len() == ID_LEN
            && id
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    fn next_id(&self) -> RecipeId {
        let seconds = jiff::Timestamp::now().as_second() as u32;
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        RecipeId::new(format!("{seconds:08x}{seq:016x}"))
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Recipe>, StorageError>> {
        Box::pin(async move { Ok(self.recipes.read().await.clone()) })
    }

    fn get<'a>(
        &'a self,
        id: &'a RecipeId,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>> {
        Box::pin(async move {
            let recipes = self.recipes.read().await;
            Ok(recipes.iter().find(|r| &r.id == id).cloned())
        })
    }

    fn insert(&self, recipe: Recipe) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            recipe.validate()?;
            let mut recipes = self.recipes.write().await;
            if recipes.iter().any(|r| r.id == recipe.id) {
                return Err(StorageError::PreconditionFailed {
                    key: recipe.id.to_string(),
                });
            }
            recipes.push(recipe);
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a RecipeId,
        patch: &'a RecipePatch,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>> {
        Box::pin(async move {
            let mut recipes = self.recipes.write().await;
            let Some(recipe) = recipes.iter_mut().find(|r| &r.id == id) else {
                return Ok(None);
            };
            recipe.apply(patch)?;
            Ok(Some(recipe.clone()))
        })
    }

    fn remove<'a>(
        &'a self,
        id: &'a RecipeId,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>> {
        Box::pin(async move {
            let mut recipes = self.recipes.write().await;
            let removed = recipes
                .iter()
                .position(|r| &r.id == id)
                .map(|index| recipes.remove(index));
            Ok(removed)
        })
    }

    fn remove_all(&self) -> BoxFuture<'_, Result<u64, StorageError>> {
        Box::pin(async move {
            let mut recipes = self.recipes.write().await;
            let count = recipes.len() as u64;
            recipes.clear();
            Ok(count)
        })
    }
}
