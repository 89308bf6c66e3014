//! Recipe CRUD on top of a [`RecipeStore`].
//!
//! The repository owns the rules that hold regardless of backend:
//! - ids are checked against the store's format before any lookup, and a
//!   malformed id is indistinguishable from a missing one (`NotFound`);
//! - entities are validated before they are written (the request layer
//!   validates first; this is the second line);
//! - an update that matches no record is `NotFound`, never a silent success.

use std::sync::Arc;

use jiff::Timestamp;
use recipe_core::{NewRecipe, Recipe, RecipeId, RecipeKind, RecipePatch};

use crate::error::RepoError;
use crate::store::RecipeStore;

#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    pub fn is_valid_id(&self, id: &str) -> bool {
        self.store.is_valid_id(id)
    }

    fn parse_id(&self, id: &str) -> Result<RecipeId, RepoError> {
        if !self.store.is_valid_id(id) {
            tracing::debug!(id = %id, "rejecting malformed recipe id");
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(RecipeId::new(id))
    }

    /// All recipes in store order. Empty, not an error, when there are none.
    pub async fn list_all(&self) -> Result<Vec<Recipe>, RepoError> {
        Ok(self.store.list().await?)
    }

    pub async fn list_kind(&self, kind: RecipeKind) -> Result<Vec<Recipe>, RepoError> {
        let mut recipes = self.store.list().await?;
        recipes.retain(|r| r.kind == kind);
        Ok(recipes)
    }

    /// Remove every recipe. Returns the number removed (0 when already empty).
    pub async fn delete_all(&self) -> Result<u64, RepoError> {
        let count = self.store.remove_all().await?;
        tracing::info!(count, backend = self.backend(), "deleted all recipes");
        Ok(count)
    }

    pub async fn create(&self, new: NewRecipe) -> Result<Recipe, RepoError> {
        let recipe = Recipe::new(self.store.next_id(), new, Timestamp::now())?;
        self.store.insert(recipe.clone()).await?;
        tracing::info!(id = %recipe.id, kind = %recipe.kind, "recipe created");
        Ok(recipe)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Recipe, RepoError> {
        let id = self.parse_id(id)?;
        self.store
            .get(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    pub async fn update(&self, id: &str, patch: RecipePatch) -> Result<Recipe, RepoError> {
        let id = self.parse_id(id)?;
        if patch.is_empty() {
            return Err(RepoError::EmptyPatch);
        }

        match self.store.update(&id, &patch).await? {
            Some(recipe) => {
                tracing::info!(
                    id = %recipe.id,
                    title_changed = patch.title.is_some(),
                    content_changed = patch.content.is_some(),
                    "recipe updated"
                );
                Ok(recipe)
            }
            None => Err(RepoError::NotFound(id.to_string())),
        }
    }

    /// Remove one recipe and return its last state.
    pub async fn delete_by_id(&self, id: &str) -> Result<Recipe, RepoError> {
        let id = self.parse_id(id)?;
        let recipe = self
            .store
            .remove(&id)
            .await?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        tracing::info!(id = %recipe.id, kind = %recipe.kind, "recipe deleted");
        Ok(recipe)
    }
}
