use std::sync::Arc;

use recipe_storage::client::build_client;
use recipe_storage::{MemoryRecipeStore, RecipeRepository, RecipeStore, S3RecipeStore};

use crate::config::Backend;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub repo: RecipeRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self {
            repo: RecipeRepository::new(store),
        }
    }
}

/// Construct the store selected by configuration.
pub async fn build_store(backend: &Backend) -> Arc<dyn RecipeStore> {
    match backend {
        Backend::Memory => Arc::new(MemoryRecipeStore::new()),
        Backend::S3 {
            bucket,
            prefix,
            endpoint,
        } => {
            let client = build_client(endpoint.as_deref()).await;
            Arc::new(S3RecipeStore::new(client, bucket.clone(), prefix.clone()))
        }
    }
}
