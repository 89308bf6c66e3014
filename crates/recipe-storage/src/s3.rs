//! S3-backed store: one JSON object per recipe under `{prefix}recipes/`.
//!
//! Ids are canonical (lowercase, hyphenated) UUID v4 strings. Inserts use
//! `If-None-Match: *`; updates and single deletes are guarded by `If-Match`
//! on the ETag that was read.

use aws_sdk_s3::Client;
use recipe_core::{s3_keys, Recipe, RecipeId, RecipePatch};
use uuid::Uuid;

use crate::error::StorageError;
use crate::json;
use crate::objects;
use crate::store::{BoxFuture, RecipeStore};

/// Conditional-write attempts before an update or delete is reported as a
/// conflict.
const MAX_CONDITIONAL_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct S3RecipeStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3RecipeStore {
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    fn key(&self, id: &RecipeId) -> String {
        s3_keys::recipe(&self.prefix, id)
    }

    /// Load one recipe and its ETag. None = no such object.
    async fn load(&self, key: &str) -> Result<Option<(Recipe, String)>, StorageError> {
        match json::load_json::<Recipe>(&self.client, &self.bucket, key).await {
            Ok(found) => Ok(Some(found)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Keys of every recipe object. Foreign objects under the recipes
    /// prefix are logged and left alone.
    async fn recipe_keys(&self) -> Result<Vec<String>, StorageError> {
        let prefix = s3_keys::recipes_prefix(&self.prefix);
        let keys = objects::list_objects(&self.client, &self.bucket, &prefix).await?;
        let listed = keys.len();
        let keys = s3_keys::recipe_keys(&self.prefix, keys);
        if keys.len() < listed {
            tracing::warn!(
                skipped = listed - keys.len(),
                prefix = %prefix,
                "skipping non-recipe objects under recipes prefix"
            );
        }
        Ok(keys)
    }
}

impl RecipeStore for S3RecipeStore {
    fn name(&self) -> &'static str {
        "s3"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        Uuid::try_parse(id).is_ok_and(|uuid| uuid.hyphenated().to_string() == id)
    }

    fn next_id(&self) -> RecipeId {
        RecipeId::new(Uuid::new_v4().hyphenated().to_string())
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Recipe>, StorageError>> {
        Box::pin(async move {
            let keys = self.recipe_keys().await?;

            let mut recipes = Vec::with_capacity(keys.len());
            for key in &keys {
                // Deleted between LIST and GET: no longer part of the collection.
                if let Some((recipe, _etag)) = self.load(key).await? {
                    recipes.push(recipe);
                }
            }

            Ok(recipes)
        })
    }

    fn get<'a>(
        &'a self,
        id: &'a RecipeId,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>> {
        Box::pin(async move {
            let found = self.load(&self.key(id)).await?;
            Ok(found.map(|(recipe, _etag)| recipe))
        })
    }

    fn insert(&self, recipe: Recipe) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            recipe.validate()?;
            let key = self.key(&recipe.id);
            json::save_json_if_absent(&self.client, &self.bucket, &key, &recipe).await?;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a RecipeId,
        patch: &'a RecipePatch,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>> {
        Box::pin(async move {
            let key = self.key(id);

            for attempt in 1..=MAX_CONDITIONAL_ATTEMPTS {
                let Some((mut recipe, etag)) = self.load(&key).await? else {
                    return Ok(None);
                };
                recipe.apply(patch)?;

                match json::save_json_if_match(&self.client, &self.bucket, &key, &recipe, &etag)
                    .await
                {
                    Ok(_) => return Ok(Some(recipe)),
                    Err(StorageError::NotFound { .. }) => return Ok(None),
                    Err(StorageError::PreconditionFailed { .. }) => {
                        tracing::debug!(id = %id, attempt, "concurrent write detected, retrying update");
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(StorageError::UpdateConflict { id: id.to_string() })
        })
    }

    fn remove<'a>(
        &'a self,
        id: &'a RecipeId,
    ) -> BoxFuture<'a, Result<Option<Recipe>, StorageError>> {
        Box::pin(async move {
            let key = self.key(id);

            for attempt in 1..=MAX_CONDITIONAL_ATTEMPTS {
                let Some((recipe, etag)) = self.load(&key).await? else {
                    return Ok(None);
                };

                match objects::delete_object_if_match(&self.client, &self.bucket, &key, &etag)
                    .await
                {
                    Ok(()) => return Ok(Some(recipe)),
                    Err(StorageError::NotFound { .. }) => return Ok(None),
                    Err(StorageError::PreconditionFailed { .. }) => {
                        tracing::debug!(id = %id, attempt, "concurrent write detected, retrying delete");
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(StorageError::UpdateConflict { id: id.to_string() })
        })
    }

    fn remove_all(&self) -> BoxFuture<'_, Result<u64, StorageError>> {
        Box::pin(async move {
            let keys = self.recipe_keys().await?;
            for key in &keys {
                objects::delete_object(&self.client, &self.bucket, key).await?;
            }
            Ok(keys.len() as u64)
        })
    }
}
