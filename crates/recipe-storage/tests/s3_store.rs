//! Tests for the S3 backend.
//!
//! The id-format tests run offline. The round-trip test calls a real bucket
//! and requires AWS credentials plus `RECIPES_TEST_BUCKET` (and optionally
//! `RECIPES_S3_ENDPOINT` for an S3-compatible service).
//!
//! Run with: `cargo test -p recipe-storage --test s3_store -- --ignored`

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use recipe_core::{NewRecipe, Recipe, RecipeKind, RecipePatch};
use recipe_storage::client::build_client;
use recipe_storage::objects::conditional_failure;
use recipe_storage::{RecipeRepository, RecipeStore, RepoError, S3RecipeStore, StorageError};
use serde_json::json;

fn offline_store() -> S3RecipeStore {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .build();
    S3RecipeStore::new(aws_sdk_s3::Client::from_conf(config), "unused", "")
}

#[test]
fn s3_ids_are_canonical_uuids() {
    let store = offline_store();
    let id = store.next_id();

    assert_eq!(id.as_str().len(), 36);
    assert!(store.is_valid_id(id.as_str()));
    assert!(store.is_valid_id("0f8fad5b-d9cb-469f-a165-70867728950e"));
    // Same UUID, non-canonical spellings: would address a different object key.
    assert!(!store.is_valid_id("0F8FAD5B-D9CB-469F-A165-70867728950E"));
    assert!(!store.is_valid_id("0f8fad5bd9cb469fa16570867728950e"));
    assert!(!store.is_valid_id("5c9a1b2e3f4a5b6c7d8e9f01"));
    assert!(!store.is_valid_id(""));
}

#[test]
fn conditional_failures_are_classified() {
    let key = "recipes/a.json";

    let err = conditional_failure(
        key,
        Some("PreconditionFailed"),
        "precondition".to_string(),
        StorageError::DeleteObject,
    );
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));

    let err = conditional_failure(
        key,
        Some("ConditionalRequestConflict"),
        "conflict".to_string(),
        StorageError::PutObject,
    );
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));

    let err = conditional_failure(
        key,
        None,
        "service error: NoSuchKey: gone".to_string(),
        StorageError::DeleteObject,
    );
    assert!(matches!(err, StorageError::NotFound { .. }));

    let err = conditional_failure(
        key,
        Some("AccessDenied"),
        "denied".to_string(),
        StorageError::DeleteObject,
    );
    assert!(matches!(err, StorageError::DeleteObject(msg) if msg == "denied"));
}

async fn live_store() -> S3RecipeStore {
    let bucket = std::env::var("RECIPES_TEST_BUCKET").expect("RECIPES_TEST_BUCKET must be set");
    let endpoint = std::env::var("RECIPES_S3_ENDPOINT").ok();
    let client = build_client(endpoint.as_deref()).await;
    let prefix = format!("test-{}/", uuid::Uuid::new_v4());
    S3RecipeStore::new(client, bucket, prefix)
}

fn memo_recipe(store: &S3RecipeStore, title: &str) -> Recipe {
    let content = json!({ "memo": title }).as_object().cloned().unwrap();
    Recipe::new(
        store.next_id(),
        NewRecipe {
            kind: RecipeKind::Memo,
            title: title.to_string(),
            content,
        },
        jiff::Timestamp::now(),
    )
    .unwrap()
}

#[tokio::test]
#[ignore]
async fn s3_concurrent_deletes_have_one_winner() {
    let store = Arc::new(live_store().await);
    let recipe = memo_recipe(&store, "contested");
    store.insert(recipe.clone()).await.unwrap();

    let (a, b) = tokio::join!(store.remove(&recipe.id), store.remove(&recipe.id));
    let winners = [a.unwrap(), b.unwrap()]
        .into_iter()
        .filter(Option::is_some)
        .count();
    assert_eq!(winners, 1);
    assert!(store.get(&recipe.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn s3_insert_rejects_an_existing_id() {
    let store = live_store().await;
    let recipe = memo_recipe(&store, "first");
    store.insert(recipe.clone()).await.unwrap();

    let mut clash = memo_recipe(&store, "second");
    clash.id = recipe.id.clone();
    let err = store.insert(clash).await.unwrap_err();
    assert!(matches!(err, StorageError::PreconditionFailed { .. }));
    assert_eq!(store.get(&recipe.id).await.unwrap(), Some(recipe.clone()));

    store.remove(&recipe.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn s3_round_trip() {
    let bucket = std::env::var("RECIPES_TEST_BUCKET").expect("RECIPES_TEST_BUCKET must be set");
    let endpoint = std::env::var("RECIPES_S3_ENDPOINT").ok();
    let client = build_client(endpoint.as_deref()).await;
    let prefix = format!("test-{}/", uuid::Uuid::new_v4());
    let repo = RecipeRepository::new(Arc::new(S3RecipeStore::new(client, bucket, prefix)));

    let content = json!({ "memo": "from s3" }).as_object().cloned().unwrap();
    let created = repo
        .create(NewRecipe {
            kind: RecipeKind::Memo,
            title: "S3".to_string(),
            content,
        })
        .await
        .expect("create should succeed");

    let found = repo.find_by_id(created.id.as_str()).await.unwrap();
    assert_eq!(found, created);

    let updated = repo
        .update(
            created.id.as_str(),
            RecipePatch {
                title: Some("S3 renamed".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "S3 renamed");
    assert!(updated.last_modified_at > created.last_modified_at);

    assert_eq!(repo.list_all().await.unwrap().len(), 1);
    repo.delete_by_id(created.id.as_str()).await.unwrap();
    assert!(matches!(
        repo.find_by_id(created.id.as_str()).await,
        Err(RepoError::NotFound(_))
    ));
    assert_eq!(repo.delete_all().await.unwrap(), 0);
}
