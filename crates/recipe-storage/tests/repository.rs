use std::sync::Arc;

use recipe_core::{NewRecipe, Recipe, RecipeKind, RecipePatch, ValidationError};
use recipe_kinds::ContentError;
use recipe_storage::{MemoryRecipeStore, RecipeRepository, RecipeStore, RepoError};
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn repo() -> RecipeRepository {
    RecipeRepository::new(Arc::new(MemoryRecipeStore::new()))
}

fn memo(title: &str, text: &str) -> NewRecipe {
    NewRecipe {
        kind: RecipeKind::Memo,
        title: title.to_string(),
        content: object(json!({ "memo": text })),
    }
}

fn link(title: &str, url: &str) -> NewRecipe {
    NewRecipe {
        kind: RecipeKind::WebLink,
        title: title.to_string(),
        content: object(json!({ "url": url })),
    }
}

fn assert_stored_invariants(recipe: &Recipe) {
    recipe_kinds::validate_fields(recipe.kind.schema(), &recipe.content)
        .expect("stored content must match its kind");
    assert!(recipe.last_modified_at >= recipe.created_at);
}

#[tokio::test]
async fn create_assigns_id_and_equal_timestamps() {
    let repo = repo();
    let recipe = repo.create(memo("Bread", "flour")).await.unwrap();

    assert!(repo.is_valid_id(recipe.id.as_str()));
    assert_eq!(recipe.created_at, recipe.last_modified_at);
    assert_stored_invariants(&recipe);
}

#[tokio::test]
async fn create_then_find_round_trips() {
    let repo = repo();
    let created = repo.create(memo("T", "M")).await.unwrap();

    let found = repo.find_by_id(created.id.as_str()).await.unwrap();
    assert_eq!(found, created);
    assert_eq!(found.kind, RecipeKind::Memo);
    assert_eq!(found.title, "T");
    assert_eq!(found.content, object(json!({ "memo": "M" })));
}

#[tokio::test]
async fn create_rejects_mismatched_content() {
    let repo = repo();
    let bad = NewRecipe {
        kind: RecipeKind::WebLink,
        title: "oops".to_string(),
        content: object(json!({ "memo": "not a url" })),
    };

    let err = repo.create(bad).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::Content(ContentError::UnexpectedField(_)))
    ));
    assert!(repo.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_are_unique_and_not_reused_after_delete() {
    let repo = repo();
    let first = repo.create(memo("a", "a")).await.unwrap();
    repo.delete_by_id(first.id.as_str()).await.unwrap();
    let second = repo.create(memo("b", "b")).await.unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn find_with_malformed_or_missing_id_is_not_found() {
    let repo = repo();

    let err = repo.find_by_id("not-an-id").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let err = repo.find_by_id("000000000000000000000000").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn list_all_is_empty_not_error_and_keeps_insertion_order() {
    let repo = repo();
    assert!(repo.list_all().await.unwrap().is_empty());

    let a = repo.create(memo("a", "1")).await.unwrap();
    let b = repo.create(link("b", "https://b.example")).await.unwrap();
    let c = repo.create(memo("c", "3")).await.unwrap();

    let ids: Vec<_> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[tokio::test]
async fn list_kind_filters_by_kind() {
    let repo = repo();
    repo.create(memo("a", "1")).await.unwrap();
    let link = repo.create(link("b", "https://b.example")).await.unwrap();

    let links = repo.list_kind(RecipeKind::WebLink).await.unwrap();
    assert_eq!(links, vec![link]);
}

#[tokio::test]
async fn delete_all_reports_accurate_counts() {
    let repo = repo();
    assert_eq!(repo.delete_all().await.unwrap(), 0);

    repo.create(memo("a", "1")).await.unwrap();
    repo.create(memo("b", "2")).await.unwrap();
    assert_eq!(repo.delete_all().await.unwrap(), 2);
    assert!(repo.list_all().await.unwrap().is_empty());
    assert_eq!(repo.delete_all().await.unwrap(), 0);
}

#[tokio::test]
async fn update_title_only_keeps_content() {
    let repo = repo();
    let created = repo.create(memo("old", "body")).await.unwrap();

    let updated = repo
        .update(
            created.id.as_str(),
            RecipePatch {
                title: Some("new".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "new");
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.kind, created.kind);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.last_modified_at > created.last_modified_at);
    assert_stored_invariants(&updated);
}

#[tokio::test]
async fn update_content_only_keeps_title() {
    let repo = repo();
    let created = repo.create(link("site", "https://old.example")).await.unwrap();

    let updated = repo
        .update(
            created.id.as_str(),
            RecipePatch {
                title: None,
                content: Some(object(json!({ "url": "https://new.example" }))),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "site");
    assert_eq!(updated.content["url"], "https://new.example");
    assert_stored_invariants(&updated);
}

#[tokio::test]
async fn update_with_content_of_other_kind_is_rejected_and_not_written() {
    let repo = repo();
    let created = repo.create(memo("m", "text")).await.unwrap();

    let err = repo
        .update(
            created.id.as_str(),
            RecipePatch {
                title: None,
                content: Some(object(json!({ "url": "https://x.example" }))),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let stored = repo.find_by_id(created.id.as_str()).await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn update_empty_patch_and_missing_ids() {
    let repo = repo();
    let created = repo.create(memo("m", "text")).await.unwrap();

    let err = repo
        .update(created.id.as_str(), RecipePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::EmptyPatch));

    let patch = RecipePatch {
        title: Some("x".to_string()),
        content: None,
    };
    let err = repo.update("bogus", patch.clone()).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    repo.delete_by_id(created.id.as_str()).await.unwrap();
    let err = repo.update(created.id.as_str(), patch).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn delete_returns_last_state_and_second_delete_is_not_found() {
    let repo = repo();
    let created = repo.create(memo("gone", "soon")).await.unwrap();

    let deleted = repo.delete_by_id(created.id.as_str()).await.unwrap();
    assert_eq!(deleted, created);

    let err = repo.delete_by_id(created.id.as_str()).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    let err = repo.find_by_id(created.id.as_str()).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn memory_store_id_format() {
    let store = MemoryRecipeStore::new();
    let id = store.next_id();

    assert_eq!(id.as_str().len(), 24);
    assert!(store.is_valid_id(id.as_str()));
    assert!(!store.is_valid_id("ABCDEF0123456789abcdef01"));
    assert!(!store.is_valid_id("0123456789abcdef0123456"));
    assert!(!store.is_valid_id("0f8fad5b-d9cb-469f-a165-70867728950e"));
    assert_ne!(store.next_id(), id);
}

#[tokio::test]
async fn store_insert_revalidates_entities() {
    let store = MemoryRecipeStore::new();
    let mut recipe = Recipe::new(
        store.next_id(),
        memo("ok", "fine"),
        jiff::Timestamp::now(),
    )
    .unwrap();
    recipe.content = object(json!({ "memo": "fine", "extra": 1 }));

    let err = store.insert(recipe).await.unwrap_err();
    assert!(matches!(
        err,
        recipe_storage::StorageError::Validation(ValidationError::Content(_))
    ));
}

#[tokio::test]
async fn store_insert_rejects_an_existing_id() {
    let store = MemoryRecipeStore::new();
    let first = Recipe::new(store.next_id(), memo("first", "a"), jiff::Timestamp::now()).unwrap();
    store.insert(first.clone()).await.unwrap();

    let clash = Recipe::new(first.id.clone(), memo("second", "b"), jiff::Timestamp::now()).unwrap();
    let err = store.insert(clash).await.unwrap_err();
    assert!(matches!(
        err,
        recipe_storage::StorageError::PreconditionFailed { .. }
    ));
    assert_eq!(store.get(&first.id).await.unwrap(), Some(first));
}
