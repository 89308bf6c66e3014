use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use recipe_core::{Recipe, RecipeKind};

use crate::error::ApiError;
use crate::state::AppState;
use crate::translate::{self, DeleteAllResult, DeleteResult, RecipeList};

/// Unknown kinds in the path are routes that do not exist.
fn path_kind(raw: &str) -> Result<RecipeKind, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("unknown recipe kind: {raw}")))
}

pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<RecipeList>, ApiError> {
    let recipes = state.repo.list_all().await?;
    Ok(Json(RecipeList { recipes }))
}

pub async fn delete_all_recipes(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResult>, ApiError> {
    let count = state.repo.delete_all().await?;
    Ok(Json(DeleteAllResult { count, ok: true }))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let new = translate::parse_create(None, translate::parse_body(&body)?)?;
    let recipe = state.repo.create(new).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn create_recipe_of_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let kind = path_kind(&kind)?;
    let new = translate::parse_create(Some(kind), translate::parse_body(&body)?)?;
    let recipe = state.repo.create(new).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn list_recipes_of_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<RecipeList>, ApiError> {
    let kind = path_kind(&kind)?;
    let recipes = state.repo.list_kind(kind).await?;
    Ok(Json(RecipeList { recipes }))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.repo.find_by_id(&id).await?;
    Ok(Json(recipe))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = translate::update_recipe(&state.repo, None, &id, &body).await?;
    Ok(Json(recipe))
}

pub async fn update_recipe_of_kind(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Recipe>, ApiError> {
    let kind = path_kind(&kind)?;
    let recipe = translate::update_recipe(&state.repo, Some(kind), &id, &body).await?;
    Ok(Json(recipe))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError> {
    let recipe = state.repo.delete_by_id(&id).await?;
    Ok(Json(DeleteResult {
        deleted: true,
        deleted_recipe: recipe,
    }))
}
