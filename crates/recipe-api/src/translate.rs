//! Translation between HTTP bodies and repository calls.
//!
//! Inbound bodies are checked here against the kind registry before the
//! repository sees them; the repository validates again before writing.

use recipe_core::models::recipe::validate_title;
use recipe_core::{NewRecipe, Recipe, RecipeKind, RecipePatch};
use recipe_storage::{RecipeRepository, RepoError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

const CREATE_KEYS: [&str; 3] = ["kind", "title", "content"];
const UPDATE_KEYS: [&str; 2] = ["title", "content"];

#[derive(Debug, Serialize)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResult {
    pub count: u64,
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted: bool,
    #[serde(rename = "deletedRecipe")]
    pub deleted_recipe: Recipe,
}

/// Decode a request body. Anything that is not valid JSON is a bad request.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn into_object(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BadRequest(
            "request body must be a JSON object".to_string(),
        )),
    }
}

fn reject_unknown_keys(body: &Map<String, Value>, allowed: &[&str]) -> Result<(), ApiError> {
    let mut unknown: Vec<&str> = body
        .keys()
        .map(String::as_str)
        .filter(|k| !allowed.contains(k))
        .collect();
    unknown.sort_unstable();
    match unknown.first() {
        Some(key) => Err(ApiError::BadRequest(format!("unexpected field '{key}'"))),
        None => Ok(()),
    }
}

fn parse_title(value: Value) -> Result<String, ApiError> {
    let Value::String(title) = value else {
        return Err(ApiError::BadRequest("title must be a string".to_string()));
    };
    validate_title(&title).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(title)
}

/// Check content against `kind`'s schema and unwrap it to an object.
fn parse_content(kind: RecipeKind, value: Value) -> Result<Map<String, Value>, ApiError> {
    recipe_kinds::validate_against(kind.schema(), &value)?;
    match value {
        Value::Object(map) => Ok(map),
        // validate_against rejects non-objects.
        _ => Err(ApiError::BadRequest("content must be an object".to_string())),
    }
}

fn parse_kind(value: &Value) -> Result<RecipeKind, ApiError> {
    let Value::String(raw) = value else {
        return Err(ApiError::BadRequest("kind must be a string".to_string()));
    };
    Ok(raw.parse::<RecipeKind>()?)
}

/// Turn a create body into a validated [`NewRecipe`].
///
/// `path_kind` is set for `POST /{kind}`; otherwise the body must name the
/// kind itself.
pub fn parse_create(path_kind: Option<RecipeKind>, body: Value) -> Result<NewRecipe, ApiError> {
    let mut body = into_object(body)?;
    reject_unknown_keys(&body, &CREATE_KEYS)?;

    let body_kind = body.get("kind").map(parse_kind).transpose()?;
    let kind = match (path_kind, body_kind) {
        (Some(path), Some(named)) if path != named => {
            return Err(ApiError::BadRequest(format!(
                "body kind '{named}' does not match path kind '{path}'"
            )));
        }
        (Some(kind), _) | (None, Some(kind)) => kind,
        (None, None) => return Err(ApiError::BadRequest("kind is required".to_string())),
    };

    let title = body
        .remove("title")
        .ok_or_else(|| ApiError::BadRequest("title is required".to_string()))?;
    let content = body
        .remove("content")
        .ok_or_else(|| ApiError::BadRequest("content is required".to_string()))?;

    Ok(NewRecipe {
        kind,
        title: parse_title(title)?,
        content: parse_content(kind, content)?,
    })
}

/// Apply a partial update request.
///
/// `path_kind` is set for `PUT /{kind}/{id}` and must agree with the stored
/// kind.
pub async fn update_recipe(
    repo: &RecipeRepository,
    path_kind: Option<RecipeKind>,
    id: &str,
    body: &[u8],
) -> Result<Recipe, ApiError> {
    if !repo.is_valid_id(id) {
        return Err(ApiError::NotFound("recipe not found".to_string()));
    }

    let mut body = into_object(parse_body(body)?)?;
    if !body.contains_key("title") && !body.contains_key("content") {
        return Err(ApiError::BadRequest(
            "update must include title or content".to_string(),
        ));
    }
    if body.contains_key("kind") {
        return Err(ApiError::BadRequest(
            "kind cannot be changed after creation".to_string(),
        ));
    }

    let existing = repo.find_by_id(id).await?;
    if let Some(path) = path_kind
        && path != existing.kind
    {
        return Err(ApiError::BadRequest(format!(
            "recipe is a '{}', not a '{path}'; kind cannot be changed",
            existing.kind
        )));
    }

    reject_unknown_keys(&body, &UPDATE_KEYS)?;
    let title = body.remove("title").map(parse_title).transpose()?;
    let content = body
        .remove("content")
        .map(|c| parse_content(existing.kind, c))
        .transpose()?;

    let patch = RecipePatch { title, content };
    match repo.update(id, patch).await {
        Ok(recipe) => Ok(recipe),
        Err(RepoError::NotFound(_)) => {
            tracing::debug!(id = %id, "recipe vanished between lookup and update");
            Err(ApiError::NotFound("recipe not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
