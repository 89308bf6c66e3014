use axum::Json;
use serde::Serialize;

use recipe_kinds::{all_kinds, FieldSpec};

#[derive(Serialize)]
pub struct KindSummary {
    id: String,
    name: String,
    fields: Vec<FieldSpec>,
}

pub async fn list_kinds() -> Json<Vec<KindSummary>> {
    let kinds: Vec<KindSummary> = all_kinds()
        .into_iter()
        .map(|k| KindSummary {
            id: k.id().to_string(),
            name: k.name().to_string(),
            fields: k.schema().fields.clone(),
        })
        .collect();
    Json(kinds)
}
