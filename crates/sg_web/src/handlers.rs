use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};
use sg_core::{ArticleRequest, GeneratedArticle};
use std::sync::Arc;

use crate::{ApiError, AppState};

pub async fn generate_article(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> Result<Json<GeneratedArticle>, ApiError> {
    let Json(request) = payload?;
    let article = state.pipeline.generate(&request).await?;
    Ok(Json(article))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
