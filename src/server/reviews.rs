//! Guest review endpoints. Public reads and writes, no guard.

use axum::extract::State;
use axum::Json;
use mongodb::bson::to_document;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::server::docjson::{bson_to_json, docs_to_json};
use crate::server::AppState;

pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let reviews = state.store.reviews_all().await?;
    Ok(Json(docs_to_json(reviews)))
}

/// Store the review exactly as posted and return the new id.
pub async fn create_review(
    State(state): State<AppState>,
    Json(review): Json<Value>,
) -> AppResult<Json<Value>> {
    let doc = to_document(&review)
        .map_err(|_| AppError::user("review payload must be a JSON object"))?;
    let inserted_id = state.store.insert_review(doc).await?;
    Ok(Json(json!({ "acknowledged": true, "insertedId": bson_to_json(inserted_id) })))
}
