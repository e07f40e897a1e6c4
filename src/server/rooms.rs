//! Room catalogue endpoints. Public reads, no guard.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppResult;
use crate::server::docjson::{doc_to_json, docs_to_json};
use crate::server::AppState;

pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let rooms = state.store.rooms_all().await?;
    Ok(Json(docs_to_json(rooms)))
}

/// Unknown ids answer `null` with 200, mirroring the driver's find-one result.
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let room = state.store.room_by_id(&id).await?;
    Ok(Json(room.map(doc_to_json).unwrap_or(Value::Null)))
}
