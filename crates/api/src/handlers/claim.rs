//! Handler for `/claim-item/{id}`.

use axum::extract::{Path, State};
use axum::Json;
use lostfound_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for a claim. A missing `answer` is treated as empty.
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    #[serde(default)]
    pub answer: String,
}

/// POST /api/claim-item/{id}
pub async fn claim(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ClaimRequest>,
) -> AppResult<Json<SuccessResponse>> {
    state.claims.claim(id, &body.answer).await?;
    Ok(Json(SuccessResponse::ok()))
}
