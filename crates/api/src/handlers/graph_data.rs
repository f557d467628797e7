//! Static chart data served from `DATA_DIR`.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const PROFILE_GRAPH_FILE: &str = "profileGraph.json";
pub const HOME_GRAPH_FILE: &str = "homeGraph.json";

/// GET /api/profile-graph-data
pub async fn profile_graph(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    serve_json_file(&state, PROFILE_GRAPH_FILE).await
}

/// GET /api/home-graph-data
pub async fn home_graph(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    serve_json_file(&state, HOME_GRAPH_FILE).await
}

async fn serve_json_file(state: &AppState, file_name: &str) -> AppResult<impl IntoResponse> {
    let path = state.config.data_dir.join(file_name);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        AppError::InternalError(format!("Error serving {}: {e}", path.display()))
    })?;
    Ok(([(CONTENT_TYPE, "application/json")], bytes))
}
