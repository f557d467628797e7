pub mod health;
pub mod items;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /all-items                     every item (GET)
/// /items                         preview listing (GET), create (POST)
/// /items/{key}                   get by id or name (GET), update (PUT), delete (DELETE)
/// /user-items?userId=            items reported by one user (GET)
/// /found-items                   found-item report (POST, multipart)
/// /claim-item/{id}               verify a claim answer (POST)
/// /upload                        raw image upload (POST, multipart)
/// /profile-graph-data            static chart data (GET)
/// /home-graph-data               static chart data (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(items::router())
        .route("/found-items", post(handlers::found_items::report))
        .route("/claim-item/{id}", post(handlers::claim::claim))
        .route("/upload", post(handlers::upload::upload))
        .route("/profile-graph-data", get(handlers::graph_data::profile_graph))
        .route("/home-graph-data", get(handlers::graph_data::home_graph))
}
