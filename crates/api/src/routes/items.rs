//! Route definitions for item records.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Item routes, merged at the `/api` root.
///
/// ```text
/// GET    /all-items      -> list_all
/// GET    /items          -> list_preview
/// POST   /items          -> create
/// GET    /items/{key}    -> get_by_key
/// PUT    /items/{key}    -> update
/// DELETE /items/{key}    -> delete
/// GET    /user-items     -> list_by_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all-items", get(items::list_all))
        .route("/items", get(items::list_preview).post(items::create))
        .route(
            "/items/{key}",
            get(items::get_by_key)
                .put(items::update)
                .delete(items::delete),
        )
        .route("/user-items", get(items::list_by_user))
}
