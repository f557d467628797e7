//! Handlers for the `/items` resource and its listings.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use lostfound_core::item::ItemKey;
use lostfound_core::types::DbId;
use lostfound_db::models::item::{CreateItem, Item};

use super::form::{read_item_form, update_from_fields};
use crate::error::AppResult;
use crate::query::UserItemsParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Multipart field carrying a replacement image on update.
pub const EDIT_IMAGE_FIELD: &str = "editAddImage";

/// GET /api/all-items
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.list_all().await?))
}

/// GET /api/items
///
/// The first few items, for the home page.
pub async fn list_preview(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.list_preview().await?))
}

/// GET /api/user-items?userId=
pub async fn list_by_user(
    State(state): State<AppState>,
    Query(params): Query<UserItemsParams>,
) -> AppResult<Json<Vec<Item>>> {
    let items = state.items.list_by_user(params.user_id.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/items/{key}
///
/// `key` is an id when it parses as an integer, otherwise an exact item name.
pub async fn get_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Item>> {
    let item = state.items.get_by_key(&ItemKey::parse(&key)).await?;
    Ok(Json(item))
}

/// POST /api/items
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<Json<Item>> {
    let item = state.items.create(&input).await?;
    Ok(Json(item))
}

/// PUT /api/items/{id}
///
/// Multipart partial update with an optional `editAddImage` file.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<SuccessResponse>> {
    let form = read_item_form(multipart, EDIT_IMAGE_FIELD).await?;
    let input = update_from_fields(form.fields)?;
    state.items.update(id, input, form.file).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/items/{id}
///
/// Deletes the record and, best-effort, its image file.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    state.items.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
