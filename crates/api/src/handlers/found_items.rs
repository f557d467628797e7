//! Handler for `/found-items` reports.

use axum::extract::{Multipart, State};
use axum::Json;
use lostfound_db::models::item::Item;

use super::form::{found_report_from_fields, read_item_form};
use crate::error::AppResult;
use crate::state::AppState;

/// Multipart field carrying the photo of a found item.
pub const FOUND_IMAGE_FIELD: &str = "image";

/// POST /api/found-items
///
/// Every field except `description` (and the photo) is required.
pub async fn report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Item>> {
    let form = read_item_form(multipart, FOUND_IMAGE_FIELD).await?;
    let report = found_report_from_fields(form.fields);
    let item = state.items.report_found(report, form.file).await?;
    Ok(Json(item))
}
