//! Handler for raw image uploads.

use axum::extract::{Multipart, State};
use axum::Json;

use super::form::read_item_form;
use crate::error::{AppError, AppResult};
use crate::response::ImageUrlResponse;
use crate::state::AppState;

/// Multipart field carrying the uploaded image.
pub const UPLOAD_FIELD: &str = "image";

/// POST /api/upload
///
/// Stores the `image` part and returns its public URL.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ImageUrlResponse>> {
    let form = read_item_form(multipart, UPLOAD_FIELD).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    let image_url = state.items.store_image(&file).await?;
    Ok(Json(ImageUrlResponse { image_url }))
}
