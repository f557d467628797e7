//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "success": true }` acknowledgement for mutations that return no record.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "imageUrl": "..." }` returned by the raw upload endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResponse {
    pub image_url: String,
}
