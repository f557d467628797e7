//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?userId=` for the per-user listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItemsParams {
    pub user_id: Option<String>,
}
