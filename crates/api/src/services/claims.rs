use std::sync::Arc;

use lostfound_core::error::CoreError;
use lostfound_core::item::{answers_match, item_not_found, require_answer};
use lostfound_core::types::DbId;
use lostfound_db::store::ItemStore;

use crate::error::AppResult;

/// Checks a claimant's answer against an item's stored security answer.
///
/// Verification only: a successful claim does not change the record.
#[derive(Clone)]
pub struct ClaimVerifier {
    store: Arc<dyn ItemStore>,
}

impl ClaimVerifier {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn claim(&self, id: DbId, answer: &str) -> AppResult<()> {
        let answer = require_answer(answer)?;

        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| item_not_found(id))?;

        if answers_match(item.security_answer.as_deref(), answer) {
            tracing::info!(item_id = id, "Claim verified");
            Ok(())
        } else {
            tracing::warn!(item_id = id, "Claim rejected: incorrect answer");
            Err(CoreError::Unauthorized("Incorrect answer".into()).into())
        }
    }
}
