//! Item record model and DTOs for the `tbl_123_posts` table.
//!
//! Wire names are camelCase to match the web client.

use lostfound_core::item::ItemStatus;
use lostfound_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tbl_123_posts` table.
///
/// The security answer is loaded for claim checks but never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: DbId,
    pub item_name: String,
    #[sqlx(try_from = "String")]
    pub status: ItemStatus,
    pub location_lost: Option<String>,
    pub location_found: Option<String>,
    pub lost_date: Option<String>,
    pub found_date: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub security_question: Option<String>,
    #[serde(skip_serializing)]
    pub security_answer: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item. `status` defaults to `Lost`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub item_name: String,
    pub status: Option<ItemStatus>,
    pub location_lost: Option<String>,
    pub location_found: Option<String>,
    pub lost_date: Option<String>,
    pub found_date: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
}

/// DTO for a partial update. Only `Some` fields are written; `id` is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    pub item_name: Option<String>,
    pub status: Option<ItemStatus>,
    pub location_lost: Option<String>,
    pub location_found: Option<String>,
    pub lost_date: Option<String>,
    pub found_date: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
}

/// A "found item" report as submitted by the client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemReport {
    pub item_name: Option<String>,
    pub location_found: Option<String>,
    pub found_date: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
    pub image_url: Option<String>,
    pub user_id: Option<String>,
}

impl FoundItemReport {
    /// Wire name and value of every field a found report must carry.
    pub fn required_fields(&self) -> [(&'static str, Option<&str>); 9] {
        [
            ("itemName", self.item_name.as_deref()),
            ("locationFound", self.location_found.as_deref()),
            ("foundDate", self.found_date.as_deref()),
            ("category", self.category.as_deref()),
            ("color", self.color.as_deref()),
            ("contactEmail", self.contact_email.as_deref()),
            ("contactPhone", self.contact_phone.as_deref()),
            ("securityQuestion", self.security_question.as_deref()),
            ("securityAnswer", self.security_answer.as_deref()),
        ]
    }

    /// Convert a validated report into an insert with `status = Found`.
    pub fn into_create(self) -> CreateItem {
        CreateItem {
            item_name: self.item_name.unwrap_or_default(),
            status: Some(ItemStatus::Found),
            location_found: self.location_found,
            found_date: self.found_date,
            category: self.category,
            color: self.color,
            description: self.description,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            security_question: self.security_question,
            security_answer: self.security_answer,
            image_url: self.image_url,
            user_id: self.user_id,
            ..CreateItem::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_camel_case_without_answer() {
        let now = chrono::Utc::now();
        let item = Item {
            id: 1,
            item_name: "Wallet".into(),
            status: ItemStatus::Found,
            location_lost: None,
            location_found: Some("Library".into()),
            lost_date: None,
            found_date: Some("2024-05-01".into()),
            category: Some("Accessories".into()),
            color: Some("Black".into()),
            description: None,
            contact_email: Some("a@b.c".into()),
            contact_phone: Some("555".into()),
            security_question: Some("Initials?".into()),
            security_answer: Some("JD".into()),
            image_url: None,
            user_id: Some("u1".into()),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["itemName"], "Wallet");
        assert_eq!(json["status"], "Found");
        assert_eq!(json["locationFound"], "Library");
        assert_eq!(json["securityQuestion"], "Initials?");
        assert!(json.get("securityAnswer").is_none());
    }

    #[test]
    fn create_item_deserializes_camel_case() {
        let input: CreateItem = serde_json::from_value(serde_json::json!({
            "itemName": "Umbrella",
            "status": "Lost",
            "locationLost": "Bus 12",
            "unknownColumn": "ignored"
        }))
        .unwrap();
        assert_eq!(input.item_name, "Umbrella");
        assert_eq!(input.status, Some(ItemStatus::Lost));
        assert_eq!(input.location_lost.as_deref(), Some("Bus 12"));
    }

    #[test]
    fn found_report_converts_with_found_status() {
        let report = FoundItemReport {
            item_name: Some("Keys".into()),
            location_found: Some("Gym".into()),
            ..FoundItemReport::default()
        };
        let create = report.into_create();
        assert_eq!(create.item_name, "Keys");
        assert_eq!(create.status, Some(ItemStatus::Found));
        assert_eq!(create.location_found.as_deref(), Some("Gym"));
        assert!(create.location_lost.is_none());
    }
}
