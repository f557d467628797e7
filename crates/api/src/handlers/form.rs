//! Multipart form parsing shared by the item handlers.
//!
//! Text fields are mapped onto explicit DTOs through an allowlist of wire
//! names; anything else in the form is ignored.

use axum::extract::Multipart;
use lostfound_core::item::ItemStatus;
use lostfound_db::models::item::{FoundItemReport, UpdateItem};

use crate::error::{AppError, AppResult};
use crate::services::UploadedFile;

/// Text fields and the optional file from a multipart body.
#[derive(Debug, Default)]
pub struct ItemForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<UploadedFile>,
}

/// Drain `multipart`, treating the part named `file_field` as the upload.
///
/// A file part with neither a name nor content (what browsers send for an
/// untouched file input) counts as no file.
pub async fn read_item_form(mut multipart: Multipart, file_field: &str) -> AppResult<ItemForm> {
    let mut form = ItemForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == file_field {
            let file_name = field.file_name().unwrap_or("").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            form.file = Some(UploadedFile {
                file_name,
                bytes: bytes.to_vec(),
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.fields.push((name, text));
        }
    }

    Ok(form)
}

/// Build a partial update from form fields. Empty values leave the column
/// untouched.
pub fn update_from_fields(fields: Vec<(String, String)>) -> AppResult<UpdateItem> {
    let mut input = UpdateItem::default();
    for (name, value) in fields {
        if value.is_empty() {
            continue;
        }
        let slot = match name.as_str() {
            "status" => {
                input.status = Some(ItemStatus::parse(&value)?);
                continue;
            }
            "itemName" => &mut input.item_name,
            "locationLost" => &mut input.location_lost,
            "locationFound" => &mut input.location_found,
            "lostDate" => &mut input.lost_date,
            "foundDate" => &mut input.found_date,
            "category" => &mut input.category,
            "color" => &mut input.color,
            "description" => &mut input.description,
            "contactEmail" => &mut input.contact_email,
            "contactPhone" => &mut input.contact_phone,
            "securityQuestion" => &mut input.security_question,
            "securityAnswer" => &mut input.security_answer,
            "imageUrl" => &mut input.image_url,
            "userId" => &mut input.user_id,
            other => {
                tracing::debug!(field = other, "Ignoring unknown update field");
                continue;
            }
        };
        *slot = Some(value);
    }
    Ok(input)
}

/// Build a found-item report from form fields. Empty values count as absent.
pub fn found_report_from_fields(fields: Vec<(String, String)>) -> FoundItemReport {
    let mut report = FoundItemReport::default();
    for (name, value) in fields {
        if value.is_empty() {
            continue;
        }
        let slot = match name.as_str() {
            "itemName" => &mut report.item_name,
            "locationFound" => &mut report.location_found,
            "foundDate" => &mut report.found_date,
            "category" => &mut report.category,
            "color" => &mut report.color,
            "description" => &mut report.description,
            "contactEmail" => &mut report.contact_email,
            "contactPhone" => &mut report.contact_phone,
            "securityQuestion" => &mut report.security_question,
            "securityAnswer" => &mut report.security_answer,
            "imageUrl" => &mut report.image_url,
            "userId" => &mut report.user_id,
            other => {
                tracing::debug!(field = other, "Ignoring unknown found-report field");
                continue;
            }
        };
        *slot = Some(value);
    }
    report
}
