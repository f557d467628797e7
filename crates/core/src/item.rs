//! Item lifecycle rules: status values, lookup keys, found-report
//! validation, location mirroring and claim answer comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in `NotFound` errors.
pub const ITEM_ENTITY: &str = "Item";

/// Number of records returned by the home-page preview listing.
pub const PREVIEW_LIMIT: i64 = 4;

/// Message prefix for an incomplete found-item report.
pub const FOUND_REPORT_REQUIRED_MESSAGE: &str = "All fields except description are required";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Whether an item was reported lost or found.
///
/// Stored as the literal text `Lost` / `Found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Lost,
    Found,
}

impl ItemStatus {
    /// Database and wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "Lost",
            Self::Found => "Found",
        }
    }

    /// Parse from the database / form value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "Lost" => Ok(Self::Lost),
            "Found" => Ok(Self::Found),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: Lost, Found"
            ))),
        }
    }
}

impl TryFrom<String> for ItemStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Lookup key
// ---------------------------------------------------------------------------

/// How a single item is addressed from `/items/{key}`.
///
/// A segment written as a plain decimal number (no sign, no leading zeros)
/// is an id; anything else, `"+5"` and `"007"` included, is matched exactly
/// against the item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Id(DbId),
    Name(String),
}

impl ItemKey {
    pub fn parse(segment: &str) -> Self {
        let canonical = !segment.is_empty()
            && segment.bytes().all(|b| b.is_ascii_digit())
            && (segment == "0" || !segment.starts_with('0'));
        match segment.parse::<DbId>() {
            Ok(id) if canonical => Self::Id(id),
            _ => Self::Name(segment.to_string()),
        }
    }

    /// Build the `NotFound` error for this key.
    pub fn not_found(&self) -> CoreError {
        CoreError::NotFound {
            entity: ITEM_ENTITY,
            key: self.to_string(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// `NotFound` error for an item id.
pub fn item_not_found(id: DbId) -> CoreError {
    ItemKey::Id(id).not_found()
}

// ---------------------------------------------------------------------------
// Found-report validation
// ---------------------------------------------------------------------------

/// Check that every `(field, value)` pair carries a non-blank value.
///
/// On failure the error lists the missing wire field names after
/// [`FOUND_REPORT_REQUIRED_MESSAGE`].
pub fn validate_found_report(fields: &[(&'static str, Option<&str>)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{FOUND_REPORT_REQUIRED_MESSAGE} (missing: {})",
            missing.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Location mirroring
// ---------------------------------------------------------------------------

/// Resolve the `locationFound` value written by an update.
///
/// Whenever `locationLost` is supplied it overwrites `locationFound`,
/// regardless of the item's status.
pub fn mirror_location(location_lost: Option<&str>, location_found: Option<String>) -> Option<String> {
    match location_lost {
        Some(lost) => Some(lost.to_string()),
        None => location_found,
    }
}

// ---------------------------------------------------------------------------
// Claim answers
// ---------------------------------------------------------------------------

/// Reject an empty claim answer.
pub fn require_answer(answer: &str) -> Result<&str, CoreError> {
    if answer.is_empty() {
        Err(CoreError::Validation("Answer is required".into()))
    } else {
        Ok(answer)
    }
}

/// Exact, case-sensitive comparison against the stored answer.
///
/// An item without a stored answer never matches.
pub fn answers_match(stored: Option<&str>, submitted: &str) -> bool {
    stored.is_some_and(|s| s == submitted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
