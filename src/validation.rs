//! Input validation utilities for the service layer.
//!
//! Validation always runs before any store call, so a rejected request
//! never touches persistence.

use std::collections::BTreeMap;

use mongodb::bson::oid::ObjectId;

use crate::error::{Error, Result, ValidationErrors};

/// Checks that every named field is present and not blank.
///
/// All missing fields are reported together.
///
/// # Examples
/// ```
/// use portfolio::validation::require_fields;
///
/// let name = Some("Ada".to_string());
/// let email = Some("   ".to_string());
/// let message = None;
///
/// assert!(require_fields(&[("name", &name)]).is_ok());
/// assert!(require_fields(&[("name", &name), ("email", &email), ("message", &message)]).is_err());
/// ```
pub fn require_fields(fields: &[(&str, &Option<String>)]) -> Result<()> {
    let missing: BTreeMap<String, String> = fields
        .iter()
        .filter(|(_, value)| is_blank(value.as_deref()))
        .map(|(field, _)| (field.to_string(), format!("{} is required", field)))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Error::Validation(ValidationErrors::Multiple { fields: missing }))
}

/// Rejects a blank value for a field that is being overwritten.
///
/// Absent fields are fine; they are simply not updated.
pub fn reject_blank(field: &str, value: &Option<String>) -> Result<()> {
    match value {
        Some(value) if is_blank(Some(value)) => {
            Err(Error::field(field, format!("{} cannot be empty", field)))
        }
        _ => Ok(()),
    }
}

/// Parses a path identifier.
///
/// A string that is not an ObjectId cannot name a stored document, so it is
/// reported as `NotFound` with the given message.
pub fn parse_object_id(id: &str, not_found: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id.trim()).map_err(|_| Error::NotFound(not_found.to_string()))
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
