use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

pub mod auth;
pub mod members;
pub mod projects;
pub mod tasks;

/// Body of the delete and change-password confirmations.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// For patch fields that tell absent ("keep") apart from null ("clear"):
/// serde only calls this when the field is present, so the outer `Some`
/// marks presence and the inner option carries the nullability.
pub(crate) fn deserialize_some<'de, T, D>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ValidationError::new(format!(
            "Invalid date '{value}', expected YYYY-MM-DD"
        ))
    })
}

/// Patch fields distinguish absent (keep) from null (clear); the nested
/// option mirrors that, so only the innermost value needs parsing.
pub(crate) fn parse_nullable_date(
    value: Option<Option<String>>,
) -> Result<Option<Option<NaiveDate>>, ValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(s)) => Ok(Some(Some(parse_date(&s)?))),
    }
}
