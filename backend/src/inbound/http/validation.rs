//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies use `Option` fields for required values so a missing field
//! yields the documented `{"error": ...}` envelope rather than a serde
//! deserialisation message.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("missing required field: {}", field.as_str()))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    Error::invalid_request(format!(
        "{} must be a valid UUID (got {value:?})",
        field.as_str()
    ))
}

/// Extract a required field or fail with the missing-field envelope.
pub(crate) fn require_field<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a required UUID field, reporting missing and malformed values
/// separately.
pub(crate) fn parse_required_uuid(
    value: Option<String>,
    field: FieldName,
) -> Result<Uuid, Error> {
    let raw = require_field(value, field)?;
    parse_uuid(&raw, field)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            Error::invalid_request(format!(
                "{} must be an RFC 3339 timestamp (got {value:?})",
                field.as_str()
            ))
        })
}

pub(crate) fn parse_uuid_list(values: Vec<String>, field: FieldName) -> Result<Vec<Uuid>, Error> {
    values
        .iter()
        .map(|value| {
            Uuid::parse_str(value).map_err(|_| {
                Error::invalid_request(format!(
                    "{} must contain valid UUIDs (got {value:?})",
                    field.as_str()
                ))
            })
        })
        .collect()
}
