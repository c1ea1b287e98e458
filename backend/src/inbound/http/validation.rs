//! Shared validation helpers for inbound HTTP adapters.

use chrono::{DateTime, Utc};
use pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use serde_json::json;

use crate::domain::{Error, StorageRef};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidTimestamp,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, reason: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} {reason}"))
        .with_value(ErrorCode::InvalidValue, value)
}

/// Parse a typed identifier, reporting failures against `field`.
pub(crate) fn parse_id<'v, T, E>(
    value: &'v str,
    field: FieldName,
    parse: impl FnOnce(&'v str) -> Result<T, E>,
) -> Result<T, Error> {
    parse(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a list of typed identifiers, reporting the first bad index.
pub(crate) fn parse_id_list<T, E>(
    values: Vec<String>,
    field: FieldName,
    parse: impl Fn(String) -> Result<T, E>,
) -> Result<Vec<T>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            parse(value.clone()).map_err(|_| {
                let name = field.as_str();
                ValidationError::new(name, format!("{name} must contain valid UUIDs"))
                    .with_index(ErrorCode::InvalidUuid, index, value.as_str())
            })
        })
        .collect()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, value))
}

/// Parse an optional storage key; blank strings count as absent.
pub(crate) fn parse_optional_storage_ref(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<StorageRef>, Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => StorageRef::new(raw.as_str())
            .map(Some)
            .map_err(|err| invalid_value_error(field, &raw, &err.to_string())),
        _ => Ok(None),
    }
}

/// Build a page request from optional `page`/`size` query parameters.
pub(crate) fn parse_page(page: Option<u32>, size: Option<u32>) -> Result<PageRequest, Error> {
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
    PageRequest::new(page.unwrap_or(0), size).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "size",
            "value": size,
            "code": ErrorCode::InvalidValue.as_str(),
        }))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ProjectId;
    use rstest::rstest;

    #[rstest]
    fn bad_uuid_reports_field_and_value() {
        let err = parse_id("nope", FieldName::new("projectId"), ProjectId::new)
            .expect_err("invalid");
        assert_eq!(err.message(), "projectId must be a valid UUID");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "projectId", "value": "nope", "code": "invalid_uuid"}))
        );
    }

    #[rstest]
    fn id_list_reports_failing_index() {
        let values = vec![ProjectId::random().to_string(), "x".to_owned()];
        let err = parse_id_list(values, FieldName::new("ids"), ProjectId::new)
            .expect_err("invalid");
        assert_eq!(err.details().and_then(|d| d.get("index")), Some(&json!(1)));
    }

    #[rstest]
    #[case(None, None, 0, DEFAULT_PAGE_SIZE)]
    #[case(Some(3), Some(5), 3, 5)]
    fn page_defaults_apply(
        #[case] page: Option<u32>,
        #[case] size: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_size: u32,
    ) {
        let request = parse_page(page, size).expect("valid page");
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.size(), expected_size);
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn out_of_range_size_is_invalid(#[case] size: u32) {
        let err = parse_page(None, Some(size)).expect_err("invalid size");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn blank_storage_ref_is_absent() {
        let parsed = parse_optional_storage_ref(Some("  ".to_owned()), FieldName::new("thumbnail"))
            .expect("blank accepted");
        assert!(parsed.is_none());
    }

    #[rstest]
    fn timestamps_are_normalised_to_utc() {
        let parsed = parse_rfc3339_timestamp("2026-03-01T10:00:00+02:00", FieldName::new("at"))
            .expect("valid");
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T08:00:00+00:00");
    }
}
