//! Failure payload shared by every lifecycle operation.
//!
//! An [`Error`] pairs a stable [`ErrorCode`] with a message for humans. Ownership
//! failures also name the [`ForbiddenReason`] that tripped them; on the wire the
//! reason is folded into `details.reason` so clients see one envelope shape:
//!
//! ```json
//! {"code": "forbidden", "message": "...", "details": {"reason": "project_delete_forbidden"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error as ThisError;

use crate::domain::ForbiddenReason;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed input or a broken business rule.
    InvalidRequest,
    /// No acting user could be established.
    Unauthorized,
    /// The acting user does not own the resource.
    Forbidden,
    /// A referenced project, tryout, member, comment, or resume is absent.
    NotFound,
    /// The request clashes with the stored state.
    Conflict,
    /// A store or collaborator could not be reached.
    ServiceUnavailable,
    /// Anything else; never shown to clients verbatim.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "authentication required",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "internal error",
        }
    }
}

/// Rejected payloads when an error is rebuilt from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorValidationError {
    /// The message was empty after trimming.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// `details.reason` did not name a known ownership rule.
    #[error("unknown forbidden reason: {0}")]
    UnknownReason(String),
}

/// Failure returned by domain services and rendered by adapters.
///
/// The message is never blank; constructors substitute
/// [`ErrorCode::fallback_message`] instead.
///
/// # Examples
/// ```
/// use project_hub::domain::{Error, ErrorCode, ForbiddenReason};
///
/// let err = Error::not_found("project missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
///
/// let err = Error::forbidden_because(ForbiddenReason::ProjectDelete);
/// assert_eq!(err.reason(), Some(ForbiddenReason::ProjectDelete));
/// assert_eq!(err.details().unwrap()["reason"], "project_delete_forbidden");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ThisError)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    reason: Option<ForbiddenReason>,
    details: Option<Value>,
}

impl Error {
    /// Build an error, replacing a blank message with the code's fallback.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            reason: None,
            details: None,
        }
    }

    /// Build an error, refusing a blank message.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::new(code, message))
    }

    /// Ownership failure for `reason`, with its shared message.
    pub fn forbidden_because(reason: ForbiddenReason) -> Self {
        let mut err = Self::new(ErrorCode::Forbidden, reason.message());
        err.reason = Some(reason);
        err.details = Some(json_object([("reason", Value::from(reason.code()))]));
        err
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Ownership rule that produced a forbidden error.
    pub fn reason(&self) -> Option<ForbiddenReason> {
        self.reason
    }

    /// Structured details as rendered for clients.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    ///
    /// Object details are merged over any reason already present, so
    /// `details.reason` keeps naming the ownership rule.
    ///
    /// # Examples
    /// ```
    /// use project_hub::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "title" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "title" })));
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = match (self.details.take(), details) {
            (Some(Value::Object(mut existing)), Value::Object(extra)) => {
                existing.extend(extra);
                Some(Value::Object(existing))
            }
            (_, details) => Some(details),
        };
        if let Some(reason) = self.reason {
            self.pin_reason(reason);
        }
        self
    }

    fn pin_reason(&mut self, reason: ForbiddenReason) {
        let code = Value::from(reason.code());
        match self.details.as_mut() {
            Some(Value::Object(map)) => {
                map.insert("reason".to_owned(), code);
            }
            _ => self.details = Some(json_object([("reason", code)])),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Forbidden without a specific ownership rule; prefer
    /// [`Error::forbidden_because`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn json_object<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect::<Map<_, _>>(),
    )
}

/// Wire envelope; the typed reason travels inside `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;
        let mut error = Self::try_new(code, message)?;
        error.reason = match details.as_ref().and_then(|d| d.get("reason")) {
            Some(Value::String(raw)) if code == ErrorCode::Forbidden => Some(
                raw.parse()
                    .map_err(|_| ErrorValidationError::UnknownReason(raw.clone()))?,
            ),
            _ => None,
        };
        error.details = details;
        Ok(error)
    }
}
