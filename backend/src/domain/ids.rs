//! Strongly typed aggregate identifiers.
//!
//! Every aggregate is addressed by a UUID wrapped in its own newtype so a
//! tryout id can never be passed where a project id is expected. Identifiers
//! serialise as hyphenated UUID strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdValidationError {
    /// Input was empty.
    #[error("{kind} id must not be empty")]
    Empty { kind: &'static str },
    /// Input was not a UUID or carried surrounding whitespace.
    #[error("{kind} id must be a valid UUID")]
    Invalid { kind: &'static str },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                if raw.trim() != raw {
                    return Err(IdValidationError::Invalid { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::Invalid { kind: $kind })
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_id!(
    /// Identifier of an authenticated user.
    UserId => "user"
);
define_id!(
    /// Identifier of a [`crate::domain::Project`].
    ProjectId => "project"
);
define_id!(
    /// Identifier of a [`crate::domain::Tryout`].
    TryoutId => "tryout"
);
define_id!(
    /// Identifier of a [`crate::domain::Membership`].
    MemberId => "member"
);
define_id!(
    /// Identifier of a [`crate::domain::Comment`].
    CommentId => "comment"
);
define_id!(
    /// Identifier of a resume owned by the external resume service.
    ResumeId => "resume"
);

#[cfg(test)]
mod tests {
    //! Regression coverage for identifier parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_hyphenated_uuid() {
        let id = ProjectId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("", IdValidationError::Empty { kind: "tryout" })]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", IdValidationError::Invalid { kind: "tryout" })]
    #[case("not-a-uuid", IdValidationError::Invalid { kind: "tryout" })]
    fn rejects_malformed_input(#[case] raw: &str, #[case] expected: IdValidationError) {
        let err = TryoutId::new(raw).expect_err("malformed id");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn serialises_as_plain_string() {
        let id = UserId::random();
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
        let back: UserId = serde_json::from_value(value).expect("deserialise id");
        assert_eq!(back, id);
    }
}
