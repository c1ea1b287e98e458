//! Read models supplied by external collaborators.
//!
//! User profiles come from the identity directory and resume snapshots from
//! the resume service. Binary assets are referenced by opaque
//! [`StorageRef`] keys that the link signer turns into download URLs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ResumeId, UserId};

/// Validation errors raised by [`StorageRef::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageRefValidationError {
    /// Key is blank after trimming.
    #[error("storage reference must not be empty")]
    Empty,
}

/// Opaque key of a stored binary object (thumbnails, avatars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageRef(String);

impl StorageRef {
    /// Validate and construct a storage reference.
    ///
    /// # Examples
    /// ```
    /// use project_hub::domain::StorageRef;
    ///
    /// let key = StorageRef::new("thumbnails/p1.png").expect("valid key");
    /// assert_eq!(key.as_str(), "thumbnails/p1.png");
    /// assert!(StorageRef::new("  ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, StorageRefValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(StorageRefValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StorageRef> for String {
    fn from(value: StorageRef) -> Self {
        value.0
    }
}

impl TryFrom<String> for StorageRef {
    type Error = StorageRefValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public profile of a user as reported by the identity directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub profile_image: Option<StorageRef>,
}

/// Immutable copy of a resume taken when it is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSnapshot {
    pub id: ResumeId,
    pub owner_id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub self_description: Option<String>,
    #[serde(default)]
    pub profile_image: Option<StorageRef>,
}
