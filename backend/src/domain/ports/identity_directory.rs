//! Port for looking up user profiles held by the identity service.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity directory adapters.
    pub enum IdentityDirectoryError {
        /// The directory could not be reached.
        Unavailable { message: String } =>
            "identity directory unavailable: {message}",
        /// The directory answered with something unusable.
        Lookup { message: String } =>
            "identity directory lookup failed: {message}",
    }
}

/// Read-only access to user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Find a single user.
    async fn find_user(&self, id: &UserId) -> Result<Option<UserProfile>, IdentityDirectoryError>;

    /// Find every known user among `ids`; unknown ids are skipped.
    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, IdentityDirectoryError>;
}

/// Fixture directory that knows every user as "Ada Lovelace".
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityDirectory;

impl FixtureIdentityDirectory {
    fn profile(id: UserId) -> UserProfile {
        UserProfile {
            id,
            display_name: "Ada Lovelace".to_owned(),
            profile_image: None,
        }
    }
}

#[async_trait]
impl IdentityDirectory for FixtureIdentityDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserProfile>, IdentityDirectoryError> {
        Ok(Some(Self::profile(*id)))
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, IdentityDirectoryError> {
        Ok(ids.iter().copied().map(Self::profile).collect())
    }
}

impl From<IdentityDirectoryError> for Error {
    fn from(err: IdentityDirectoryError) -> Self {
        match err {
            IdentityDirectoryError::Unavailable { message } => {
                Error::service_unavailable(format!("identity directory unavailable: {message}"))
            }
            IdentityDirectoryError::Lookup { message } => {
                Error::internal(format!("identity directory error: {message}"))
            }
        }
    }
}
