//! Port for turning storage references into temporary download links.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use crate::domain::{Error, StorageRef};

use super::define_port_error;

define_port_error! {
    /// Errors raised by link signer adapters.
    pub enum BlobLinkSignerError {
        /// The signing backend could not be reached.
        Unavailable { message: String } =>
            "link signer unavailable: {message}",
        /// The reference could not be turned into a link.
        Signing { key: String, message: String } =>
            "failed to sign {key}: {message}",
    }
}

/// Produces time-limited download URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobLinkSigner: Send + Sync {
    /// Sign a single reference.
    async fn sign(&self, key: &StorageRef) -> Result<Url, BlobLinkSignerError>;

    /// Sign many references at once.
    async fn sign_many(
        &self,
        keys: &[StorageRef],
    ) -> Result<HashMap<StorageRef, Url>, BlobLinkSignerError>;
}

/// Fixture signer producing stable, unsigned links under `fixture.invalid`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBlobLinkSigner;

impl FixtureBlobLinkSigner {
    fn link(key: &StorageRef) -> Result<Url, BlobLinkSignerError> {
        Url::parse("https://fixture.invalid/")
            .and_then(|base| base.join(key.as_str()))
            .map_err(|err| BlobLinkSignerError::signing(key.as_str(), err.to_string()))
    }
}

#[async_trait]
impl BlobLinkSigner for FixtureBlobLinkSigner {
    async fn sign(&self, key: &StorageRef) -> Result<Url, BlobLinkSignerError> {
        Self::link(key)
    }

    async fn sign_many(
        &self,
        keys: &[StorageRef],
    ) -> Result<HashMap<StorageRef, Url>, BlobLinkSignerError> {
        keys.iter()
            .map(|key| Self::link(key).map(|url| (key.clone(), url)))
            .collect()
    }
}

impl From<BlobLinkSignerError> for Error {
    fn from(err: BlobLinkSignerError) -> Self {
        match err {
            BlobLinkSignerError::Unavailable { message } => {
                Error::service_unavailable(format!("link signer unavailable: {message}"))
            }
            BlobLinkSignerError::Signing { key, message } => {
                Error::internal(format!("failed to sign {key}: {message}"))
            }
        }
    }
}
