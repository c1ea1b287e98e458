//! Download link signer for a static file host.
//!
//! Links are the storage key joined onto a base URL with an `expires` query
//! parameter (Unix seconds). The file host is expected to refuse requests past
//! that instant.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::StorageRef;
use crate::domain::ports::{BlobLinkSigner, BlobLinkSignerError};

/// Signs storage references as expiring links under a base URL.
#[derive(Debug, Clone)]
pub struct PresignedLinkSigner {
    base: Url,
    ttl: Duration,
}

impl PresignedLinkSigner {
    /// Create a signer. `base` should end with `/` so keys nest beneath it.
    pub fn new(base: Url, ttl: Duration) -> Self {
        Self { base, ttl }
    }

    fn link(&self, key: &StorageRef, now: DateTime<Utc>) -> Result<Url, BlobLinkSignerError> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|err| BlobLinkSignerError::signing(key.as_str(), err.to_string()))?;
        let mut url = self
            .base
            .join(key.as_str().trim_start_matches('/'))
            .map_err(|err| BlobLinkSignerError::signing(key.as_str(), err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("expires", &(now + ttl).timestamp().to_string());
        Ok(url)
    }
}

#[async_trait]
impl BlobLinkSigner for PresignedLinkSigner {
    async fn sign(&self, key: &StorageRef) -> Result<Url, BlobLinkSignerError> {
        self.link(key, Utc::now())
    }

    async fn sign_many(
        &self,
        keys: &[StorageRef],
    ) -> Result<HashMap<StorageRef, Url>, BlobLinkSignerError> {
        let now = Utc::now();
        keys.iter()
            .map(|key| self.link(key, now).map(|url| (key.clone(), url)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn signer() -> PresignedLinkSigner {
        PresignedLinkSigner::new(
            Url::parse("http://files.local/files/").expect("base url"),
            Duration::from_secs(60),
        )
    }

    #[rstest]
    fn link_nests_key_and_sets_expiry(signer: PresignedLinkSigner) {
        let now = Utc::now();
        let key = StorageRef::new("/thumbnails/p1.png").expect("key");
        let url = signer.link(&key, now).expect("signed");

        assert_eq!(url.path(), "/files/thumbnails/p1.png");
        let expires: i64 = url
            .query_pairs()
            .find(|(name, _)| name == "expires")
            .map(|(_, value)| value.parse().expect("numeric"))
            .expect("expires present");
        assert_eq!(expires, now.timestamp() + 60);
    }

    #[rstest]
    #[tokio::test]
    async fn sign_many_covers_every_key(signer: PresignedLinkSigner) {
        let keys = vec![
            StorageRef::new("a.png").expect("key"),
            StorageRef::new("b.png").expect("key"),
        ];
        let links = signer.sign_many(&keys).await.expect("signed");
        assert_eq!(links.len(), 2);
        assert!(links[&keys[0]].as_str().starts_with("http://files.local/files/a.png?expires="));
    }
}
