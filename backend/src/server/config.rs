//! Server settings loaded via OrthoConfig.
//!
//! Values come from `PROJECT_HUB_*` environment variables, an optional
//! configuration file, or command-line flags. Every field is optional; the
//! accessors below supply the defaults.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LINK_BASE_URL: &str = "http://localhost:9000/files/";
const DEFAULT_LINK_TTL_SECS: u64 = 900;
const DEFAULT_NOTIFICATION_BUFFER: usize = 256;

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid link base URL {value:?}: {source}")]
    LinkBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Configuration for the HTTP server and its in-process adapters.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROJECT_HUB")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Base URL that storage keys are joined onto when signing links.
    pub link_base_url: Option<String>,
    /// Lifetime of signed links in seconds.
    pub link_ttl_secs: Option<u64>,
    /// JSON file with users and resumes to preload.
    pub directory_seed_path: Option<String>,
    /// Capacity of the notification channel.
    pub notification_buffer: Option<usize>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn link_base_url(&self) -> Result<Url, SettingsError> {
        let value = self.link_base_url.as_deref().unwrap_or(DEFAULT_LINK_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::LinkBaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    pub fn link_ttl(&self) -> Duration {
        Duration::from_secs(self.link_ttl_secs.unwrap_or(DEFAULT_LINK_TTL_SECS))
    }

    pub fn directory_seed_path(&self) -> Option<&Path> {
        self.directory_seed_path.as_deref().map(Path::new)
    }

    pub fn notification_buffer(&self) -> usize {
        self.notification_buffer.unwrap_or(DEFAULT_NOTIFICATION_BUFFER)
    }
}
