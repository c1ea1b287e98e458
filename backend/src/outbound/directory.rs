//! In-process identity directory and resume lookup.
//!
//! Both adapters can be populated from a JSON seed file so the binary is
//! usable without the upstream identity and resume services:
//!
//! ```json
//! {
//!   "users": [{ "id": "…", "displayName": "Ada", "profileImage": "avatars/ada.png" }],
//!   "resumes": [{ "id": "…", "ownerId": "…", "displayName": "Ada", "selfDescription": "…" }]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{
    IdentityDirectory, IdentityDirectoryError, ResumeLookup, ResumeLookupError,
};
use crate::domain::{ResumeId, ResumeSnapshot, UserId, UserProfile};

/// Errors raised while loading a directory seed file.
#[derive(Debug, Error)]
pub enum DirectorySeedError {
    /// The seed file could not be read.
    #[error("failed to read directory seed at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The seed file is not valid JSON of the expected shape.
    #[error("failed to parse directory seed at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Users and resumes to preload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySeed {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub resumes: Vec<ResumeSnapshot>,
}

impl DirectorySeed {
    /// Read and parse a seed file.
    pub fn load(path: &Path) -> Result<Self, DirectorySeedError> {
        let read_error = |source| DirectorySeedError::Read {
            path: path.to_path_buf(),
            source,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "seed path must be a file",
            ))
        })?;

        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
        serde_json::from_slice(&payload).map_err(|source| DirectorySeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Identity directory holding profiles in memory.
#[derive(Debug, Default)]
pub struct InMemoryIdentityDirectory {
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryIdentityDirectory {
    /// Build a directory knowing `profiles`.
    pub fn new(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            users: RwLock::new(profiles.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Add or replace a profile.
    pub fn insert(&self, profile: UserProfile) -> Result<(), IdentityDirectoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| IdentityDirectoryError::lookup("directory lock poisoned"))?;
        users.insert(profile.id, profile);
        Ok(())
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserProfile>, IdentityDirectoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| IdentityDirectoryError::lookup("directory lock poisoned"))?;
        Ok(users.get(id).cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, IdentityDirectoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| IdentityDirectoryError::lookup("directory lock poisoned"))?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

/// Resume lookup holding snapshots in memory.
#[derive(Debug, Default)]
pub struct InMemoryResumeLookup {
    resumes: RwLock<HashMap<ResumeId, ResumeSnapshot>>,
}

impl InMemoryResumeLookup {
    /// Build a lookup knowing `resumes`.
    pub fn new(resumes: impl IntoIterator<Item = ResumeSnapshot>) -> Self {
        Self {
            resumes: RwLock::new(resumes.into_iter().map(|r| (r.id, r)).collect()),
        }
    }

    /// Add or replace a resume.
    pub fn insert(&self, resume: ResumeSnapshot) -> Result<(), ResumeLookupError> {
        let mut resumes = self
            .resumes
            .write()
            .map_err(|_| ResumeLookupError::lookup("resume lock poisoned"))?;
        resumes.insert(resume.id, resume);
        Ok(())
    }
}

#[async_trait]
impl ResumeLookup for InMemoryResumeLookup {
    async fn find_resume(
        &self,
        id: &ResumeId,
    ) -> Result<Option<ResumeSnapshot>, ResumeLookupError> {
        let resumes = self
            .resumes
            .read()
            .map_err(|_| ResumeLookupError::lookup("resume lock poisoned"))?;
        Ok(resumes.get(id).cloned())
    }

    async fn find_resumes(
        &self,
        ids: &[ResumeId],
    ) -> Result<Vec<ResumeSnapshot>, ResumeLookupError> {
        let resumes = self
            .resumes
            .read()
            .map_err(|_| ResumeLookupError::lookup("resume lock poisoned"))?;
        Ok(ids.iter().filter_map(|id| resumes.get(id).cloned()).collect())
    }
}
