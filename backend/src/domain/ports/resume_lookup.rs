//! Port for reading resume snapshots from the resume service.

use async_trait::async_trait;

use crate::domain::{Error, ResumeId, ResumeSnapshot};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resume lookup adapters.
    pub enum ResumeLookupError {
        /// The resume service could not be reached.
        Unavailable { message: String } =>
            "resume service unavailable: {message}",
        /// The resume service answered with something unusable.
        Lookup { message: String } =>
            "resume lookup failed: {message}",
    }
}

/// Read-only access to resumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeLookup: Send + Sync {
    /// Find a single resume.
    async fn find_resume(&self, id: &ResumeId) -> Result<Option<ResumeSnapshot>, ResumeLookupError>;

    /// Find every known resume among `ids`, in the order requested. Unknown
    /// ids are skipped.
    async fn find_resumes(&self, ids: &[ResumeId]) -> Result<Vec<ResumeSnapshot>, ResumeLookupError>;
}

/// Fixture lookup that knows no resumes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResumeLookup;

#[async_trait]
impl ResumeLookup for FixtureResumeLookup {
    async fn find_resume(
        &self,
        _id: &ResumeId,
    ) -> Result<Option<ResumeSnapshot>, ResumeLookupError> {
        Ok(None)
    }

    async fn find_resumes(
        &self,
        _ids: &[ResumeId],
    ) -> Result<Vec<ResumeSnapshot>, ResumeLookupError> {
        Ok(Vec::new())
    }
}

impl From<ResumeLookupError> for Error {
    fn from(err: ResumeLookupError) -> Self {
        match err {
            ResumeLookupError::Unavailable { message } => {
                Error::service_unavailable(format!("resume service unavailable: {message}"))
            }
            ResumeLookupError::Lookup { message } => {
                Error::internal(format!("resume lookup error: {message}"))
            }
        }
    }
}
