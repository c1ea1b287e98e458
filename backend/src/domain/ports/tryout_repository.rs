//! Port for tryout persistence.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, Tryout, TryoutId, TryoutStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tryout repository adapters.
    pub enum TryoutRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tryout repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tryout repository query failed: {message}",
    }
}

/// Port for reading and writing [`Tryout`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryoutRepository: Send + Sync {
    /// Insert or replace a tryout.
    async fn save(&self, tryout: &Tryout) -> Result<(), TryoutRepositoryError>;

    /// Find a tryout by id.
    async fn find_by_id(&self, id: &TryoutId) -> Result<Option<Tryout>, TryoutRepositoryError>;

    /// Tryouts for a project in creation order, optionally filtered by status.
    async fn list_by_project(
        &self,
        project_id: &ProjectId,
        status: Option<TryoutStatus>,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError>;

    /// Tryouts submitted by `applicant` in creation order.
    async fn list_by_applicant(
        &self,
        applicant: &UserId,
        status: Option<TryoutStatus>,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError>;

    /// Remove a single tryout.
    async fn delete(&self, id: &TryoutId) -> Result<(), TryoutRepositoryError>;

    /// Remove every tryout of a project.
    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), TryoutRepositoryError>;
}

/// Fixture implementation for tests that do not exercise tryout storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTryoutRepository;

#[async_trait]
impl TryoutRepository for FixtureTryoutRepository {
    async fn save(&self, _tryout: &Tryout) -> Result<(), TryoutRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &TryoutId) -> Result<Option<Tryout>, TryoutRepositoryError> {
        Ok(None)
    }

    async fn list_by_project(
        &self,
        _project_id: &ProjectId,
        _status: Option<TryoutStatus>,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_applicant(
        &self,
        _applicant: &UserId,
        _status: Option<TryoutStatus>,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: &TryoutId) -> Result<(), TryoutRepositoryError> {
        Ok(())
    }

    async fn delete_by_project(
        &self,
        _project_id: &ProjectId,
    ) -> Result<(), TryoutRepositoryError> {
        Ok(())
    }
}

impl From<TryoutRepositoryError> for Error {
    fn from(err: TryoutRepositoryError) -> Self {
        match err {
            TryoutRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("tryout repository unavailable: {message}"))
            }
            TryoutRepositoryError::Query { message } => {
                Error::internal(format!("tryout repository error: {message}"))
            }
        }
    }
}
