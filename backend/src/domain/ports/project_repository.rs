//! Port for project persistence and filtered listings.

use async_trait::async_trait;
use pagination::{PageRequest, Slice};

use crate::domain::{Error, Project, ProjectId, ProjectSearchFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "project repository query failed: {message}",
    }
}

/// Port for reading and writing [`Project`] aggregates.
///
/// Every listing returns a [`Slice`] ordered newest first by creation time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert or replace a project.
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Find a project by id.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Remove a project. Deleting an absent project is not an error.
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectRepositoryError>;

    /// List projects matching `filter`.
    async fn search(
        &self,
        filter: &ProjectSearchFilter,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError>;

    /// List projects owned by `owner`.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError>;

    /// List the projects among `ids` whose completion flag equals `completed`.
    async fn list_by_ids(
        &self,
        ids: &[ProjectId],
        completed: bool,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError>;
}

/// Fixture implementation for tests that do not exercise project storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn save(&self, _project: &Project) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &ProjectId) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn search(
        &self,
        _filter: &ProjectSearchFilter,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        Ok(Slice::empty(page))
    }

    async fn list_by_owner(
        &self,
        _owner: &UserId,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        Ok(Slice::empty(page))
    }

    async fn list_by_ids(
        &self,
        _ids: &[ProjectId],
        _completed: bool,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        Ok(Slice::empty(page))
    }
}

impl From<ProjectRepositoryError> for Error {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("project repository unavailable: {message}"))
            }
            ProjectRepositoryError::Query { message } => {
                Error::internal(format!("project repository error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_search_returns_empty_slice() {
        let repo = FixtureProjectRepository;
        let slice = repo
            .search(&ProjectSearchFilter::default(), PageRequest::default())
            .await
            .expect("fixture search succeeds");
        assert!(slice.content().is_empty());
        assert!(!slice.has_next());
    }

    #[rstest]
    #[case(ProjectRepositoryError::connection("pool closed"), ErrorCode::ServiceUnavailable)]
    #[case(ProjectRepositoryError::query("bad filter"), ErrorCode::InternalError)]
    fn maps_to_domain_error(#[case] err: ProjectRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(Error::from(err).code(), code);
    }
}
