//! Port for project comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Error, ProjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
    }
}

/// Port for reading and writing [`Comment`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert or replace a comment.
    async fn save(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    /// Find a comment by id, including soft-deleted ones.
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Every comment of a project in creation order.
    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Hard-delete every comment of a project.
    async fn delete_by_project(&self, project_id: &ProjectId)
    -> Result<(), CommentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise comment storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn save(&self, _comment: &Comment) -> Result<(), CommentRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(None)
    }

    async fn list_by_project(
        &self,
        _project_id: &ProjectId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_by_project(
        &self,
        _project_id: &ProjectId,
    ) -> Result<(), CommentRepositoryError> {
        Ok(())
    }
}

impl From<CommentRepositoryError> for Error {
    fn from(err: CommentRepositoryError) -> Self {
        match err {
            CommentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("comment repository unavailable: {message}"))
            }
            CommentRepositoryError::Query { message } => {
                Error::internal(format!("comment repository error: {message}"))
            }
        }
    }
}
