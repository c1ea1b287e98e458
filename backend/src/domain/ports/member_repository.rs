//! Port for project membership persistence.

use async_trait::async_trait;

use crate::domain::{Error, MemberId, Membership, ProjectId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "member repository query failed: {message}",
    }
}

/// Port for reading and writing [`Membership`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert or replace a membership.
    async fn save(&self, member: &Membership) -> Result<(), MemberRepositoryError>;

    /// Find a membership by id.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Membership>, MemberRepositoryError>;

    /// Memberships of any of `project_ids`, in creation order.
    async fn list_by_project_ids(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<Membership>, MemberRepositoryError>;

    /// Memberships held by `user_id`, in creation order.
    async fn list_by_user(&self, user_id: &UserId)
    -> Result<Vec<Membership>, MemberRepositoryError>;

    /// Remove a single membership.
    async fn delete(&self, id: &MemberId) -> Result<(), MemberRepositoryError>;

    /// Remove every membership of a project.
    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), MemberRepositoryError>;

    /// Atomically supersede the project's memberships with `members`.
    async fn replace_for_project(
        &self,
        project_id: &ProjectId,
        members: Vec<Membership>,
    ) -> Result<(), MemberRepositoryError>;
}

/// Fixture implementation for tests that do not exercise membership storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMemberRepository;

#[async_trait]
impl MemberRepository for FixtureMemberRepository {
    async fn save(&self, _member: &Membership) -> Result<(), MemberRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _id: &MemberId,
    ) -> Result<Option<Membership>, MemberRepositoryError> {
        Ok(None)
    }

    async fn list_by_project_ids(
        &self,
        _project_ids: &[ProjectId],
    ) -> Result<Vec<Membership>, MemberRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Membership>, MemberRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _id: &MemberId) -> Result<(), MemberRepositoryError> {
        Ok(())
    }

    async fn delete_by_project(
        &self,
        _project_id: &ProjectId,
    ) -> Result<(), MemberRepositoryError> {
        Ok(())
    }

    async fn replace_for_project(
        &self,
        _project_id: &ProjectId,
        _members: Vec<Membership>,
    ) -> Result<(), MemberRepositoryError> {
        Ok(())
    }
}

impl From<MemberRepositoryError> for Error {
    fn from(err: MemberRepositoryError) -> Self {
        match err {
            MemberRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("member repository unavailable: {message}"))
            }
            MemberRepositoryError::Query { message } => {
                Error::internal(format!("member repository error: {message}"))
            }
        }
    }
}
