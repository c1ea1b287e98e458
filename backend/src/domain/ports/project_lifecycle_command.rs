//! Driving port for project lifecycle mutations.
//!
//! Inbound adapters translate transport requests into the request types below
//! and call [`ProjectLifecycleCommand`]. Every request names the acting user;
//! ownership checks happen behind the port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::{
    Comment, CommentId, Error, MemberId, Project, ProjectContent, ProjectId, Recruitment,
    ResumeId, StorageRef, Tryout, TryoutId, TryoutStatus, UserId,
};

/// Identifies a project together with the user acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectAccess {
    pub user_id: UserId,
    pub project_id: ProjectId,
}

/// Request to publish a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub owner_id: UserId,
    pub content: ProjectContent,
}

/// Request to edit an existing project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    pub access: ProjectAccess,
    pub content: ProjectContent,
}

/// Request to mark a project completed and fix its final roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteProjectRequest {
    pub access: ProjectAccess,
    pub content: ProjectContent,
    /// One membership is created per resume, in this order.
    pub member_resume_ids: Vec<ResumeId>,
}

/// Request to apply to a project position with a resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyTryoutRequest {
    pub access: ProjectAccess,
    pub resume_id: ResumeId,
    pub position_name: String,
}

/// Request to accept or reject a tryout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecideTryoutRequest {
    pub access: ProjectAccess,
    pub tryout_id: TryoutId,
}

/// Request to remove a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveMemberRequest {
    pub access: ProjectAccess,
    pub member_id: MemberId,
}

/// Request to post a comment or a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommentRequest {
    pub access: ProjectAccess,
    pub parent_id: Option<CommentId>,
    pub content: String,
}

/// Request to delete a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommentRequest {
    pub user_id: UserId,
    pub comment_id: CommentId,
}

/// Project fields with a signed thumbnail link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub thumbnail: Option<StorageRef>,
    pub thumbnail_url: Option<Url>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<Recruitment>,
    pub description: String,
    pub completed: bool,
    pub bookmark_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectView {
    /// Build a view from a project and its already signed thumbnail link.
    pub fn new(project: Project, thumbnail_url: Option<Url>) -> Self {
        Self {
            bookmark_count: project.bookmarkers.len(),
            id: project.id,
            owner_id: project.owner_id,
            title: project.title,
            start_date: project.start_date,
            end_date: project.end_date,
            thumbnail: project.thumbnail,
            thumbnail_url,
            tech_stacks: project.tech_stacks,
            recruitments: project.recruitments,
            description: project.description,
            completed: project.completed,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Tryout as returned to the project owner or applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryoutView {
    pub id: TryoutId,
    pub project_id: ProjectId,
    pub applicant_id: UserId,
    pub resume_id: ResumeId,
    pub applicant_name: String,
    pub self_description: Option<String>,
    pub position_name: String,
    pub status: TryoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tryout> for TryoutView {
    fn from(value: Tryout) -> Self {
        Self {
            id: value.id,
            project_id: value.project_id,
            applicant_id: value.applicant_id,
            resume_id: value.resume_id,
            applicant_name: value.applicant_name,
            self_description: value.self_description,
            position_name: value.position_name,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// A single comment without author enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub id: CommentId,
    pub project_id: ProjectId,
    pub author_id: UserId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            project_id: value.project_id,
            author_id: value.author_id,
            parent_id: value.parent_id,
            content: value.content,
            deleted: value.deleted,
            created_at: value.created_at,
        }
    }
}

/// Domain use-case port for project lifecycle mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectLifecycleCommand: Send + Sync {
    /// Publish a project and seed its owner as the first member.
    async fn create_project(&self, request: CreateProjectRequest) -> Result<ProjectView, Error>;

    /// Edit a project owned by the acting user.
    async fn update_project(&self, request: UpdateProjectRequest) -> Result<ProjectView, Error>;

    /// Delete a project with its comments, tryouts, and memberships.
    async fn delete_project(&self, access: ProjectAccess) -> Result<(), Error>;

    /// Mark a project completed and replace its roster.
    async fn complete_project(
        &self,
        request: CompleteProjectRequest,
    ) -> Result<ProjectView, Error>;

    /// Apply to a project with one of the acting user's resumes.
    async fn apply_tryout(&self, request: ApplyTryoutRequest) -> Result<TryoutView, Error>;

    /// Accept a tryout, adding the applicant to the team.
    async fn accept_tryout(&self, request: DecideTryoutRequest) -> Result<TryoutView, Error>;

    /// Reject a tryout.
    async fn reject_tryout(&self, request: DecideTryoutRequest) -> Result<TryoutView, Error>;

    /// Remove a member, deleting the tryout they joined through.
    async fn remove_member(&self, request: RemoveMemberRequest) -> Result<(), Error>;

    /// Post a root comment or a reply.
    async fn post_comment(&self, request: PostCommentRequest) -> Result<CommentView, Error>;

    /// Soft-delete a comment authored by the acting user.
    async fn delete_comment(&self, request: DeleteCommentRequest) -> Result<CommentView, Error>;

    /// Bookmark a project for the acting user.
    async fn bookmark_project(&self, access: ProjectAccess) -> Result<(), Error>;

    /// Remove the acting user's bookmark.
    async fn unbookmark_project(&self, access: ProjectAccess) -> Result<(), Error>;
}
