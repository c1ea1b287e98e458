//! Driving port for project reads.
//!
//! Views returned here are enriched with display names and signed download
//! links so adapters never talk to the directory or the link signer.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{PageRequest, Slice};
use thiserror::Error as ThisError;
use url::Url;

use crate::domain::{
    CommentId, Error, MemberId, ProjectFilterType, ProjectId, Recruitment, UserId,
};

use super::{CommentView, ProjectAccess, ProjectView, TryoutView};

/// Owner block of a project detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerView {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar_url: Option<Url>,
}

/// Project detail for any viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetailView {
    pub project: ProjectView,
    pub owner: OwnerView,
    pub bookmarked: bool,
}

/// Compact member entry used in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBriefView {
    pub member_id: MemberId,
    pub user_id: UserId,
    pub user_name: String,
    pub avatar_url: Option<Url>,
    pub position_name: Option<String>,
}

/// Search result entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummaryView {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<Url>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<Recruitment>,
    pub completed: bool,
    pub bookmarked: bool,
    pub bookmark_count: usize,
    /// Populated only for completed projects.
    pub members: Vec<MemberBriefView>,
    pub created_at: DateTime<Utc>,
}

/// Criteria for [`ProjectLifecycleQuery::search_projects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProjectsRequest {
    pub viewer: UserId,
    pub completed: bool,
    pub filter_type: ProjectFilterType,
    pub filter_value: Option<String>,
    /// Only the viewer's own projects.
    pub mine: bool,
    pub page: PageRequest,
}

/// Which of the viewer's projects to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MyProjectsStatus {
    /// Projects the viewer owns.
    #[default]
    All,
    /// Open projects the viewer is a member of.
    InProgress,
    /// Open projects the viewer has a pending tryout for.
    InReview,
}

impl fmt::Display for MyProjectsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::InProgress => "in-progress",
            Self::InReview => "in-review",
        };
        f.write_str(label)
    }
}

/// Raised for unknown [`MyProjectsStatus`] strings.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("unknown project status filter: {0}")]
pub struct ParseMyProjectsStatusError(pub String);

impl FromStr for MyProjectsStatus {
    type Err = ParseMyProjectsStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "all" => Ok(Self::All),
            "in-progress" => Ok(Self::InProgress),
            "in-review" => Ok(Self::InReview),
            _ => Err(ParseMyProjectsStatusError(s.to_owned())),
        }
    }
}

/// Request for [`ProjectLifecycleQuery::list_my_projects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MyProjectsRequest {
    pub user_id: UserId,
    pub status: MyProjectsStatus,
    pub page: PageRequest,
}

/// Entry of the viewer's own project listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyProjectView {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<Url>,
    pub completed: bool,
    /// The viewer's position: membership position for in-progress, applied
    /// position for in-review.
    pub position_name: Option<String>,
    /// Other members; populated for in-progress listings.
    pub teammates: Vec<MemberBriefView>,
    pub created_at: DateTime<Utc>,
}

/// A comment with its author's display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNodeView {
    pub comment: CommentView,
    /// `None` when the directory no longer knows the author.
    pub author_name: Option<String>,
    pub author_avatar_url: Option<Url>,
}

impl CommentNodeView {
    /// Identifier of the wrapped comment.
    pub fn id(&self) -> CommentId {
        self.comment.id
    }
}

/// Root comment with its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThreadView {
    pub root: CommentNodeView,
    pub children: Vec<CommentNodeView>,
}

/// Domain use-case port for project reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectLifecycleQuery: Send + Sync {
    /// Project detail with owner profile and bookmark flag.
    async fn get_project(&self, access: ProjectAccess) -> Result<ProjectDetailView, Error>;

    /// Owner-only view of a project's completion fields.
    async fn get_completed_project(&self, access: ProjectAccess) -> Result<ProjectView, Error>;

    /// Every tryout of a project, for its owner.
    async fn list_tryouts(&self, access: ProjectAccess) -> Result<Vec<TryoutView>, Error>;

    /// Accepted tryouts of a project, most recently decided first.
    async fn list_accepted_tryouts(
        &self,
        access: ProjectAccess,
    ) -> Result<Vec<TryoutView>, Error>;

    /// Threaded comments of a project.
    async fn list_threaded_comments(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<CommentThreadView>, Error>;

    /// Search projects.
    async fn search_projects(
        &self,
        request: SearchProjectsRequest,
    ) -> Result<Slice<ProjectSummaryView>, Error>;

    /// List the viewer's projects.
    async fn list_my_projects(
        &self,
        request: MyProjectsRequest,
    ) -> Result<Slice<MyProjectView>, Error>;
}
