//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (stores and external collaborators) expose strongly typed
//! error enums that convert into [`crate::domain::Error`]. Driving ports are
//! the use-case traits consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod blob_link_signer;
mod comment_repository;
mod identity_directory;
mod member_repository;
mod notification_sink;
mod project_lifecycle_command;
mod project_lifecycle_query;
mod project_repository;
mod resume_lookup;
mod tryout_repository;

#[cfg(test)]
pub use blob_link_signer::MockBlobLinkSigner;
pub use blob_link_signer::{BlobLinkSigner, BlobLinkSignerError, FixtureBlobLinkSigner};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError, FixtureCommentRepository};
#[cfg(test)]
pub use identity_directory::MockIdentityDirectory;
pub use identity_directory::{FixtureIdentityDirectory, IdentityDirectory, IdentityDirectoryError};
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{FixtureMemberRepository, MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{FixtureNotificationSink, NotificationSink, NotificationSinkError};
#[cfg(test)]
pub use project_lifecycle_command::MockProjectLifecycleCommand;
pub use project_lifecycle_command::{
    ApplyTryoutRequest, CommentView, CompleteProjectRequest, CreateProjectRequest,
    DecideTryoutRequest, DeleteCommentRequest, PostCommentRequest, ProjectAccess,
    ProjectLifecycleCommand, ProjectView, RemoveMemberRequest, TryoutView, UpdateProjectRequest,
};
#[cfg(test)]
pub use project_lifecycle_query::MockProjectLifecycleQuery;
pub use project_lifecycle_query::{
    CommentNodeView, CommentThreadView, MemberBriefView, MyProjectView, MyProjectsRequest,
    MyProjectsStatus, OwnerView, ParseMyProjectsStatusError, ProjectDetailView,
    ProjectLifecycleQuery, ProjectSummaryView, SearchProjectsRequest,
};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{FixtureProjectRepository, ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use resume_lookup::MockResumeLookup;
pub use resume_lookup::{FixtureResumeLookup, ResumeLookup, ResumeLookupError};
#[cfg(test)]
pub use tryout_repository::MockTryoutRepository;
pub use tryout_repository::{FixtureTryoutRepository, TryoutRepository, TryoutRepositoryError};
