//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed entities for the project marketplace and
//! the services enforcing its lifecycle rules. Adapters reach the domain only
//! through the driving ports in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - Project, Tryout, Membership, Comment: independent aggregates related by
//!   project id.
//! - ProjectLifecycleService: orchestrator implementing the driving ports.

pub mod authorization;
pub mod comment;
pub mod comment_thread_manager;
pub mod error;
pub mod ids;
pub mod membership;
pub mod membership_manager;
pub mod notification;
pub mod ports;
pub mod profile;
pub mod project;
pub mod project_lifecycle;
pub mod project_search;
pub mod tryout;
pub mod tryout_state_machine;

#[cfg(test)]
mod service_test_helpers;

pub use self::authorization::{AuthorizationGate, ForbiddenReason};
pub use self::comment::{Comment, CommentThread, CommentValidationError, assemble_threads};
pub use self::comment_thread_manager::CommentThreadManager;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    CommentId, IdValidationError, MemberId, ProjectId, ResumeId, TryoutId, UserId,
};
pub use self::membership::Membership;
pub use self::membership_manager::MembershipManager;
pub use self::notification::{NotificationEvent, NotificationKind};
pub use self::profile::{ResumeSnapshot, StorageRef, StorageRefValidationError, UserProfile};
pub use self::project::{Project, ProjectContent, ProjectValidationError, Recruitment};
pub use self::project_lifecycle::{LifecyclePorts, ProjectLifecycleService};
pub use self::project_search::{
    ParseProjectFilterTypeError, ProjectFilterType, ProjectSearchFilter,
};
pub use self::tryout::{ParseTryoutStatusError, Tryout, TryoutStatus, TryoutValidationError};
pub use self::tryout_state_machine::TryoutStateMachine;
