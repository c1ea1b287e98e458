//! Ownership checks guarding every mutation.
//!
//! The gate compares the owner recorded on an aggregate with the acting user
//! and fails with [`ErrorCode::Forbidden`](crate::domain::ErrorCode::Forbidden)
//! when they differ. The error carries the [`ForbiddenReason`] as a typed field
//! and renders it as `details.reason`; it never changes control flow.

use std::str::FromStr;

use crate::domain::{Error, UserId};

/// Call-site specific reason attached to ownership failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenReason {
    /// Editing someone else's project.
    ProjectUpdate,
    /// Deleting someone else's project.
    ProjectDelete,
    /// Completing, or reading the completion of, someone else's project.
    ProjectComplete,
    /// Listing or deciding tryouts of someone else's project.
    TryoutView,
    /// Removing a member from someone else's project.
    MemberModify,
    /// Deleting a comment written by someone else.
    CommentDelete,
    /// Applying with a resume owned by someone else.
    ResumeTryout,
}

impl FromStr for ForbiddenReason {
    type Err = String;

    /// Parse a wire code such as `project_delete_forbidden`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.code() == s)
            .ok_or_else(|| s.to_owned())
    }
}

impl ForbiddenReason {
    const ALL: [Self; 7] = [
        Self::ProjectUpdate,
        Self::ProjectDelete,
        Self::ProjectComplete,
        Self::TryoutView,
        Self::MemberModify,
        Self::CommentDelete,
        Self::ResumeTryout,
    ];

    /// Machine-readable reason code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::ProjectUpdate => "project_update_forbidden",
            Self::ProjectDelete => "project_delete_forbidden",
            Self::ProjectComplete => "project_complete_forbidden",
            Self::TryoutView => "project_tryout_view_forbidden",
            Self::MemberModify => "project_member_modify_forbidden",
            Self::CommentDelete => "project_comment_delete_forbidden",
            Self::ResumeTryout => "resume_tryout_forbidden",
        }
    }

    /// Human-readable message shared across adapters.
    pub const fn message(self) -> &'static str {
        match self {
            Self::ProjectUpdate => "only the project owner may update this project",
            Self::ProjectDelete => "only the project owner may delete this project",
            Self::ProjectComplete => "only the project owner may manage project completion",
            Self::TryoutView => "only the project owner may review tryouts",
            Self::MemberModify => "only the project owner may modify members",
            Self::CommentDelete => "only the author may delete this comment",
            Self::ResumeTryout => "a resume may only be used by its owner",
        }
    }

    /// Build the forbidden error carrying this reason.
    pub fn into_error(self) -> Error {
        Error::forbidden_because(self)
    }
}

/// Stateless ownership gate.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Fail with a forbidden error unless `acting` owns the resource.
    ///
    /// # Examples
    /// ```
    /// use project_hub::domain::{AuthorizationGate, ErrorCode, ForbiddenReason, UserId};
    ///
    /// let owner = UserId::random();
    /// assert!(AuthorizationGate::require_ownership(&owner, &owner, ForbiddenReason::ProjectUpdate).is_ok());
    ///
    /// let err = AuthorizationGate::require_ownership(
    ///     &owner,
    ///     &UserId::random(),
    ///     ForbiddenReason::ProjectDelete,
    /// )
    /// .expect_err("stranger rejected");
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn require_ownership(
        resource_owner: &UserId,
        acting: &UserId,
        reason: ForbiddenReason,
    ) -> Result<(), Error> {
        if resource_owner == acting {
            return Ok(());
        }
        tracing::debug!(
            owner = %resource_owner,
            acting = %acting,
            reason = reason.code(),
            "ownership check failed"
        );
        Err(reason.into_error())
    }
}
