//! Tryouts: applications to join a project.
//!
//! A tryout snapshots the applicant's resume at application time so later
//! resume edits never rewrite history. Status starts at
//! [`TryoutStatus::InReview`] and moves to one of the terminal states when
//! the project owner decides.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ProjectId, ResumeId, ResumeSnapshot, TryoutId, UserId};

/// Review state of a tryout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TryoutStatus {
    /// Waiting for the project owner.
    InReview,
    /// The applicant joined the team.
    Accepted,
    /// The owner declined the application.
    Rejected,
}

impl TryoutStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InReview => "IN_REVIEW",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Whether the owner has already decided.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InReview)
    }
}

impl fmt::Display for TryoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tryout status: {0}")]
pub struct ParseTryoutStatusError(pub String);

impl FromStr for TryoutStatus {
    type Err = ParseTryoutStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN_REVIEW" => Ok(Self::InReview),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(ParseTryoutStatusError(s.to_owned())),
        }
    }
}

/// Validation errors raised by [`Tryout::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TryoutValidationError {
    /// Position name is blank after trimming.
    #[error("position name must not be empty")]
    EmptyPositionName,
}

/// Application of a resume to a project position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tryout {
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

impl Tryout {
    /// Create an in-review tryout from a resume snapshot.
    pub fn apply(
        project_id: ProjectId,
        resume: &ResumeSnapshot,
        position_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, TryoutValidationError> {
        let position_name = position_name.into();
        if position_name.trim().is_empty() {
            return Err(TryoutValidationError::EmptyPositionName);
        }
        Ok(Self {
            id: TryoutId::random(),
            project_id,
            applicant_id: resume.owner_id,
            resume_id: resume.id,
            applicant_name: resume.display_name.clone(),
            self_description: resume.self_description.clone(),
            position_name,
            status: TryoutStatus::InReview,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move to `status`, returning the previous value.
    pub fn transition(&mut self, status: TryoutStatus, now: DateTime<Utc>) -> TryoutStatus {
        let previous = self.status;
        self.status = status;
        self.updated_at = now;
        previous
    }
}
