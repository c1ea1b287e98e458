//! Project aggregate.
//!
//! A project owns its recruitments by value. Tryouts, memberships, and
//! comments reference it by [`ProjectId`] only, so each of them can be
//! cascaded away independently when the project is deleted.
//!
//! Once `completed` is set the membership roster is fixed by the completion
//! operation rather than by individual tryout acceptance.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ProjectId, StorageRef, UserId};

/// Validation errors raised while building project content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectValidationError {
    /// Title is blank after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// `end_date` falls before `start_date`.
    #[error("end date must not precede start date")]
    EndBeforeStart,
    /// A recruitment has a blank position name.
    #[error("recruitment {index} must name a position")]
    EmptyPositionName { index: usize },
    /// A recruitment asks for nobody.
    #[error("recruitment {index} must request at least one person")]
    ZeroHeadcount { index: usize },
}

/// A named open position with a target headcount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recruitment {
    pub position_name: String,
    pub requested_count: u32,
}

/// The owner-editable fields of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContent {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub thumbnail: Option<StorageRef>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<Recruitment>,
    pub description: String,
}

impl ProjectContent {
    /// Check title, date ordering, and recruitment shape.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        if self.end_date < self.start_date {
            return Err(ProjectValidationError::EndBeforeStart);
        }
        for (index, recruitment) in self.recruitments.iter().enumerate() {
            if recruitment.position_name.trim().is_empty() {
                return Err(ProjectValidationError::EmptyPositionName { index });
            }
            if recruitment.requested_count == 0 {
                return Err(ProjectValidationError::ZeroHeadcount { index });
            }
        }
        Ok(())
    }
}

/// Collaboration project published by its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub thumbnail: Option<StorageRef>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<Recruitment>,
    pub description: String,
    pub completed: bool,
    pub bookmarkers: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Publish a new, not yet completed project.
    pub fn new(
        owner_id: UserId,
        content: ProjectContent,
        now: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        content.validate()?;
        let ProjectContent {
            title,
            start_date,
            end_date,
            thumbnail,
            tech_stacks,
            recruitments,
            description,
        } = content;
        Ok(Self {
            id: ProjectId::random(),
            owner_id,
            title,
            start_date,
            end_date,
            thumbnail,
            tech_stacks,
            recruitments,
            description,
            completed: false,
            bookmarkers: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the editable fields.
    pub fn revise(
        &mut self,
        content: ProjectContent,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectValidationError> {
        content.validate()?;
        self.title = content.title;
        self.start_date = content.start_date;
        self.end_date = content.end_date;
        self.thumbnail = content.thumbnail;
        self.tech_stacks = content.tech_stacks;
        self.recruitments = content.recruitments;
        self.description = content.description;
        self.updated_at = now;
        Ok(())
    }

    /// Apply the final field values and mark the project completed.
    pub fn complete(
        &mut self,
        content: ProjectContent,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectValidationError> {
        self.revise(content, now)?;
        self.completed = true;
        Ok(())
    }

    /// Record a bookmark; returns `false` when it already existed.
    pub fn add_bookmark(&mut self, user_id: UserId) -> bool {
        self.bookmarkers.insert(user_id)
    }

    /// Drop a bookmark; returns `false` when none existed.
    pub fn remove_bookmark(&mut self, user_id: &UserId) -> bool {
        self.bookmarkers.remove(user_id)
    }

    /// Whether `user_id` bookmarked this project.
    pub fn is_bookmarked_by(&self, user_id: &UserId) -> bool {
        self.bookmarkers.contains(user_id)
    }
}
