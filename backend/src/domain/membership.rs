//! Project memberships.
//!
//! A membership records that a user belongs to a project team. It is created
//! in one of three ways: the owner is seeded when the project is published,
//! accepted tryouts are materialized, and completion replaces the roster
//! with members built from resumes.

use chrono::{DateTime, Utc};

use super::{
    MemberId, ProjectId, ResumeId, ResumeSnapshot, StorageRef, Tryout, TryoutId, UserId,
    UserProfile,
};

/// Team member of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: MemberId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    /// Set only for members materialized from an accepted tryout.
    pub tryout_id: Option<TryoutId>,
    pub resume_id: Option<ResumeId>,
    pub user_name: String,
    pub user_thumbnail: Option<StorageRef>,
    pub self_description: Option<String>,
    pub position_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Member materialized from an accepted tryout.
    pub fn from_tryout(tryout: &Tryout, now: DateTime<Utc>) -> Self {
        Self {
            id: MemberId::random(),
            project_id: tryout.project_id,
            user_id: tryout.applicant_id,
            tryout_id: Some(tryout.id),
            resume_id: Some(tryout.resume_id),
            user_name: tryout.applicant_name.clone(),
            user_thumbnail: None,
            self_description: tryout.self_description.clone(),
            position_name: Some(tryout.position_name.clone()),
            created_at: now,
        }
    }

    /// Owner seeded as the first member of a new project.
    pub fn for_owner(project_id: ProjectId, owner: &UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: MemberId::random(),
            project_id,
            user_id: owner.id,
            tryout_id: None,
            resume_id: None,
            user_name: owner.display_name.clone(),
            user_thumbnail: owner.profile_image.clone(),
            self_description: None,
            position_name: None,
            created_at: now,
        }
    }

    /// Member listed on a completed project, built from a resume.
    pub fn from_resume(project_id: ProjectId, resume: &ResumeSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            id: MemberId::random(),
            project_id,
            user_id: resume.owner_id,
            tryout_id: None,
            resume_id: Some(resume.id),
            user_name: resume.display_name.clone(),
            user_thumbnail: resume.profile_image.clone(),
            self_description: resume.self_description.clone(),
            position_name: None,
            created_at: now,
        }
    }
}
