//! Builders shared by the domain service tests.

use chrono::{Duration, Utc};

use crate::domain::{
    Comment, Project, ProjectContent, ProjectId, Recruitment, ResumeId, ResumeSnapshot, Tryout,
    UserId, UserProfile,
};

pub(crate) fn content(title: &str) -> ProjectContent {
    let start = Utc::now();
    ProjectContent {
        title: title.to_owned(),
        start_date: start,
        end_date: start + Duration::days(14),
        thumbnail: None,
        tech_stacks: vec!["Rust".to_owned()],
        recruitments: vec![Recruitment {
            position_name: "Backend".to_owned(),
            requested_count: 1,
        }],
        description: "weekend hack".to_owned(),
    }
}

pub(crate) fn project_owned_by(owner: UserId) -> Project {
    Project::new(owner, content("Trail mapper"), Utc::now()).expect("valid project")
}

pub(crate) fn profile(id: UserId) -> UserProfile {
    UserProfile {
        id,
        display_name: format!("user-{id}"),
        profile_image: None,
    }
}

pub(crate) fn resume_owned_by(owner: UserId) -> ResumeSnapshot {
    ResumeSnapshot {
        id: ResumeId::random(),
        owner_id: owner,
        display_name: "Applicant".to_owned(),
        self_description: Some("likes borrow checkers".to_owned()),
        profile_image: None,
    }
}

pub(crate) fn tryout_for(project_id: ProjectId, applicant: UserId) -> Tryout {
    Tryout::apply(
        project_id,
        &resume_owned_by(applicant),
        "Backend",
        Utc::now(),
    )
    .expect("valid tryout")
}

pub(crate) fn comment_on(project_id: ProjectId, author: UserId) -> Comment {
    Comment::new(project_id, author, None, "first!", Utc::now()).expect("valid comment")
}
