//! Tests for the project lifecycle orchestrator.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::Sequence;
use pagination::{PageRequest, Slice};
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    ApplyTryoutRequest, CompleteProjectRequest, CreateProjectRequest, FixtureBlobLinkSigner,
    FixtureNotificationSink, MemberRepositoryError, MockCommentRepository,
    MockIdentityDirectory, MockMemberRepository, MockProjectRepository, MockResumeLookup,
    MockTryoutRepository, MyProjectsRequest, MyProjectsStatus, ProjectAccess,
    ProjectLifecycleCommand, ProjectLifecycleQuery, RemoveMemberRequest, SearchProjectsRequest,
};
use crate::domain::service_test_helpers::{
    comment_on, content, profile, project_owned_by, resume_owned_by, tryout_for,
};
use crate::domain::{
    Comment, ErrorCode, MemberId, Membership, ProjectFilterType, ResumeId, TryoutStatus,
};

struct Harness {
    projects: MockProjectRepository,
    tryouts: MockTryoutRepository,
    members: MockMemberRepository,
    comments: MockCommentRepository,
    identities: MockIdentityDirectory,
    resumes: MockResumeLookup,
}

impl Harness {
    fn new() -> Self {
        Self {
            projects: MockProjectRepository::new(),
            tryouts: MockTryoutRepository::new(),
            members: MockMemberRepository::new(),
            comments: MockCommentRepository::new(),
            identities: MockIdentityDirectory::new(),
            resumes: MockResumeLookup::new(),
        }
    }

    fn with_project(mut self, project: Project) -> Self {
        self.projects
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(project)));
        self
    }

    fn build(self) -> ProjectLifecycleService {
        ProjectLifecycleService::new(LifecyclePorts {
            projects: Arc::new(self.projects),
            tryouts: Arc::new(self.tryouts),
            members: Arc::new(self.members),
            comments: Arc::new(self.comments),
            identities: Arc::new(self.identities),
            resumes: Arc::new(self.resumes),
            links: Arc::new(FixtureBlobLinkSigner),
            notifications: Arc::new(FixtureNotificationSink),
        })
    }
}

fn access(project: &Project, user_id: UserId) -> ProjectAccess {
    ProjectAccess {
        user_id,
        project_id: project.id,
    }
}

fn storage(key: &str) -> StorageRef {
    StorageRef::new(key).expect("valid key")
}

#[tokio::test]
async fn create_project_seeds_owner_membership() {
    let owner = UserId::random();
    let mut harness = Harness::new();
    harness
        .identities
        .expect_find_user()
        .return_once(move |id| Ok(Some(profile(*id))));
    harness.projects.expect_save().times(1).return_once(|_| Ok(()));
    harness
        .members
        .expect_save()
        .withf(move |m| m.user_id == owner && m.tryout_id.is_none())
        .times(1)
        .return_once(|_| Ok(()));

    let view = harness
        .build()
        .create_project(CreateProjectRequest {
            owner_id: owner,
            content: content("Trail mapper"),
        })
        .await
        .expect("create succeeds");

    assert_eq!(view.owner_id, owner);
    assert!(!view.completed);
    assert_eq!(view.bookmark_count, 0);
}

#[tokio::test]
async fn create_project_discards_project_when_owner_seed_fails() {
    let mut seq = Sequence::new();
    let mut harness = Harness::new();
    harness
        .identities
        .expect_find_user()
        .return_once(move |id| Ok(Some(profile(*id))));
    harness
        .projects
        .expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    harness
        .members
        .expect_save()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Err(MemberRepositoryError::connection("pool exhausted")));
    harness
        .projects
        .expect_delete()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));

    let err = harness
        .build()
        .create_project(CreateProjectRequest {
            owner_id: UserId::random(),
            content: content("Trail mapper"),
        })
        .await
        .expect_err("seed failure surfaces");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn create_project_for_unknown_owner_is_not_found() {
    let mut harness = Harness::new();
    harness
        .identities
        .expect_find_user()
        .return_once(|_| Ok(None));
    harness.projects.expect_save().times(0);

    let err = harness
        .build()
        .create_project(CreateProjectRequest {
            owner_id: UserId::random(),
            content: content("Trail mapper"),
        })
        .await
        .expect_err("unknown owner");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_project_rejects_blank_title() {
    let mut harness = Harness::new();
    harness
        .identities
        .expect_find_user()
        .return_once(move |id| Ok(Some(profile(*id))));
    harness.projects.expect_save().times(0);

    let err = harness
        .build()
        .create_project(CreateProjectRequest {
            owner_id: UserId::random(),
            content: content("   "),
        })
        .await
        .expect_err("blank title");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn delete_project_cascades_in_order() {
    let owner = UserId::random();
    let project = project_owned_by(owner);
    let project_id = project.id;
    let request = access(&project, owner);

    let mut seq = Sequence::new();
    let mut harness = Harness::new().with_project(project);
    harness
        .comments
        .expect_delete_by_project()
        .withf(move |id| *id == project_id)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    harness
        .members
        .expect_delete_by_project()
        .withf(move |id| *id == project_id)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    harness
        .tryouts
        .expect_delete_by_project()
        .withf(move |id| *id == project_id)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    harness
        .projects
        .expect_delete()
        .withf(move |id| *id == project_id)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));

    harness
        .build()
        .delete_project(request)
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn stranger_cannot_delete_project() {
    let project = project_owned_by(UserId::random());
    let request = access(&project, UserId::random());
    let mut harness = Harness::new().with_project(project);
    harness.comments.expect_delete_by_project().times(0);
    harness.projects.expect_delete().times(0);

    let err = harness
        .build()
        .delete_project(request)
        .await
        .expect_err("stranger rejected");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(
        err.details().expect("reason")["reason"],
        "project_delete_forbidden"
    );
}

#[tokio::test]
async fn complete_project_replaces_roster() {
    let owner = UserId::random();
    let project = project_owned_by(owner);
    let request = access(&project, owner);
    let resume = resume_owned_by(UserId::random());
    let resume_id = resume.id;

    let mut harness = Harness::new().with_project(project);
    harness
        .projects
        .expect_save()
        .withf(|p| p.completed)
        .times(1)
        .return_once(|_| Ok(()));
    harness
        .resumes
        .expect_find_resumes()
        .return_once(move |_| Ok(vec![resume]));
    harness
        .members
        .expect_replace_for_project()
        .withf(|_, members| members.len() == 1)
        .times(1)
        .return_once(|_, _| Ok(()));

    let view = harness
        .build()
        .complete_project(CompleteProjectRequest {
            access: request,
            content: content("Trail mapper v2"),
            member_resume_ids: vec![resume_id],
        })
        .await
        .expect("complete succeeds");
    assert!(view.completed);
    assert_eq!(view.title, "Trail mapper v2");
}

#[tokio::test]
async fn complete_project_restores_snapshot_when_roster_swap_fails() {
    let owner = UserId::random();
    let project = project_owned_by(owner);
    let request = access(&project, owner);

    let mut seq = Sequence::new();
    let mut harness = Harness::new().with_project(project);
    harness
        .projects
        .expect_save()
        .withf(|p| p.completed)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    harness
        .resumes
        .expect_find_resumes()
        .return_once(|_| Ok(Vec::new()));
    harness.members.expect_replace_for_project().times(0);
    harness
        .projects
        .expect_save()
        .withf(|p| !p.completed && p.title == "Trail mapper")
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));

    let err = harness
        .build()
        .complete_project(CompleteProjectRequest {
            access: request,
            content: content("Trail mapper v2"),
            member_resume_ids: vec![ResumeId::random()],
        })
        .await
        .expect_err("missing resume");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn stranger_cannot_complete_project() {
    let project = project_owned_by(UserId::random());
    let request = access(&project, UserId::random());
    let mut harness = Harness::new().with_project(project);
    harness.projects.expect_save().times(0);

    let err = harness
        .build()
        .complete_project(CompleteProjectRequest {
            access: request,
            content: content("Trail mapper"),
            member_resume_ids: Vec::new(),
        })
        .await
        .expect_err("stranger rejected");
    assert_eq!(
        err.details().expect("reason")["reason"],
        "project_complete_forbidden"
    );
}

#[tokio::test]
async fn apply_with_unknown_resume_is_not_found() {
    let project = project_owned_by(UserId::random());
    let request = access(&project, UserId::random());
    let mut harness = Harness::new();
    harness.resumes.expect_find_resume().return_once(|_| Ok(None));
    harness.tryouts.expect_save().times(0);

    let err = harness
        .build()
        .apply_tryout(ApplyTryoutRequest {
            access: request,
            resume_id: ResumeId::random(),
            position_name: "Backend".to_owned(),
        })
        .await
        .expect_err("unknown resume");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn stranger_cannot_remove_member() {
    let project = project_owned_by(UserId::random());
    let request = RemoveMemberRequest {
        access: access(&project, UserId::random()),
        member_id: MemberId::random(),
    };
    let mut harness = Harness::new().with_project(project);
    harness.members.expect_delete().times(0);

    let err = harness
        .build()
        .remove_member(request)
        .await
        .expect_err("stranger rejected");
    assert_eq!(
        err.details().expect("reason")["reason"],
        "project_member_modify_forbidden"
    );
}

#[rstest]
#[case(false, 1)]
#[case(true, 0)]
#[tokio::test]
async fn bookmark_saves_only_on_change(#[case] already: bool, #[case] saves: usize) {
    let viewer = UserId::random();
    let mut project = project_owned_by(UserId::random());
    if already {
        project.add_bookmark(viewer);
    }
    let request = access(&project, viewer);
    let mut harness = Harness::new().with_project(project);
    harness
        .projects
        .expect_save()
        .withf(move |p| p.is_bookmarked_by(&viewer))
        .times(saves)
        .returning(|_| Ok(()));

    harness
        .build()
        .bookmark_project(request)
        .await
        .expect("bookmark succeeds");
}

#[tokio::test]
async fn unbookmark_removes_viewer() {
    let viewer = UserId::random();
    let mut project = project_owned_by(UserId::random());
    project.add_bookmark(viewer);
    let request = access(&project, viewer);
    let mut harness = Harness::new().with_project(project);
    harness
        .projects
        .expect_save()
        .withf(move |p| !p.is_bookmarked_by(&viewer))
        .times(1)
        .return_once(|_| Ok(()));

    harness
        .build()
        .unbookmark_project(request)
        .await
        .expect("unbookmark succeeds");
}

#[tokio::test]
async fn project_detail_signs_thumbnail_and_owner_avatar() {
    let owner = UserId::random();
    let viewer = UserId::random();
    let mut project = project_owned_by(owner);
    project.thumbnail = Some(storage("thumbnails/p.png"));
    project.add_bookmark(viewer);
    let request = access(&project, viewer);

    let mut harness = Harness::new().with_project(project);
    harness.identities.expect_find_user().return_once(move |id| {
        let mut owner_profile = profile(*id);
        owner_profile.profile_image = Some(storage("avatars/owner.png"));
        Ok(Some(owner_profile))
    });

    let detail = harness
        .build()
        .get_project(request)
        .await
        .expect("detail succeeds");

    assert!(detail.bookmarked);
    assert_eq!(detail.owner.user_id, owner);
    assert_eq!(
        detail.project.thumbnail_url.expect("thumbnail").as_str(),
        "https://fixture.invalid/thumbnails/p.png"
    );
    assert_eq!(
        detail.owner.avatar_url.expect("avatar").as_str(),
        "https://fixture.invalid/avatars/owner.png"
    );
}

#[tokio::test]
async fn accepted_tryouts_are_listed_most_recent_first() {
    let owner = UserId::random();
    let project = project_owned_by(owner);
    let request = access(&project, owner);
    let now = Utc::now();
    let mut older = tryout_for(project.id, UserId::random());
    older.transition(TryoutStatus::Accepted, now - Duration::hours(2));
    let mut newer = tryout_for(project.id, UserId::random());
    newer.transition(TryoutStatus::Accepted, now);
    let expected = vec![newer.id, older.id];

    let mut harness = Harness::new().with_project(project);
    harness
        .tryouts
        .expect_list_by_project()
        .withf(|_, status| *status == Some(TryoutStatus::Accepted))
        .return_once(move |_, _| Ok(vec![older, newer]));

    let tryouts = harness
        .build()
        .list_accepted_tryouts(request)
        .await
        .expect("list succeeds");
    let ids: Vec<_> = tryouts.iter().map(|t| t.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn stranger_cannot_list_tryouts() {
    let project = project_owned_by(UserId::random());
    let request = access(&project, UserId::random());
    let mut harness = Harness::new().with_project(project);
    harness.tryouts.expect_list_by_project().times(0);

    let err = harness
        .build()
        .list_tryouts(request)
        .await
        .expect_err("stranger rejected");
    assert_eq!(
        err.details().expect("reason")["reason"],
        "project_tryout_view_forbidden"
    );
}

#[tokio::test]
async fn threaded_comments_carry_author_names() {
    let project = project_owned_by(UserId::random());
    let project_id = project.id;
    let known = UserId::random();
    let root = comment_on(project_id, known);
    let reply = Comment::new(
        project_id,
        UserId::random(),
        Some(root.id),
        "reply",
        root.created_at + Duration::seconds(1),
    )
    .expect("valid reply");
    let stored = vec![root, reply];

    let mut harness = Harness::new().with_project(project);
    harness
        .comments
        .expect_list_by_project()
        .return_once(move |_| Ok(stored));
    harness
        .identities
        .expect_find_users()
        .return_once(move |_| Ok(vec![profile(known)]));

    let threads = harness
        .build()
        .list_threaded_comments(project_id)
        .await
        .expect("list succeeds");

    assert_eq!(threads.len(), 1);
    assert_eq!(
        threads[0].root.author_name.as_deref(),
        Some(format!("user-{known}").as_str())
    );
    assert_eq!(threads[0].children.len(), 1);
    assert!(threads[0].children[0].author_name.is_none());
}

#[tokio::test]
async fn search_includes_roster_for_completed_projects() {
    let viewer = UserId::random();
    let mut project = project_owned_by(UserId::random());
    project.completed = true;
    let project_id = project.id;
    let mut member = Membership::from_resume(project_id, &resume_owned_by(viewer), Utc::now());
    member.user_thumbnail = Some(storage("avatars/m.png"));

    let mut harness = Harness::new();
    harness
        .projects
        .expect_search()
        .withf(move |filter, _| filter.completed && filter.owner.is_none())
        .return_once(move |_, page| Ok(Slice::new(vec![project], page, false)));
    harness
        .members
        .expect_list_by_project_ids()
        .withf(move |ids| ids == [project_id])
        .return_once(move |_| Ok(vec![member]));

    let slice = harness
        .build()
        .search_projects(SearchProjectsRequest {
            viewer,
            completed: true,
            filter_type: ProjectFilterType::All,
            filter_value: None,
            mine: false,
            page: PageRequest::default(),
        })
        .await
        .expect("search succeeds");

    let summary = &slice.content()[0];
    assert_eq!(summary.members.len(), 1);
    assert_eq!(
        summary.members[0]
            .avatar_url
            .as_ref()
            .expect("avatar")
            .as_str(),
        "https://fixture.invalid/avatars/m.png"
    );
}

#[tokio::test]
async fn search_of_open_projects_skips_roster_lookup() {
    let project = project_owned_by(UserId::random());
    let viewer = project.owner_id;

    let mut harness = Harness::new();
    harness
        .projects
        .expect_search()
        .withf(move |filter, _| filter.owner == Some(viewer))
        .return_once(move |_, page| Ok(Slice::new(vec![project], page, true)));
    harness.members.expect_list_by_project_ids().times(0);

    let slice = harness
        .build()
        .search_projects(SearchProjectsRequest {
            viewer,
            completed: false,
            filter_type: ProjectFilterType::Title,
            filter_value: Some("trail".to_owned()),
            mine: true,
            page: PageRequest::default(),
        })
        .await
        .expect("search succeeds");
    assert!(slice.has_next());
    assert!(slice.content()[0].members.is_empty());
}

#[tokio::test]
async fn in_progress_lists_position_and_teammates() {
    let viewer = UserId::random();
    let owner = UserId::random();
    let project = project_owned_by(owner);
    let project_id = project.id;
    let tryout = tryout_for(project_id, viewer);
    let mine = Membership::from_tryout(&tryout, Utc::now());
    let owner_member = Membership::for_owner(project_id, &profile(owner), Utc::now());
    let roster = vec![mine.clone(), owner_member];

    let mut harness = Harness::new();
    harness
        .members
        .expect_list_by_user()
        .return_once(move |_| Ok(vec![mine]));
    harness
        .projects
        .expect_list_by_ids()
        .withf(move |ids, completed, _| ids == [project_id] && !completed)
        .return_once(move |_, _, page| Ok(Slice::new(vec![project], page, false)));
    harness
        .members
        .expect_list_by_project_ids()
        .return_once(move |_| Ok(roster));

    let slice = harness
        .build()
        .list_my_projects(MyProjectsRequest {
            user_id: viewer,
            status: MyProjectsStatus::InProgress,
            page: PageRequest::default(),
        })
        .await
        .expect("list succeeds");

    let entry = &slice.content()[0];
    assert_eq!(entry.position_name.as_deref(), Some("Backend"));
    assert_eq!(entry.teammates.len(), 1);
    assert_eq!(entry.teammates[0].user_id, owner);
}

#[tokio::test]
async fn in_review_lists_applied_position() {
    let viewer = UserId::random();
    let project = project_owned_by(UserId::random());
    let tryout = tryout_for(project.id, viewer);

    let mut harness = Harness::new();
    harness
        .tryouts
        .expect_list_by_applicant()
        .withf(|_, status| *status == Some(TryoutStatus::InReview))
        .return_once(move |_, _| Ok(vec![tryout]));
    harness
        .projects
        .expect_list_by_ids()
        .return_once(move |_, _, page| Ok(Slice::new(vec![project], page, false)));

    let slice = harness
        .build()
        .list_my_projects(MyProjectsRequest {
            user_id: viewer,
            status: MyProjectsStatus::InReview,
            page: PageRequest::default(),
        })
        .await
        .expect("list succeeds");
    assert_eq!(slice.content()[0].position_name.as_deref(), Some("Backend"));
    assert!(slice.content()[0].teammates.is_empty());
}
