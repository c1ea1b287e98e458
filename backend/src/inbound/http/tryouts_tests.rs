//! Tests for tryout HTTP handlers.

use super::*;
use crate::domain::ports::{MockProjectLifecycleCommand, MockProjectLifecycleQuery};
use crate::domain::{ProjectId, UserId};
use crate::inbound::http::test_utils::{acting_user_id, call, state_with, user_request};
use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use chrono::{Duration, Utc};
use rstest::rstest;
use serde_json::{Value, json};

fn tryout_view(project_id: ProjectId, status: TryoutStatus) -> TryoutView {
    let now = Utc::now();
    TryoutView {
        id: TryoutId::random(),
        project_id,
        applicant_id: UserId::random(),
        resume_id: ResumeId::random(),
        applicant_name: "Grace".to_owned(),
        self_description: Some("compilers".to_owned()),
        position_name: "Backend".to_owned(),
        status,
        created_at: now - Duration::hours(1),
        updated_at: now,
    }
}

#[rstest]
#[actix_web::test]
async fn apply_creates_tryout_in_review() {
    let project_id = ProjectId::random();
    let resume_id = ResumeId::random();
    let mut command = MockProjectLifecycleCommand::new();
    command
        .expect_apply_tryout()
        .withf(move |request| {
            request.access.user_id == acting_user_id()
                && request.access.project_id == project_id
                && request.resume_id == resume_id
                && request.position_name == "Backend"
        })
        .times(1)
        .returning(move |request| {
            let mut view = tryout_view(project_id, TryoutStatus::InReview);
            view.resume_id = request.resume_id;
            Ok(view)
        });

    let res = call(
        state_with(command, MockProjectLifecycleQuery::new()),
        user_request(Method::POST, &format!("/api/v1/projects/{project_id}/tryouts"))
            .set_json(json!({"resumeId": resume_id.to_string(), "positionName": "Backend"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], json!("IN_REVIEW"));
    assert_eq!(body["resumeId"], json!(resume_id.to_string()));
    assert_eq!(body["selfDescription"], json!("compilers"));
}

#[rstest]
#[actix_web::test]
async fn apply_rejects_malformed_resume_id() {
    let res = call(
        state_with(MockProjectLifecycleCommand::new(), MockProjectLifecycleQuery::new()),
        user_request(
            Method::POST,
            &format!("/api/v1/projects/{}/tryouts", ProjectId::random()),
        )
        .set_json(json!({"resumeId": "r-1", "positionName": "Backend"})),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("accept", TryoutStatus::Accepted)]
#[case("reject", TryoutStatus::Rejected)]
#[actix_web::test]
async fn decisions_route_to_matching_command(#[case] verb: &str, #[case] status: TryoutStatus) {
    let project_id = ProjectId::random();
    let tryout_id = TryoutId::random();
    let mut command = MockProjectLifecycleCommand::new();
    command
        .expect_accept_tryout()
        .withf(move |request| request.tryout_id == tryout_id)
        .returning(move |_| Ok(tryout_view(project_id, TryoutStatus::Accepted)));
    command
        .expect_reject_tryout()
        .withf(move |request| request.tryout_id == tryout_id)
        .returning(move |_| Ok(tryout_view(project_id, TryoutStatus::Rejected)));

    let res = call(
        state_with(command, MockProjectLifecycleQuery::new()),
        user_request(
            Method::PATCH,
            &format!("/api/v1/projects/{project_id}/tryouts/{tryout_id}/{verb}"),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], json!(status.as_str()));
}

#[rstest]
#[actix_web::test]
async fn accepted_listing_is_not_read_as_tryout_id() {
    let project_id = ProjectId::random();
    let mut query = MockProjectLifecycleQuery::new();
    query
        .expect_list_accepted_tryouts()
        .times(1)
        .returning(move |_| Ok(vec![tryout_view(project_id, TryoutStatus::Accepted)]));

    let res = call(
        state_with(MockProjectLifecycleCommand::new(), query),
        user_request(
            Method::GET,
            &format!("/api/v1/projects/{project_id}/tryouts/accepted"),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn stranger_listing_is_forbidden() {
    let mut query = MockProjectLifecycleQuery::new();
    query
        .expect_list_tryouts()
        .returning(|_| Err(crate::domain::ForbiddenReason::TryoutView.into_error()));

    let res = call(
        state_with(MockProjectLifecycleCommand::new(), query),
        user_request(
            Method::GET,
            &format!("/api/v1/projects/{}/tryouts", ProjectId::random()),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(
        body.details().and_then(|d| d.get("reason")),
        Some(&json!("project_tryout_view_forbidden"))
    );
}
