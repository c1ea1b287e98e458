//! Tests for comment HTTP handlers.

use super::*;
use crate::domain::ports::{MockProjectLifecycleCommand, MockProjectLifecycleQuery};
use crate::domain::{Error, ErrorCode, ForbiddenReason, UserId};
use crate::inbound::http::test_utils::{acting_user_id, call, state_with, user_request};
use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

fn comment_view(project_id: ProjectId, parent_id: Option<CommentId>) -> CommentView {
    CommentView {
        id: CommentId::random(),
        project_id,
        author_id: UserId::random(),
        parent_id,
        content: "looks great".to_owned(),
        deleted: false,
        created_at: Utc::now(),
    }
}

#[rstest]
#[actix_web::test]
async fn reply_forwards_parent() {
    let project_id = ProjectId::random();
    let parent = CommentId::random();
    let mut command = MockProjectLifecycleCommand::new();
    command
        .expect_post_comment()
        .withf(move |request| {
            request.parent_id == Some(parent)
                && request.access.user_id == acting_user_id()
                && request.content == "looks great"
        })
        .times(1)
        .returning(move |request| Ok(comment_view(project_id, request.parent_id)));

    let res = call(
        state_with(command, MockProjectLifecycleQuery::new()),
        user_request(Method::POST, &format!("/api/v1/projects/{project_id}/comments"))
            .set_json(json!({"parentId": parent.to_string(), "content": "looks great"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["parentId"], json!(parent.to_string()));
}

#[rstest]
#[actix_web::test]
async fn nested_reply_is_bad_request() {
    let mut command = MockProjectLifecycleCommand::new();
    command
        .expect_post_comment()
        .returning(|_| Err(Error::invalid_request("replies may only target root comments")));

    let res = call(
        state_with(command, MockProjectLifecycleQuery::new()),
        user_request(
            Method::POST,
            &format!("/api/v1/projects/{}/comments", ProjectId::random()),
        )
        .set_json(json!({"parentId": CommentId::random().to_string(), "content": "hi"})),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn threads_flatten_comment_fields() {
    let project_id = ProjectId::random();
    let mut query = MockProjectLifecycleQuery::new();
    query
        .expect_list_threaded_comments()
        .withf(move |id| *id == project_id)
        .times(1)
        .returning(move |_| {
            let root = comment_view(project_id, None);
            let reply = comment_view(project_id, Some(root.id));
            Ok(vec![CommentThreadView {
                root: CommentNodeView {
                    comment: root,
                    author_name: Some("Ada".to_owned()),
                    author_avatar_url: None,
                },
                children: vec![CommentNodeView {
                    comment: reply,
                    author_name: None,
                    author_avatar_url: None,
                }],
            }])
        });

    let res = call(
        state_with(MockProjectLifecycleCommand::new(), query),
        user_request(Method::GET, &format!("/api/v1/projects/{project_id}/comments")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["root"]["authorName"], json!("Ada"));
    assert_eq!(body[0]["root"]["content"], json!("looks great"));
    assert_eq!(body[0]["children"][0]["authorName"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn delete_by_non_author_is_forbidden() {
    let comment_id = CommentId::random();
    let mut command = MockProjectLifecycleCommand::new();
    command
        .expect_delete_comment()
        .withf(move |request| request.comment_id == comment_id)
        .returning(|_| Err(ForbiddenReason::CommentDelete.into_error()));

    let res = call(
        state_with(command, MockProjectLifecycleQuery::new()),
        user_request(Method::DELETE, &format!("/api/v1/comments/{comment_id}")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::Forbidden);
}

#[rstest]
#[actix_web::test]
async fn delete_returns_cleared_comment() {
    let project_id = ProjectId::random();
    let mut command = MockProjectLifecycleCommand::new();
    command.expect_delete_comment().returning(move |request| {
        let mut view = comment_view(project_id, None);
        view.id = request.comment_id;
        view.content.clear();
        view.deleted = true;
        Ok(view)
    });

    let res = call(
        state_with(command, MockProjectLifecycleQuery::new()),
        user_request(Method::DELETE, &format!("/api/v1/comments/{}", CommentId::random())),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["deleted"], json!(true));
    assert_eq!(body["content"], json!(""));
}
