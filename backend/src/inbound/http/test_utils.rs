//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::Method;
use actix_web::{App, test, web};
use chrono::Utc;

use crate::domain::ports::{MockProjectLifecycleCommand, MockProjectLifecycleQuery, ProjectView};
use crate::domain::{ProjectId, UserId};
use crate::inbound::http::acting_user::USER_ID_HEADER;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// User id sent by [`user_request`].
pub(crate) const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

pub(crate) fn acting_user_id() -> UserId {
    UserId::new(USER).expect("fixture user id")
}

/// Wrap mocks in handler state.
pub(crate) fn state_with(
    command: MockProjectLifecycleCommand,
    query: MockProjectLifecycleQuery,
) -> HttpState {
    HttpState::new(HttpStatePorts {
        projects: Arc::new(command),
        projects_query: Arc::new(query),
    })
}

/// A request carrying the fixture user's header.
pub(crate) fn user_request(method: Method, uri: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header((USER_ID_HEADER, USER))
}

/// Serve a single request through the full `/api/v1` scope.
pub(crate) async fn call(state: HttpState, request: test::TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await;
    test::call_service(&app, request.to_request()).await
}

/// A minimal open project view owned by `owner`.
pub(crate) fn project_view(owner: UserId) -> ProjectView {
    let now = Utc::now();
    ProjectView {
        id: ProjectId::random(),
        owner_id: owner,
        title: "Hub".to_owned(),
        start_date: now,
        end_date: now,
        thumbnail: None,
        thumbnail_url: None,
        tech_stacks: vec!["Rust".to_owned()],
        recruitments: Vec::new(),
        description: String::new(),
        completed: false,
        bookmark_count: 0,
        created_at: now,
        updated_at: now,
    }
}
