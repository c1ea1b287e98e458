//! Tryout HTTP handlers.
//!
//! ```text
//! POST  /api/v1/projects/{project_id}/tryouts
//! GET   /api/v1/projects/{project_id}/tryouts
//! GET   /api/v1/projects/{project_id}/tryouts/accepted
//! PATCH /api/v1/projects/{project_id}/tryouts/{tryout_id}/accept
//! PATCH /api/v1/projects/{project_id}/tryouts/{tryout_id}/reject
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ApplyTryoutRequest, DecideTryoutRequest, TryoutView};
use crate::domain::{Error, ResumeId, TryoutId, TryoutStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::acting_user::ActingUser;
use crate::inbound::http::projects::project_access;
use crate::inbound::http::schemas::{ErrorSchema, TryoutStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Application to a recruited position.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTryoutBody {
    #[schema(format = "uuid")]
    pub resume_id: String,
    pub position_name: String,
}

/// Tryout as seen by the owner or the applicant.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TryoutBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub project_id: String,
    #[schema(format = "uuid")]
    pub applicant_id: String,
    #[schema(format = "uuid")]
    pub resume_id: String,
    pub applicant_name: String,
    pub self_description: Option<String>,
    pub position_name: String,
    #[schema(value_type = TryoutStatusSchema)]
    pub status: TryoutStatus,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<TryoutView> for TryoutBody {
    fn from(value: TryoutView) -> Self {
        Self {
            id: value.id.to_string(),
            project_id: value.project_id.to_string(),
            applicant_id: value.applicant_id.to_string(),
            resume_id: value.resume_id.to_string(),
            applicant_name: value.applicant_name,
            self_description: value.self_description,
            position_name: value.position_name,
            status: value.status,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn decide_request(
    user: ActingUser,
    (project_id, tryout_id): (String, String),
) -> Result<DecideTryoutRequest, Error> {
    Ok(DecideTryoutRequest {
        access: project_access(user, &project_id)?,
        tryout_id: parse_id(&tryout_id, FieldName::new("tryoutId"), TryoutId::new)?,
    })
}

fn into_bodies(views: Vec<TryoutView>) -> Vec<TryoutBody> {
    views.into_iter().map(TryoutBody::from).collect()
}

/// Apply to a project with one of the acting user's resumes.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/tryouts",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = ApplyTryoutBody,
    responses(
        (status = 201, description = "Tryout created", body = TryoutBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Resume belongs to someone else", body = ErrorSchema),
        (status = 404, description = "Project or resume not found", body = ErrorSchema)
    ),
    tags = ["tryouts"],
    operation_id = "applyTryout"
)]
#[post("/projects/{project_id}/tryouts")]
pub async fn apply_tryout(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
    payload: web::Json<ApplyTryoutBody>,
) -> ApiResult<HttpResponse> {
    let access = project_access(user, &path)?;
    let ApplyTryoutBody {
        resume_id,
        position_name,
    } = payload.into_inner();
    let request = ApplyTryoutRequest {
        access,
        resume_id: parse_id(&resume_id, FieldName::new("resumeId"), ResumeId::new)?,
        position_name,
    };
    let view = state.projects.apply_tryout(request).await?;
    Ok(HttpResponse::Created().json(TryoutBody::from(view)))
}

/// Every tryout of a project, for its owner.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tryouts",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Tryouts in application order", body = [TryoutBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["tryouts"],
    operation_id = "listTryouts"
)]
#[get("/projects/{project_id}/tryouts")]
pub async fn list_tryouts(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TryoutBody>>> {
    let access = project_access(user, &path)?;
    let views = state.projects_query.list_tryouts(access).await?;
    Ok(web::Json(into_bodies(views)))
}

/// Accepted tryouts, most recently decided first.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tryouts/accepted",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Accepted tryouts", body = [TryoutBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["tryouts"],
    operation_id = "listAcceptedTryouts"
)]
#[get("/projects/{project_id}/tryouts/accepted")]
pub async fn list_accepted_tryouts(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TryoutBody>>> {
    let access = project_access(user, &path)?;
    let views = state.projects_query.list_accepted_tryouts(access).await?;
    Ok(web::Json(into_bodies(views)))
}

/// Accept a tryout, adding the applicant to the team.
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{project_id}/tryouts/{tryout_id}/accept",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("tryout_id" = String, Path, description = "Tryout identifier")
    ),
    responses(
        (status = 200, description = "Tryout accepted", body = TryoutBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project or tryout not found", body = ErrorSchema)
    ),
    tags = ["tryouts"],
    operation_id = "acceptTryout"
)]
#[patch("/projects/{project_id}/tryouts/{tryout_id}/accept")]
pub async fn accept_tryout(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<TryoutBody>> {
    let request = decide_request(user, path.into_inner())?;
    let view = state.projects.accept_tryout(request).await?;
    Ok(web::Json(view.into()))
}

/// Reject a tryout.
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{project_id}/tryouts/{tryout_id}/reject",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("tryout_id" = String, Path, description = "Tryout identifier")
    ),
    responses(
        (status = 200, description = "Tryout rejected", body = TryoutBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project or tryout not found", body = ErrorSchema)
    ),
    tags = ["tryouts"],
    operation_id = "rejectTryout"
)]
#[patch("/projects/{project_id}/tryouts/{tryout_id}/reject")]
pub async fn reject_tryout(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<TryoutBody>> {
    let request = decide_request(user, path.into_inner())?;
    let view = state.projects.reject_tryout(request).await?;
    Ok(web::Json(view.into()))
}

#[cfg(test)]
#[path = "tryouts_tests.rs"]
mod tests;
