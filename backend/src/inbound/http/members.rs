//! Team member HTTP handlers.
//!
//! ```text
//! DELETE /api/v1/projects/{project_id}/members/{member_id}
//! ```

use actix_web::{HttpResponse, delete, web};

use crate::domain::MemberId;
use crate::domain::ports::RemoveMemberRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::acting_user::ActingUser;
use crate::inbound::http::projects::project_access;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Remove a member; the tryout they joined through is deleted with them.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/members/{member_id}",
    params(
        ("project_id" = String, Path, description = "Project identifier"),
        ("member_id" = String, Path, description = "Membership identifier")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project or member not found", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "removeMember"
)]
#[delete("/projects/{project_id}/members/{member_id}")]
pub async fn remove_member(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (project_id, member_id) = path.into_inner();
    let request = RemoveMemberRequest {
        access: project_access(user, &project_id)?,
        member_id: parse_id(&member_id, FieldName::new("memberId"), MemberId::new)?,
    };
    state.projects.remove_member(request).await?;
    Ok(HttpResponse::NoContent().finish())
}
