//! Project HTTP handlers.
//!
//! ```text
//! POST   /api/v1/projects
//! GET    /api/v1/projects
//! GET    /api/v1/projects/mine
//! GET    /api/v1/projects/{project_id}
//! PUT    /api/v1/projects/{project_id}
//! DELETE /api/v1/projects/{project_id}
//! GET    /api/v1/projects/{project_id}/complete
//! PUT    /api/v1/projects/{project_id}/complete
//! PUT    /api/v1/projects/{project_id}/bookmark
//! DELETE /api/v1/projects/{project_id}/bookmark
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Slice;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CompleteProjectRequest, CreateProjectRequest, MemberBriefView, MyProjectView,
    MyProjectsRequest, MyProjectsStatus, OwnerView, ProjectAccess, ProjectDetailView,
    ProjectSummaryView, ProjectView, SearchProjectsRequest, UpdateProjectRequest,
};
use crate::domain::{
    Error, ProjectContent, ProjectFilterType, ProjectId, Recruitment, ResumeId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::acting_user::ActingUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, parse_id, parse_id_list, parse_optional_storage_ref,
    parse_page, parse_rfc3339_timestamp,
};

/// Resolve the `{project_id}` path segment for the acting user.
pub(crate) fn project_access(user: ActingUser, raw: &str) -> Result<ProjectAccess, Error> {
    Ok(ProjectAccess {
        user_id: user.user_id(),
        project_id: parse_id(raw, FieldName::new("projectId"), ProjectId::new)?,
    })
}

/// One recruited position.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentBody {
    pub position_name: String,
    pub requested_count: u32,
}

impl From<RecruitmentBody> for Recruitment {
    fn from(value: RecruitmentBody) -> Self {
        Self {
            position_name: value.position_name,
            requested_count: value.requested_count,
        }
    }
}

impl From<Recruitment> for RecruitmentBody {
    fn from(value: Recruitment) -> Self {
        Self {
            position_name: value.position_name,
            requested_count: value.requested_count,
        }
    }
}

/// Owner-editable project fields.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContentBody {
    pub title: String,
    #[schema(format = "date-time")]
    pub start_date: String,
    #[schema(format = "date-time")]
    pub end_date: String,
    /// Storage key of an uploaded thumbnail.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tech_stacks: Vec<String>,
    #[serde(default)]
    pub recruitments: Vec<RecruitmentBody>,
    #[serde(default)]
    pub description: String,
}

fn parse_content(body: ProjectContentBody) -> Result<ProjectContent, Error> {
    Ok(ProjectContent {
        title: body.title,
        start_date: parse_rfc3339_timestamp(&body.start_date, FieldName::new("startDate"))?,
        end_date: parse_rfc3339_timestamp(&body.end_date, FieldName::new("endDate"))?,
        thumbnail: parse_optional_storage_ref(body.thumbnail, FieldName::new("thumbnail"))?,
        tech_stacks: body.tech_stacks,
        recruitments: body.recruitments.into_iter().map(Recruitment::from).collect(),
        description: body.description,
    })
}

/// Completion payload: final content plus the resumes forming the roster.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProjectBody {
    #[serde(flatten)]
    pub content: ProjectContentBody,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub member_resume_ids: Vec<String>,
}

/// Project as returned by mutations and the completion view.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub title: String,
    #[schema(format = "date-time")]
    pub start_date: String,
    #[schema(format = "date-time")]
    pub end_date: String,
    pub thumbnail: Option<String>,
    #[schema(format = "uri")]
    pub thumbnail_url: Option<String>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<RecruitmentBody>,
    pub description: String,
    pub completed: bool,
    pub bookmark_count: usize,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<ProjectView> for ProjectBody {
    fn from(value: ProjectView) -> Self {
        Self {
            id: value.id.to_string(),
            owner_id: value.owner_id.to_string(),
            title: value.title,
            start_date: value.start_date.to_rfc3339(),
            end_date: value.end_date.to_rfc3339(),
            thumbnail: value.thumbnail.map(String::from),
            thumbnail_url: value.thumbnail_url.map(String::from),
            tech_stacks: value.tech_stacks,
            recruitments: value.recruitments.into_iter().map(RecruitmentBody::from).collect(),
            description: value.description,
            completed: value.completed,
            bookmark_count: value.bookmark_count,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Owner block of a project detail.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    pub display_name: String,
    #[schema(format = "uri")]
    pub avatar_url: Option<String>,
}

impl From<OwnerView> for OwnerBody {
    fn from(value: OwnerView) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            display_name: value.display_name,
            avatar_url: value.avatar_url.map(String::from),
        }
    }
}

/// Project detail for any viewer.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailBody {
    pub project: ProjectBody,
    pub owner: OwnerBody,
    pub bookmarked: bool,
}

impl From<ProjectDetailView> for ProjectDetailBody {
    fn from(value: ProjectDetailView) -> Self {
        Self {
            project: value.project.into(),
            owner: value.owner.into(),
            bookmarked: value.bookmarked,
        }
    }
}

/// Compact member entry used in listings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberBriefBody {
    #[schema(format = "uuid")]
    pub member_id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub user_name: String,
    #[schema(format = "uri")]
    pub avatar_url: Option<String>,
    pub position_name: Option<String>,
}

impl From<MemberBriefView> for MemberBriefBody {
    fn from(value: MemberBriefView) -> Self {
        Self {
            member_id: value.member_id.to_string(),
            user_id: value.user_id.to_string(),
            user_name: value.user_name,
            avatar_url: value.avatar_url.map(String::from),
            position_name: value.position_name,
        }
    }
}

/// Search result entry.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub owner_id: String,
    pub title: String,
    pub description: String,
    #[schema(format = "uri")]
    pub thumbnail_url: Option<String>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<RecruitmentBody>,
    pub completed: bool,
    pub bookmarked: bool,
    pub bookmark_count: usize,
    /// Present for completed projects only.
    pub members: Vec<MemberBriefBody>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<ProjectSummaryView> for ProjectSummaryBody {
    fn from(value: ProjectSummaryView) -> Self {
        Self {
            id: value.id.to_string(),
            owner_id: value.owner_id.to_string(),
            title: value.title,
            description: value.description,
            thumbnail_url: value.thumbnail_url.map(String::from),
            tech_stacks: value.tech_stacks,
            recruitments: value.recruitments.into_iter().map(RecruitmentBody::from).collect(),
            completed: value.completed,
            bookmarked: value.bookmarked,
            bookmark_count: value.bookmark_count,
            members: value.members.into_iter().map(MemberBriefBody::from).collect(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Entry of the viewer's own project listings.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyProjectBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[schema(format = "uri")]
    pub thumbnail_url: Option<String>,
    pub completed: bool,
    pub position_name: Option<String>,
    pub teammates: Vec<MemberBriefBody>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<MyProjectView> for MyProjectBody {
    fn from(value: MyProjectView) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            thumbnail_url: value.thumbnail_url.map(String::from),
            completed: value.completed,
            position_name: value.position_name,
            teammates: value.teammates.into_iter().map(MemberBriefBody::from).collect(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// A page of search results.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummarySliceBody {
    pub content: Vec<ProjectSummaryBody>,
    pub page: u32,
    pub size: u32,
    pub has_next: bool,
}

impl From<Slice<ProjectSummaryView>> for ProjectSummarySliceBody {
    fn from(value: Slice<ProjectSummaryView>) -> Self {
        let page = value.page();
        let has_next = value.has_next();
        Self {
            content: value.into_content().into_iter().map(Into::into).collect(),
            page: page.page(),
            size: page.size(),
            has_next,
        }
    }
}

/// A page of the viewer's projects.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyProjectSliceBody {
    pub content: Vec<MyProjectBody>,
    pub page: u32,
    pub size: u32,
    pub has_next: bool,
}

impl From<Slice<MyProjectView>> for MyProjectSliceBody {
    fn from(value: Slice<MyProjectView>) -> Self {
        let page = value.page();
        let has_next = value.has_next();
        Self {
            content: value.into_content().into_iter().map(Into::into).collect(),
            page: page.page(),
            size: page.size(),
            has_next,
        }
    }
}

/// Query parameters accepted by [`search_projects`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SearchProjectsQuery {
    /// Completed projects instead of open ones.
    pub completed: Option<bool>,
    /// One of `all`, `title`, `position`, `techStack`.
    pub filter_type: Option<String>,
    /// Case-insensitive search text.
    pub filter_value: Option<String>,
    /// Restrict to projects owned by the acting user.
    pub mine: Option<bool>,
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub size: Option<u32>,
}

/// Query parameters accepted by [`list_my_projects`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MyProjectsQuery {
    /// One of `all`, `in-progress`, `in-review`.
    pub status: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

fn parse_filter_type(raw: Option<String>) -> Result<ProjectFilterType, Error> {
    match raw {
        Some(value) => ProjectFilterType::from_str(&value).map_err(|_| {
            invalid_value_error(
                FieldName::new("filterType"),
                &value,
                "must be one of all, title, position, techStack",
            )
        }),
        None => Ok(ProjectFilterType::default()),
    }
}

fn parse_my_status(raw: Option<String>) -> Result<MyProjectsStatus, Error> {
    match raw {
        Some(value) => MyProjectsStatus::from_str(&value).map_err(|_| {
            invalid_value_error(
                FieldName::new("status"),
                &value,
                "must be one of all, in-progress, in-review",
            )
        }),
        None => Ok(MyProjectsStatus::default()),
    }
}

/// Publish a project owned by the acting user.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = ProjectContentBody,
    responses(
        (status = 201, description = "Project created", body = ProjectBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Owner unknown to the directory", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    payload: web::Json<ProjectContentBody>,
) -> ApiResult<HttpResponse> {
    let content = parse_content(payload.into_inner())?;
    let view = state
        .projects
        .create_project(CreateProjectRequest {
            owner_id: user.user_id(),
            content,
        })
        .await?;
    Ok(HttpResponse::Created().json(ProjectBody::from(view)))
}

/// Search projects.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(SearchProjectsQuery),
    responses(
        (status = 200, description = "Matching projects", body = ProjectSummarySliceBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "searchProjects"
)]
#[get("/projects")]
pub async fn search_projects(
    state: web::Data<HttpState>,
    user: ActingUser,
    query: web::Query<SearchProjectsQuery>,
) -> ApiResult<web::Json<ProjectSummarySliceBody>> {
    let query = query.into_inner();
    let request = SearchProjectsRequest {
        viewer: user.user_id(),
        completed: query.completed.unwrap_or(false),
        filter_type: parse_filter_type(query.filter_type)?,
        filter_value: query.filter_value,
        mine: query.mine.unwrap_or(false),
        page: parse_page(query.page, query.size)?,
    };
    let slice = state.projects_query.search_projects(request).await?;
    Ok(web::Json(slice.into()))
}

/// List the acting user's projects.
#[utoipa::path(
    get,
    path = "/api/v1/projects/mine",
    params(MyProjectsQuery),
    responses(
        (status = 200, description = "The viewer's projects", body = MyProjectSliceBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "listMyProjects"
)]
#[get("/projects/mine")]
pub async fn list_my_projects(
    state: web::Data<HttpState>,
    user: ActingUser,
    query: web::Query<MyProjectsQuery>,
) -> ApiResult<web::Json<MyProjectSliceBody>> {
    let query = query.into_inner();
    let request = MyProjectsRequest {
        user_id: user.user_id(),
        status: parse_my_status(query.status)?,
        page: parse_page(query.page, query.size)?,
    };
    let slice = state.projects_query.list_my_projects(request).await?;
    Ok(web::Json(slice.into()))
}

/// Project detail.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project detail", body = ProjectDetailBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{project_id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectDetailBody>> {
    let access = project_access(user, &path)?;
    let detail = state.projects_query.get_project(access).await?;
    Ok(web::Json(detail.into()))
}

/// Edit a project owned by the acting user.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = ProjectContentBody,
    responses(
        (status = 200, description = "Project updated", body = ProjectBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{project_id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
    payload: web::Json<ProjectContentBody>,
) -> ApiResult<web::Json<ProjectBody>> {
    let access = project_access(user, &path)?;
    let content = parse_content(payload.into_inner())?;
    let view = state
        .projects
        .update_project(UpdateProjectRequest { access, content })
        .await?;
    Ok(web::Json(view.into()))
}

/// Delete a project and everything hanging off it.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{project_id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let access = project_access(user, &path)?;
    state.projects.delete_project(access).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Owner-only view of a project's completion fields.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/complete",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Completion fields", body = ProjectBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "getCompletedProject"
)]
#[get("/projects/{project_id}/complete")]
pub async fn get_completed_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectBody>> {
    let access = project_access(user, &path)?;
    let view = state.projects_query.get_completed_project(access).await?;
    Ok(web::Json(view.into()))
}

/// Mark a project completed and replace its roster.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/complete",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = CompleteProjectBody,
    responses(
        (status = 200, description = "Project completed", body = ProjectBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Project or resume not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "completeProject"
)]
#[put("/projects/{project_id}/complete")]
pub async fn complete_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
    payload: web::Json<CompleteProjectBody>,
) -> ApiResult<web::Json<ProjectBody>> {
    let access = project_access(user, &path)?;
    let CompleteProjectBody {
        content,
        member_resume_ids,
    } = payload.into_inner();
    let request = CompleteProjectRequest {
        access,
        content: parse_content(content)?,
        member_resume_ids: parse_id_list(
            member_resume_ids,
            FieldName::new("memberResumeIds"),
            ResumeId::new,
        )?,
    };
    let view = state.projects.complete_project(request).await?;
    Ok(web::Json(view.into()))
}

/// Bookmark a project.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/bookmark",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 204, description = "Bookmarked"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "bookmarkProject"
)]
#[put("/projects/{project_id}/bookmark")]
pub async fn bookmark_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let access = project_access(user, &path)?;
    state.projects.bookmark_project(access).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove the acting user's bookmark.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/bookmark",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 204, description = "Bookmark removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Project not found", body = ErrorSchema)
    ),
    tags = ["projects"],
    operation_id = "unbookmarkProject"
)]
#[delete("/projects/{project_id}/bookmark")]
pub async fn unbookmark_project(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let access = project_access(user, &path)?;
    state.projects.unbookmark_project(access).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
