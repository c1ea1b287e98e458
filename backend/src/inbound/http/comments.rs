//! Comment HTTP handlers.
//!
//! ```text
//! POST   /api/v1/projects/{project_id}/comments
//! GET    /api/v1/projects/{project_id}/comments
//! DELETE /api/v1/comments/{comment_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CommentNodeView, CommentThreadView, CommentView, DeleteCommentRequest, PostCommentRequest,
};
use crate::domain::{CommentId, ProjectId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::acting_user::ActingUser;
use crate::inbound::http::projects::project_access;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// New comment or reply.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentBody {
    /// Root comment being replied to.
    #[schema(format = "uuid")]
    #[serde(default)]
    pub parent_id: Option<String>,
    pub content: String,
}

/// A comment without author enrichment. Deleted comments have empty content.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub project_id: String,
    #[schema(format = "uuid")]
    pub author_id: String,
    #[schema(format = "uuid")]
    pub parent_id: Option<String>,
    pub content: String,
    pub deleted: bool,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<CommentView> for CommentBody {
    fn from(value: CommentView) -> Self {
        Self {
            id: value.id.to_string(),
            project_id: value.project_id.to_string(),
            author_id: value.author_id.to_string(),
            parent_id: value.parent_id.map(|id| id.to_string()),
            content: value.content,
            deleted: value.deleted,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// A comment with its author's display data.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentNodeBody {
    #[serde(flatten)]
    pub comment: CommentBody,
    pub author_name: Option<String>,
    #[schema(format = "uri")]
    pub author_avatar_url: Option<String>,
}

impl From<CommentNodeView> for CommentNodeBody {
    fn from(value: CommentNodeView) -> Self {
        Self {
            comment: value.comment.into(),
            author_name: value.author_name,
            author_avatar_url: value.author_avatar_url.map(String::from),
        }
    }
}

/// Root comment with its direct replies in posting order.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadBody {
    pub root: CommentNodeBody,
    pub children: Vec<CommentNodeBody>,
}

impl From<CommentThreadView> for CommentThreadBody {
    fn from(value: CommentThreadView) -> Self {
        Self {
            root: value.root.into(),
            children: value.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Post a root comment or a reply.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/comments",
    params(("project_id" = String, Path, description = "Project identifier")),
    request_body = PostCommentBody,
    responses(
        (status = 201, description = "Comment posted", body = CommentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Project or parent not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "postComment"
)]
#[post("/projects/{project_id}/comments")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
    payload: web::Json<PostCommentBody>,
) -> ApiResult<HttpResponse> {
    let access = project_access(user, &path)?;
    let PostCommentBody { parent_id, content } = payload.into_inner();
    let parent_id = parent_id
        .as_deref()
        .map(|raw| parse_id(raw, FieldName::new("parentId"), CommentId::new))
        .transpose()?;
    let view = state
        .projects
        .post_comment(PostCommentRequest {
            access,
            parent_id,
            content,
        })
        .await?;
    Ok(HttpResponse::Created().json(CommentBody::from(view)))
}

/// Threaded comments of a project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/comments",
    params(("project_id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Comment threads", body = [CommentThreadBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listThreadedComments"
)]
#[get("/projects/{project_id}/comments")]
pub async fn list_threaded_comments(
    state: web::Data<HttpState>,
    _user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentThreadBody>>> {
    let project_id = parse_id(&path, FieldName::new("projectId"), ProjectId::new)?;
    let threads = state.projects_query.list_threaded_comments(project_id).await?;
    Ok(web::Json(threads.into_iter().map(Into::into).collect()))
}

/// Soft-delete a comment authored by the acting user.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{comment_id}",
    params(("comment_id" = String, Path, description = "Comment identifier")),
    responses(
        (status = 200, description = "Comment deleted", body = CommentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    user: ActingUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<CommentBody>> {
    let request = DeleteCommentRequest {
        user_id: user.user_id(),
        comment_id: parse_id(&path, FieldName::new("commentId"), CommentId::new)?,
    };
    let view = state.projects.delete_comment(request).await?;
    Ok(web::Json(view.into()))
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
