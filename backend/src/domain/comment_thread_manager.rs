//! Comment posting, soft deletion, and two-level threading.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::notification::dispatch_notification;
use crate::domain::ports::{CommentRepository, NotificationSink, ProjectAccess, ProjectRepository};
use crate::domain::{
    AuthorizationGate, Comment, CommentId, CommentThread, Error, ForbiddenReason,
    NotificationEvent, NotificationKind, Project, ProjectId, UserId, assemble_threads,
};

/// Service owning comment mutations and thread assembly.
#[derive(Clone)]
pub struct CommentThreadManager {
    projects: Arc<dyn ProjectRepository>,
    comments: Arc<dyn CommentRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl CommentThreadManager {
    /// Create a manager over the project and comment stores.
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        comments: Arc<dyn CommentRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            projects,
            comments,
            notifications,
        }
    }

    async fn load_project(&self, project_id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    async fn load_comment(&self, comment_id: &CommentId) -> Result<Comment, Error> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("comment {comment_id} not found")))
    }

    /// Post a comment, optionally replying to a root comment of the same
    /// project, then notify the project owner.
    pub async fn post(
        &self,
        access: ProjectAccess,
        parent_id: Option<CommentId>,
        content: String,
    ) -> Result<Comment, Error> {
        let project = self.load_project(&access.project_id).await?;

        if let Some(parent_id) = parent_id {
            let parent = self.load_comment(&parent_id).await?;
            if parent.project_id != project.id {
                return Err(Error::not_found(format!(
                    "comment {parent_id} not found in project {}",
                    project.id
                )));
            }
            if !parent.is_root() {
                return Err(Error::invalid_request("replies may only target root comments")
                    .with_details(serde_json::json!({
                        "field": "parentCommentId",
                        "code": "nested_reply",
                    })));
            }
        }

        let comment = Comment::new(project.id, access.user_id, parent_id, content, Utc::now())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.comments.save(&comment).await?;
        info!(
            project_id = %project.id,
            comment_id = %comment.id,
            author = %comment.author_id,
            reply = comment.parent_id.is_some(),
            "comment posted"
        );

        dispatch_notification(
            self.notifications.as_ref(),
            NotificationEvent::new(NotificationKind::Comment, project.owner_id),
        )
        .await;
        Ok(comment)
    }

    /// Clear a comment's content while keeping it and its replies listed.
    pub async fn soft_delete(
        &self,
        comment_id: CommentId,
        acting: UserId,
    ) -> Result<Comment, Error> {
        let mut comment = self.load_comment(&comment_id).await?;
        AuthorizationGate::require_ownership(
            &comment.author_id,
            &acting,
            ForbiddenReason::CommentDelete,
        )?;

        comment.soft_delete();
        self.comments.save(&comment).await?;
        info!(%comment_id, project_id = %comment.project_id, "comment soft-deleted");
        Ok(comment)
    }

    /// Roots in creation order, each with its direct replies.
    pub async fn list_threaded(&self, project_id: ProjectId) -> Result<Vec<CommentThread>, Error> {
        self.load_project(&project_id).await?;
        let comments = self.comments.list_by_project(&project_id).await?;
        Ok(assemble_threads(comments))
    }

    /// Hard-delete every comment of a project.
    pub async fn cascade_delete_for_project(&self, project_id: ProjectId) -> Result<(), Error> {
        self.comments.delete_by_project(&project_id).await?;
        debug!(%project_id, "comments removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_thread_manager_tests.rs"]
mod tests;
