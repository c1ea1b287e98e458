//! In-memory [`CommentRepository`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, ProjectId};

use super::{lock, upsert};

/// Comment store keeping comments in posting order.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut comments =
            lock(&self.comments, "comment").map_err(CommentRepositoryError::query)?;
        upsert(&mut comments, comment.clone(), |c| c.id == comment.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let comments = lock(&self.comments, "comment").map_err(CommentRepositoryError::query)?;
        Ok(comments.iter().find(|c| c.id == *id).cloned())
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let comments = lock(&self.comments, "comment").map_err(CommentRepositoryError::query)?;
        Ok(comments
            .iter()
            .filter(|c| c.project_id == *project_id)
            .cloned()
            .collect())
    }

    async fn delete_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<(), CommentRepositoryError> {
        let mut comments =
            lock(&self.comments, "comment").map_err(CommentRepositoryError::query)?;
        comments.retain(|c| c.project_id != *project_id);
        Ok(())
    }
}
