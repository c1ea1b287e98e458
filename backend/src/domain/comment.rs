//! Project comments and their two-level threads.
//!
//! Deletion by an end user is logical: the node keeps its identity and
//! position so replies stay attached, but its content is cleared.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{CommentId, ProjectId, UserId};

/// Validation errors raised by [`Comment::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentValidationError {
    /// Content is blank after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,
}

/// A comment on a project, optionally replying to a root comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub project_id: ProjectId,
    pub author_id: UserId,
    /// `None` marks a root comment.
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a new comment with non-blank content.
    pub fn new(
        project_id: ProjectId,
        author_id: UserId,
        parent_id: Option<CommentId>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, CommentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        Ok(Self {
            id: CommentId::random(),
            project_id,
            author_id,
            parent_id,
            content,
            deleted: false,
            created_at: now,
        })
    }

    /// Whether this comment starts a thread.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Flag as deleted and clear the content.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
        self.content.clear();
    }
}

/// A root comment with its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub root: Comment,
    pub children: Vec<Comment>,
}

/// Group comments into threads.
///
/// Roots and children are both ordered by creation time; ties keep the input
/// order. Replies whose parent is not a root in `comments` are dropped since
/// only two levels are modelled.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use project_hub::domain::{assemble_threads, Comment, ProjectId, UserId};
///
/// let project = ProjectId::random();
/// let author = UserId::random();
/// let root = Comment::new(project, author, None, "hello", Utc::now()).expect("root");
/// let reply = Comment::new(project, author, Some(root.id), "hi", Utc::now()).expect("reply");
/// let threads = assemble_threads(vec![reply, root.clone()]);
/// assert_eq!(threads.len(), 1);
/// assert_eq!(threads[0].root.id, root.id);
/// assert_eq!(threads[0].children.len(), 1);
/// ```
pub fn assemble_threads(mut comments: Vec<Comment>) -> Vec<CommentThread> {
    comments.sort_by_key(|comment| comment.created_at);
    let (roots, replies): (Vec<_>, Vec<_>) = comments.into_iter().partition(Comment::is_root);

    let mut children: HashMap<CommentId, Vec<Comment>> = HashMap::new();
    for reply in replies {
        if let Some(parent) = reply.parent_id {
            children.entry(parent).or_default().push(reply);
        }
    }

    roots
        .into_iter()
        .map(|root| CommentThread {
            children: children.remove(&root.id).unwrap_or_default(),
            root,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn at(project: ProjectId, parent: Option<CommentId>, offset: i64) -> Comment {
        let base = DateTime::<Utc>::UNIX_EPOCH;
        Comment::new(
            project,
            UserId::random(),
            parent,
            format!("comment {offset}"),
            base + Duration::seconds(offset),
        )
        .expect("valid comment")
    }

    #[rstest]
    fn rejects_blank_content() {
        let err = Comment::new(ProjectId::random(), UserId::random(), None, "\n", Utc::now())
            .expect_err("blank content");
        assert_eq!(err, CommentValidationError::EmptyContent);
    }

    #[rstest]
    fn soft_delete_clears_content() {
        let mut comment = at(ProjectId::random(), None, 0);
        comment.soft_delete();
        assert!(comment.deleted);
        assert!(comment.content.is_empty());
    }

    #[rstest]
    fn threads_follow_creation_order() {
        let project = ProjectId::random();
        let first = at(project, None, 1);
        let second = at(project, None, 2);
        let late_reply = at(project, Some(first.id), 5);
        let early_reply = at(project, Some(first.id), 3);
        let other_reply = at(project, Some(second.id), 4);

        let threads = assemble_threads(vec![
            late_reply.clone(),
            second.clone(),
            other_reply.clone(),
            first.clone(),
            early_reply.clone(),
        ]);

        let roots: Vec<_> = threads.iter().map(|t| t.root.id).collect();
        assert_eq!(roots, vec![first.id, second.id]);
        let first_children: Vec<_> = threads[0].children.iter().map(|c| c.id).collect();
        assert_eq!(first_children, vec![early_reply.id, late_reply.id]);
        assert_eq!(threads[1].children.len(), 1);
        assert_eq!(threads[1].children[0].id, other_reply.id);
    }

    #[rstest]
    fn deleted_root_keeps_children() {
        let project = ProjectId::random();
        let mut root = at(project, None, 0);
        let reply = at(project, Some(root.id), 1);
        root.soft_delete();

        let threads = assemble_threads(vec![root, reply.clone()]);
        assert!(threads[0].root.deleted);
        assert_eq!(threads[0].children[0].id, reply.id);
        assert_eq!(threads[0].children[0].parent_id, Some(threads[0].root.id));
    }
}
