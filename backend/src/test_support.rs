//! Test utilities shared by integration tests.
//!
//! Compiled only with the `test-support` feature. [`InMemoryHub`] wires the
//! lifecycle service over the in-process adapters and records notifications
//! instead of dispatching them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::domain::ports::{NotificationSink, NotificationSinkError};
use crate::domain::{
    LifecyclePorts, NotificationEvent, ProjectLifecycleService, ResumeId, ResumeSnapshot,
    StorageRef, UserId, UserProfile,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::directory::{InMemoryIdentityDirectory, InMemoryResumeLookup};
use crate::outbound::links::PresignedLinkSigner;
use crate::outbound::memory::{
    InMemoryCommentRepository, InMemoryMemberRepository, InMemoryProjectRepository,
    InMemoryTryoutRepository,
};

/// Base URL used by the hub's link signer.
pub const LINK_BASE: &str = "http://files.test/";

/// Sink that keeps every accepted event and can be told to refuse them.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    events: Mutex<Vec<NotificationEvent>>,
    refuse: AtomicBool,
}

impl RecordingNotificationSink {
    /// Events accepted so far, in order.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Refuse subsequent events as if the buffer were full.
    pub fn refuse_events(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::Release);
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn enqueue(&self, event: NotificationEvent) -> Result<(), NotificationSinkError> {
        if self.refuse.load(Ordering::Acquire) {
            return Err(NotificationSinkError::full(0_usize));
        }
        self.events
            .lock()
            .map_err(|_| NotificationSinkError::closed())?
            .push(event);
        Ok(())
    }
}

/// Lifecycle service wired over in-memory adapters, with handles to each.
pub struct InMemoryHub {
    pub projects: Arc<InMemoryProjectRepository>,
    pub tryouts: Arc<InMemoryTryoutRepository>,
    pub members: Arc<InMemoryMemberRepository>,
    pub comments: Arc<InMemoryCommentRepository>,
    pub directory: Arc<InMemoryIdentityDirectory>,
    pub resumes: Arc<InMemoryResumeLookup>,
    pub notifications: Arc<RecordingNotificationSink>,
    pub service: Arc<ProjectLifecycleService>,
}

impl Default for InMemoryHub {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHub {
    /// Build an empty hub.
    ///
    /// # Panics
    /// Never in practice: [`LINK_BASE`] is a valid URL.
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tryouts = Arc::new(InMemoryTryoutRepository::new());
        let members = Arc::new(InMemoryMemberRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let directory = Arc::new(InMemoryIdentityDirectory::default());
        let resumes = Arc::new(InMemoryResumeLookup::default());
        let notifications = Arc::new(RecordingNotificationSink::default());
        let base = Url::parse(LINK_BASE).expect("link base parses");
        let signer = PresignedLinkSigner::new(base, Duration::from_secs(300));

        let service = Arc::new(ProjectLifecycleService::new(LifecyclePorts {
            projects: projects.clone(),
            tryouts: tryouts.clone(),
            members: members.clone(),
            comments: comments.clone(),
            identities: directory.clone(),
            resumes: resumes.clone(),
            links: Arc::new(signer),
            notifications: notifications.clone(),
        }));

        Self {
            projects,
            tryouts,
            members,
            comments,
            directory,
            resumes,
            notifications,
            service,
        }
    }

    /// Register a user with an avatar under `avatars/`.
    ///
    /// # Panics
    /// When the directory lock is poisoned.
    pub fn add_user(&self, display_name: &str) -> UserId {
        let id = UserId::random();
        let avatar = StorageRef::new(format!("avatars/{id}.png")).ok();
        self.directory
            .insert(UserProfile {
                id,
                display_name: display_name.to_owned(),
                profile_image: avatar,
            })
            .expect("directory insert");
        id
    }

    /// Register a resume owned by `owner`.
    ///
    /// # Panics
    /// When the resume lock is poisoned.
    pub fn add_resume(&self, owner: UserId, display_name: &str) -> ResumeId {
        let id = ResumeId::random();
        self.resumes
            .insert(ResumeSnapshot {
                id,
                owner_id: owner,
                display_name: display_name.to_owned(),
                self_description: Some(format!("{display_name} writes software")),
                profile_image: None,
            })
            .expect("resume insert");
        id
    }

    /// HTTP state backed by this hub's service.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(HttpStatePorts {
            projects: self.service.clone(),
            projects_query: self.service.clone(),
        })
    }
}
