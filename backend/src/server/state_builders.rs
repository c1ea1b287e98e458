//! Builders wiring the in-process adapters into HTTP state.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc::Receiver;
use tracing::info;

use project_hub::domain::{LifecyclePorts, NotificationEvent, ProjectLifecycleService};
use project_hub::inbound::http::state::{HttpState, HttpStatePorts};
use project_hub::outbound::directory::{
    DirectorySeed, InMemoryIdentityDirectory, InMemoryResumeLookup,
};
use project_hub::outbound::links::PresignedLinkSigner;
use project_hub::outbound::memory::{
    InMemoryCommentRepository, InMemoryMemberRepository, InMemoryProjectRepository,
    InMemoryTryoutRepository,
};
use project_hub::outbound::notifications::ChannelNotificationSink;

use super::ServerSettings;

/// HTTP state plus the receiver the notification dispatcher must drain.
pub(super) struct BuiltState {
    pub http_state: HttpState,
    pub notifications: Receiver<NotificationEvent>,
}

fn load_seed(settings: &ServerSettings) -> Result<DirectorySeed> {
    let Some(path) = settings.directory_seed_path() else {
        info!(reason = "unset", "directory seed skipped");
        return Ok(DirectorySeed::default());
    };
    let seed = DirectorySeed::load(path).wrap_err("failed to load directory seed")?;
    info!(
        path = %path.display(),
        users = seed.users.len(),
        resumes = seed.resumes.len(),
        "directory seed loaded"
    );
    Ok(seed)
}

/// Build the lifecycle service over in-memory stores and expose it to handlers.
pub(super) fn build_http_state(settings: &ServerSettings) -> Result<BuiltState> {
    let DirectorySeed { users, resumes } = load_seed(settings)?;
    let signer = PresignedLinkSigner::new(
        settings.link_base_url().wrap_err("invalid link signer settings")?,
        settings.link_ttl(),
    );
    let (sink, notifications) = ChannelNotificationSink::new(settings.notification_buffer());

    let service = Arc::new(ProjectLifecycleService::new(LifecyclePorts {
        projects: Arc::new(InMemoryProjectRepository::new()),
        tryouts: Arc::new(InMemoryTryoutRepository::new()),
        members: Arc::new(InMemoryMemberRepository::new()),
        comments: Arc::new(InMemoryCommentRepository::new()),
        identities: Arc::new(InMemoryIdentityDirectory::new(users)),
        resumes: Arc::new(InMemoryResumeLookup::new(resumes)),
        links: Arc::new(signer),
        notifications: Arc::new(sink),
    }));

    let http_state = HttpState::new(HttpStatePorts {
        projects: service.clone(),
        projects_query: service,
    });
    Ok(BuiltState {
        http_state,
        notifications,
    })
}
