//! Project lifecycle orchestration.
//!
//! [`ProjectLifecycleService`] composes the tryout state machine, the
//! membership manager, and the comment thread manager into the business
//! operations exposed through [`ProjectLifecycleCommand`] and
//! [`ProjectLifecycleQuery`]. Steps within one operation run strictly in
//! sequence; notification failures never fail the primary mutation.
//!
//! [`ProjectLifecycleCommand`]: crate::domain::ports::ProjectLifecycleCommand
//! [`ProjectLifecycleQuery`]: crate::domain::ports::ProjectLifecycleQuery

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    BlobLinkSigner, CommentRepository, IdentityDirectory, MemberRepository, NotificationSink,
    ProjectRepository, ProjectView, ResumeLookup, TryoutRepository,
};
use crate::domain::{
    CommentThreadManager, Error, MembershipManager, Project, ProjectId, StorageRef,
    TryoutStateMachine, UserId, UserProfile,
};

mod commands;
mod query_impl;
#[cfg(test)]
mod tests;

/// Driven ports consumed by [`ProjectLifecycleService`].
///
/// This is a parameter object so wiring code names each dependency.
#[derive(Clone)]
pub struct LifecyclePorts {
    pub projects: Arc<dyn ProjectRepository>,
    pub tryouts: Arc<dyn TryoutRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub identities: Arc<dyn IdentityDirectory>,
    pub resumes: Arc<dyn ResumeLookup>,
    pub links: Arc<dyn BlobLinkSigner>,
    pub notifications: Arc<dyn NotificationSink>,
}

/// Orchestrator implementing the project lifecycle driving ports.
#[derive(Clone)]
pub struct ProjectLifecycleService {
    projects: Arc<dyn ProjectRepository>,
    tryouts: Arc<dyn TryoutRepository>,
    members: Arc<dyn MemberRepository>,
    identities: Arc<dyn IdentityDirectory>,
    resumes: Arc<dyn ResumeLookup>,
    links: Arc<dyn BlobLinkSigner>,
    state_machine: TryoutStateMachine,
    memberships: MembershipManager,
    threads: CommentThreadManager,
}

impl ProjectLifecycleService {
    /// Build the orchestrator and the managers it delegates to.
    pub fn new(ports: LifecyclePorts) -> Self {
        let LifecyclePorts {
            projects,
            tryouts,
            members,
            comments,
            identities,
            resumes,
            links,
            notifications,
        } = ports;

        let memberships =
            MembershipManager::new(members.clone(), tryouts.clone(), resumes.clone());
        let state_machine = TryoutStateMachine::new(
            projects.clone(),
            tryouts.clone(),
            memberships.clone(),
            notifications.clone(),
        );
        let threads = CommentThreadManager::new(projects.clone(), comments, notifications);

        Self {
            projects,
            tryouts,
            members,
            identities,
            resumes,
            links,
            state_machine,
            memberships,
            threads,
        }
    }

    async fn load_project(&self, project_id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    async fn load_user(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.identities
            .find_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    /// Sign every distinct reference in one call to the link signer.
    async fn sign_links<'a, I>(&self, refs: I) -> Result<SignedLinks, Error>
    where
        I: IntoIterator<Item = &'a StorageRef> + Send,
        I::IntoIter: Send,
    {
        let distinct: BTreeSet<&StorageRef> = refs.into_iter().collect();
        if distinct.is_empty() {
            return Ok(SignedLinks::default());
        }
        let keys: Vec<StorageRef> = distinct.into_iter().cloned().collect();
        let links = self.links.sign_many(&keys).await?;
        Ok(SignedLinks(links))
    }

    async fn project_view(&self, project: Project) -> Result<ProjectView, Error> {
        let links = self.sign_links(project.thumbnail.iter()).await?;
        let thumbnail_url = links.get(project.thumbnail.as_ref());
        Ok(ProjectView::new(project, thumbnail_url))
    }
}

/// Download links keyed by storage reference.
#[derive(Debug, Default)]
struct SignedLinks(HashMap<StorageRef, Url>);

impl SignedLinks {
    fn get(&self, key: Option<&StorageRef>) -> Option<Url> {
        key.and_then(|k| self.0.get(k)).cloned()
    }
}
