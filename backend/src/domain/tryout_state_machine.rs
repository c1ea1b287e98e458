//! Tryout state machine.
//!
//! ```text
//! IN_REVIEW ──accept──▶ ACCEPTED
//!     │
//!     └─────reject────▶ REJECTED
//! ```
//!
//! Acceptance materializes a membership; if that fails the tryout is saved
//! back in its previous state. Both decisions notify the applicant after the
//! state change is stored. Deciding an already decided tryout is
//! allowed and logged; a repeated acceptance therefore yields a second
//! membership.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::notification::dispatch_notification;
use crate::domain::ports::{
    DecideTryoutRequest, NotificationSink, ProjectRepository, TryoutRepository,
};
use crate::domain::{
    AuthorizationGate, Error, ForbiddenReason, MembershipManager, NotificationEvent,
    NotificationKind, Project, ProjectId, ResumeSnapshot, Tryout, TryoutStatus, UserId,
};

/// Applies and decides tryouts.
#[derive(Clone)]
pub struct TryoutStateMachine {
    projects: Arc<dyn ProjectRepository>,
    tryouts: Arc<dyn TryoutRepository>,
    memberships: MembershipManager,
    notifications: Arc<dyn NotificationSink>,
}

impl TryoutStateMachine {
    /// Create a state machine over the given stores.
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        tryouts: Arc<dyn TryoutRepository>,
        memberships: MembershipManager,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            projects,
            tryouts,
            memberships,
            notifications,
        }
    }

    /// Put back the undecided tryout after its membership could not be stored.
    async fn restore(&self, snapshot: &Tryout) {
        if let Err(err) = self.tryouts.save(snapshot).await {
            error!(
                tryout_id = %snapshot.id,
                error = %err,
                "failed to restore tryout after membership creation failed"
            );
        }
    }

    async fn load_project(&self, project_id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    /// Submit an in-review tryout and notify the project owner.
    pub async fn apply(
        &self,
        project_id: ProjectId,
        applicant: UserId,
        resume: &ResumeSnapshot,
        position_name: &str,
    ) -> Result<Tryout, Error> {
        let project = self.load_project(&project_id).await?;
        AuthorizationGate::require_ownership(
            &resume.owner_id,
            &applicant,
            ForbiddenReason::ResumeTryout,
        )?;

        let tryout = Tryout::apply(project.id, resume, position_name, Utc::now())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.tryouts.save(&tryout).await?;
        info!(
            %project_id,
            tryout_id = %tryout.id,
            applicant = %applicant,
            position = %tryout.position_name,
            "tryout submitted"
        );

        dispatch_notification(
            self.notifications.as_ref(),
            NotificationEvent::new(NotificationKind::Apply, project.owner_id),
        )
        .await;
        Ok(tryout)
    }

    /// Accept or reject a tryout on behalf of the project owner.
    ///
    /// The project named in `request` must exist and be owned by the acting
    /// user; the tryout must belong to that project.
    pub async fn transition(
        &self,
        request: DecideTryoutRequest,
        status: TryoutStatus,
    ) -> Result<Tryout, Error> {
        let DecideTryoutRequest { access, tryout_id } = request;
        if !status.is_terminal() {
            return Err(Error::invalid_request(
                "a tryout can only be accepted or rejected",
            ));
        }

        let project = self.load_project(&access.project_id).await?;
        AuthorizationGate::require_ownership(
            &project.owner_id,
            &access.user_id,
            ForbiddenReason::TryoutView,
        )?;

        let mut tryout = self
            .tryouts
            .find_by_id(&tryout_id)
            .await?
            .filter(|tryout| tryout.project_id == project.id)
            .ok_or_else(|| {
                Error::not_found(format!(
                    "tryout {tryout_id} not found in project {}",
                    project.id
                ))
            })?;

        let snapshot = tryout.clone();
        let previous = tryout.transition(status, Utc::now());
        if previous.is_terminal() {
            warn!(
                %tryout_id,
                from = %previous,
                to = %status,
                "tryout decided again"
            );
        }
        self.tryouts.save(&tryout).await?;

        let kind = match status {
            TryoutStatus::Accepted => {
                if let Err(err) = self.memberships.materialize_from_tryout(&tryout).await {
                    self.restore(&snapshot).await;
                    return Err(err);
                }
                NotificationKind::Accepted
            }
            _ => NotificationKind::Rejected,
        };
        info!(%tryout_id, project_id = %project.id, status = %status, "tryout decided");

        dispatch_notification(
            self.notifications.as_ref(),
            NotificationEvent::new(kind, tryout.applicant_id),
        )
        .await;
        Ok(tryout)
    }
}

#[cfg(test)]
#[path = "tryout_state_machine_tests.rs"]
mod tests;
