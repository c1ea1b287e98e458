//! Membership derivation and cascade rules.
//!
//! Memberships come from three sources: the owner seed on publish, accepted
//! tryouts, and the resume list supplied on completion. Removing a member who
//! joined through a tryout deletes that tryout first so the membership cannot
//! be derived again from a stale acceptance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::ports::{MemberRepository, ResumeLookup, TryoutRepository};
use crate::domain::{
    Error, MemberId, Membership, Project, ProjectId, ResumeId, Tryout, UserProfile,
};

/// Service owning every membership mutation.
#[derive(Clone)]
pub struct MembershipManager {
    members: Arc<dyn MemberRepository>,
    tryouts: Arc<dyn TryoutRepository>,
    resumes: Arc<dyn ResumeLookup>,
}

impl MembershipManager {
    /// Create a manager over the membership and tryout stores.
    pub fn new(
        members: Arc<dyn MemberRepository>,
        tryouts: Arc<dyn TryoutRepository>,
        resumes: Arc<dyn ResumeLookup>,
    ) -> Self {
        Self {
            members,
            tryouts,
            resumes,
        }
    }

    /// Persist a membership copied from an accepted tryout.
    ///
    /// Calling this twice for the same tryout creates two memberships.
    pub async fn materialize_from_tryout(&self, tryout: &Tryout) -> Result<Membership, Error> {
        let member = Membership::from_tryout(tryout, Utc::now());
        self.members.save(&member).await?;
        info!(
            project_id = %member.project_id,
            member_id = %member.id,
            tryout_id = %tryout.id,
            "membership materialized from tryout"
        );
        Ok(member)
    }

    /// Persist the owner membership of a freshly published project.
    pub async fn seed_owner(
        &self,
        project: &Project,
        owner: &UserProfile,
    ) -> Result<Membership, Error> {
        let member = Membership::for_owner(project.id, owner, Utc::now());
        self.members.save(&member).await?;
        debug!(project_id = %project.id, user_id = %owner.id, "owner membership seeded");
        Ok(member)
    }

    /// Supersede every membership of `project_id` with one per resume.
    ///
    /// All resumes are resolved before the store is touched; a missing resume
    /// fails with `not_found` and leaves the current roster intact.
    pub async fn bulk_replace(
        &self,
        project_id: ProjectId,
        resume_ids: &[ResumeId],
    ) -> Result<Vec<Membership>, Error> {
        let found: HashMap<_, _> = self
            .resumes
            .find_resumes(resume_ids)
            .await?
            .into_iter()
            .map(|resume| (resume.id, resume))
            .collect();

        let now = Utc::now();
        let members = resume_ids
            .iter()
            .map(|id| {
                found
                    .get(id)
                    .map(|resume| Membership::from_resume(project_id, resume, now))
                    .ok_or_else(|| Error::not_found(format!("resume {id} not found")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.members
            .replace_for_project(&project_id, members.clone())
            .await?;
        info!(%project_id, count = members.len(), "project roster replaced");
        Ok(members)
    }

    /// Remove every membership and tryout of a project.
    pub async fn cascade_delete_for_project(&self, project_id: ProjectId) -> Result<(), Error> {
        self.members.delete_by_project(&project_id).await?;
        self.tryouts.delete_by_project(&project_id).await?;
        debug!(%project_id, "memberships and tryouts removed");
        Ok(())
    }

    /// Remove a member of `project_id`, deleting its originating tryout first.
    pub async fn remove_member(
        &self,
        project_id: ProjectId,
        member_id: MemberId,
    ) -> Result<(), Error> {
        let member = self
            .members
            .find_by_id(&member_id)
            .await?
            .filter(|member| member.project_id == project_id)
            .ok_or_else(|| {
                Error::not_found(format!("member {member_id} not found in project {project_id}"))
            })?;

        if let Some(tryout_id) = member.tryout_id {
            self.tryouts.delete(&tryout_id).await?;
        }
        self.members.delete(&member_id).await?;
        info!(%project_id, %member_id, "member removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "membership_manager_tests.rs"]
mod tests;
