//! Command implementation for the project lifecycle service.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info};

use crate::domain::ports::{
    ApplyTryoutRequest, CommentView, CompleteProjectRequest, CreateProjectRequest,
    DecideTryoutRequest, DeleteCommentRequest, PostCommentRequest, ProjectAccess,
    ProjectLifecycleCommand, ProjectView, RemoveMemberRequest, TryoutView, UpdateProjectRequest,
};
use crate::domain::{
    AuthorizationGate, Error, ForbiddenReason, Project, ProjectValidationError, TryoutStatus,
};

use super::ProjectLifecycleService;

fn invalid_project(err: ProjectValidationError) -> Error {
    Error::invalid_request(format!("invalid project: {err}"))
}

impl ProjectLifecycleService {
    async fn owned_project(
        &self,
        access: ProjectAccess,
        reason: ForbiddenReason,
    ) -> Result<Project, Error> {
        let project = self.load_project(&access.project_id).await?;
        AuthorizationGate::require_ownership(&project.owner_id, &access.user_id, reason)?;
        Ok(project)
    }

    /// Undo a project insert whose owner membership could not be stored.
    async fn discard_unseeded(&self, project: &Project) {
        if let Err(err) = self.projects.delete(&project.id).await {
            error!(
                project_id = %project.id,
                error = %err,
                "failed to discard project after owner seeding failed"
            );
        }
    }

    /// Restore the pre-completion snapshot after the roster swap failed.
    async fn restore_snapshot(&self, previous: &Project) {
        if let Err(err) = self.projects.save(previous).await {
            error!(
                project_id = %previous.id,
                error = %err,
                "failed to restore project after roster replacement failed"
            );
        }
    }
}

#[async_trait]
impl ProjectLifecycleCommand for ProjectLifecycleService {
    async fn create_project(&self, request: CreateProjectRequest) -> Result<ProjectView, Error> {
        let CreateProjectRequest { owner_id, content } = request;
        let owner = self.load_user(&owner_id).await?;
        let project = Project::new(owner_id, content, Utc::now()).map_err(invalid_project)?;

        self.projects.save(&project).await?;
        if let Err(err) = self.memberships.seed_owner(&project, &owner).await {
            self.discard_unseeded(&project).await;
            return Err(err);
        }
        info!(project_id = %project.id, owner = %owner_id, "project created");
        self.project_view(project).await
    }

    async fn update_project(&self, request: UpdateProjectRequest) -> Result<ProjectView, Error> {
        let UpdateProjectRequest { access, content } = request;
        let mut project = self
            .owned_project(access, ForbiddenReason::ProjectUpdate)
            .await?;
        project
            .revise(content, Utc::now())
            .map_err(invalid_project)?;
        self.projects.save(&project).await?;
        info!(project_id = %project.id, "project updated");
        self.project_view(project).await
    }

    async fn delete_project(&self, access: ProjectAccess) -> Result<(), Error> {
        let project = self
            .owned_project(access, ForbiddenReason::ProjectDelete)
            .await?;

        self.threads.cascade_delete_for_project(project.id).await?;
        self.memberships
            .cascade_delete_for_project(project.id)
            .await?;
        self.projects.delete(&project.id).await?;
        info!(project_id = %project.id, "project deleted");
        Ok(())
    }

    async fn complete_project(
        &self,
        request: CompleteProjectRequest,
    ) -> Result<ProjectView, Error> {
        let CompleteProjectRequest {
            access,
            content,
            member_resume_ids,
        } = request;
        let mut project = self
            .owned_project(access, ForbiddenReason::ProjectComplete)
            .await?;
        let previous = project.clone();

        project
            .complete(content, Utc::now())
            .map_err(invalid_project)?;
        self.projects.save(&project).await?;
        if let Err(err) = self
            .memberships
            .bulk_replace(project.id, &member_resume_ids)
            .await
        {
            self.restore_snapshot(&previous).await;
            return Err(err);
        }
        info!(
            project_id = %project.id,
            members = member_resume_ids.len(),
            "project completed"
        );
        self.project_view(project).await
    }

    async fn apply_tryout(&self, request: ApplyTryoutRequest) -> Result<TryoutView, Error> {
        let ApplyTryoutRequest {
            access,
            resume_id,
            position_name,
        } = request;
        let resume = self
            .resumes
            .find_resume(&resume_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("resume {resume_id} not found")))?;

        self.state_machine
            .apply(access.project_id, access.user_id, &resume, &position_name)
            .await
            .map(TryoutView::from)
    }

    async fn accept_tryout(&self, request: DecideTryoutRequest) -> Result<TryoutView, Error> {
        self.state_machine
            .transition(request, TryoutStatus::Accepted)
            .await
            .map(TryoutView::from)
    }

    async fn reject_tryout(&self, request: DecideTryoutRequest) -> Result<TryoutView, Error> {
        self.state_machine
            .transition(request, TryoutStatus::Rejected)
            .await
            .map(TryoutView::from)
    }

    async fn remove_member(&self, request: RemoveMemberRequest) -> Result<(), Error> {
        let RemoveMemberRequest { access, member_id } = request;
        let project = self
            .owned_project(access, ForbiddenReason::MemberModify)
            .await?;
        self.memberships.remove_member(project.id, member_id).await
    }

    async fn post_comment(&self, request: PostCommentRequest) -> Result<CommentView, Error> {
        let PostCommentRequest {
            access,
            parent_id,
            content,
        } = request;
        self.threads
            .post(access, parent_id, content)
            .await
            .map(CommentView::from)
    }

    async fn delete_comment(&self, request: DeleteCommentRequest) -> Result<CommentView, Error> {
        self.threads
            .soft_delete(request.comment_id, request.user_id)
            .await
            .map(CommentView::from)
    }

    async fn bookmark_project(&self, access: ProjectAccess) -> Result<(), Error> {
        let mut project = self.load_project(&access.project_id).await?;
        if project.add_bookmark(access.user_id) {
            self.projects.save(&project).await?;
            debug!(project_id = %project.id, user_id = %access.user_id, "project bookmarked");
        }
        Ok(())
    }

    async fn unbookmark_project(&self, access: ProjectAccess) -> Result<(), Error> {
        let mut project = self.load_project(&access.project_id).await?;
        if project.remove_bookmark(&access.user_id) {
            self.projects.save(&project).await?;
            debug!(project_id = %project.id, user_id = %access.user_id, "bookmark removed");
        }
        Ok(())
    }
}
