//! Query implementation for the project lifecycle service.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use pagination::Slice;

use crate::domain::ports::{
    CommentNodeView, CommentThreadView, MemberBriefView, MyProjectView, MyProjectsRequest,
    MyProjectsStatus, OwnerView, ProjectAccess, ProjectDetailView, ProjectLifecycleQuery,
    ProjectSummaryView, ProjectView, SearchProjectsRequest, TryoutView,
};
use crate::domain::{
    AuthorizationGate, Comment, Error, ForbiddenReason, Membership, Project, ProjectId,
    ProjectSearchFilter, TryoutStatus, UserId, UserProfile,
};

use super::{ProjectLifecycleService, SignedLinks};

fn member_brief(member: &Membership, links: &SignedLinks) -> MemberBriefView {
    MemberBriefView {
        member_id: member.id,
        user_id: member.user_id,
        user_name: member.user_name.clone(),
        avatar_url: links.get(member.user_thumbnail.as_ref()),
        position_name: member.position_name.clone(),
    }
}

fn group_by_project(members: Vec<Membership>) -> HashMap<ProjectId, Vec<Membership>> {
    let mut grouped: HashMap<ProjectId, Vec<Membership>> = HashMap::new();
    for member in members {
        grouped.entry(member.project_id).or_default().push(member);
    }
    grouped
}

fn comment_node(
    comment: Comment,
    authors: &HashMap<UserId, UserProfile>,
    links: &SignedLinks,
) -> CommentNodeView {
    let author = authors.get(&comment.author_id);
    CommentNodeView {
        author_name: author.map(|profile| profile.display_name.clone()),
        author_avatar_url: links.get(author.and_then(|profile| profile.profile_image.as_ref())),
        comment: comment.into(),
    }
}

impl ProjectLifecycleService {
    async fn owner_tryouts(
        &self,
        access: ProjectAccess,
        status: Option<TryoutStatus>,
    ) -> Result<Vec<TryoutView>, Error> {
        let project = self.load_project(&access.project_id).await?;
        AuthorizationGate::require_ownership(
            &project.owner_id,
            &access.user_id,
            ForbiddenReason::TryoutView,
        )?;
        let tryouts = self.tryouts.list_by_project(&project.id, status).await?;
        Ok(tryouts.into_iter().map(TryoutView::from).collect())
    }

    async fn owned_projects(
        &self,
        request: MyProjectsRequest,
    ) -> Result<Slice<MyProjectView>, Error> {
        let slice = self
            .projects
            .list_by_owner(&request.user_id, request.page)
            .await?;
        let links = self
            .sign_links(slice.content().iter().filter_map(|p| p.thumbnail.as_ref()))
            .await?;

        Ok(slice.map(|project| MyProjectView {
            thumbnail_url: links.get(project.thumbnail.as_ref()),
            id: project.id,
            title: project.title,
            description: project.description,
            completed: project.completed,
            position_name: None,
            teammates: Vec::new(),
            created_at: project.created_at,
        }))
    }

    async fn projects_in_progress(
        &self,
        request: MyProjectsRequest,
    ) -> Result<Slice<MyProjectView>, Error> {
        let joined: BTreeSet<ProjectId> = self
            .members
            .list_by_user(&request.user_id)
            .await?
            .into_iter()
            .map(|member| member.project_id)
            .collect();
        let ids: Vec<ProjectId> = joined.into_iter().collect();
        let slice = self.projects.list_by_ids(&ids, false, request.page).await?;

        let page_ids: Vec<ProjectId> = slice.content().iter().map(|p| p.id).collect();
        let mut rosters = if page_ids.is_empty() {
            HashMap::new()
        } else {
            group_by_project(self.members.list_by_project_ids(&page_ids).await?)
        };

        let thumbnails = slice.content().iter().filter_map(|p| p.thumbnail.as_ref());
        let avatars = rosters
            .values()
            .flatten()
            .filter_map(|member| member.user_thumbnail.as_ref());
        let links = self.sign_links(thumbnails.chain(avatars)).await?;

        Ok(slice.map(|project| {
            let roster = rosters.remove(&project.id).unwrap_or_default();
            let (mine, others): (Vec<_>, Vec<_>) = roster
                .into_iter()
                .partition(|member| member.user_id == request.user_id);
            MyProjectView {
                thumbnail_url: links.get(project.thumbnail.as_ref()),
                position_name: mine.into_iter().find_map(|member| member.position_name),
                teammates: others.iter().map(|member| member_brief(member, &links)).collect(),
                id: project.id,
                title: project.title,
                description: project.description,
                completed: project.completed,
                created_at: project.created_at,
            }
        }))
    }

    async fn projects_in_review(
        &self,
        request: MyProjectsRequest,
    ) -> Result<Slice<MyProjectView>, Error> {
        let mut positions: HashMap<ProjectId, String> = HashMap::new();
        for tryout in self
            .tryouts
            .list_by_applicant(&request.user_id, Some(TryoutStatus::InReview))
            .await?
        {
            positions
                .entry(tryout.project_id)
                .or_insert(tryout.position_name);
        }
        let ids: Vec<ProjectId> = positions.keys().copied().collect();
        let slice = self.projects.list_by_ids(&ids, false, request.page).await?;
        let links = self
            .sign_links(slice.content().iter().filter_map(|p| p.thumbnail.as_ref()))
            .await?;

        Ok(slice.map(|project| MyProjectView {
            thumbnail_url: links.get(project.thumbnail.as_ref()),
            position_name: positions.remove(&project.id),
            id: project.id,
            title: project.title,
            description: project.description,
            completed: project.completed,
            teammates: Vec::new(),
            created_at: project.created_at,
        }))
    }

    fn summary(
        project: Project,
        viewer: &UserId,
        members: &[Membership],
        links: &SignedLinks,
    ) -> ProjectSummaryView {
        ProjectSummaryView {
            thumbnail_url: links.get(project.thumbnail.as_ref()),
            bookmarked: project.is_bookmarked_by(viewer),
            bookmark_count: project.bookmarkers.len(),
            members: members.iter().map(|m| member_brief(m, links)).collect(),
            id: project.id,
            owner_id: project.owner_id,
            title: project.title,
            description: project.description,
            tech_stacks: project.tech_stacks,
            recruitments: project.recruitments,
            completed: project.completed,
            created_at: project.created_at,
        }
    }
}

#[async_trait]
impl ProjectLifecycleQuery for ProjectLifecycleService {
    async fn get_project(&self, access: ProjectAccess) -> Result<ProjectDetailView, Error> {
        let project = self.load_project(&access.project_id).await?;
        let owner = self.load_user(&project.owner_id).await?;
        let links = self
            .sign_links(project.thumbnail.iter().chain(owner.profile_image.iter()))
            .await?;

        let bookmarked = project.is_bookmarked_by(&access.user_id);
        let owner_view = OwnerView {
            avatar_url: links.get(owner.profile_image.as_ref()),
            user_id: owner.id,
            display_name: owner.display_name,
        };
        let thumbnail_url = links.get(project.thumbnail.as_ref());
        Ok(ProjectDetailView {
            project: ProjectView::new(project, thumbnail_url),
            owner: owner_view,
            bookmarked,
        })
    }

    async fn get_completed_project(&self, access: ProjectAccess) -> Result<ProjectView, Error> {
        let project = self.load_project(&access.project_id).await?;
        AuthorizationGate::require_ownership(
            &project.owner_id,
            &access.user_id,
            ForbiddenReason::ProjectComplete,
        )?;
        self.project_view(project).await
    }

    async fn list_tryouts(&self, access: ProjectAccess) -> Result<Vec<TryoutView>, Error> {
        self.owner_tryouts(access, None).await
    }

    async fn list_accepted_tryouts(
        &self,
        access: ProjectAccess,
    ) -> Result<Vec<TryoutView>, Error> {
        let mut accepted = self
            .owner_tryouts(access, Some(TryoutStatus::Accepted))
            .await?;
        accepted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(accepted)
    }

    async fn list_threaded_comments(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<CommentThreadView>, Error> {
        let threads = self.threads.list_threaded(project_id).await?;

        let distinct: BTreeSet<UserId> = threads
            .iter()
            .flat_map(|thread| std::iter::once(&thread.root).chain(&thread.children))
            .map(|comment| comment.author_id)
            .collect();
        let author_ids: Vec<UserId> = distinct.into_iter().collect();
        let authors: HashMap<UserId, UserProfile> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            self.identities
                .find_users(&author_ids)
                .await?
                .into_iter()
                .map(|profile| (profile.id, profile))
                .collect()
        };
        let links = self
            .sign_links(authors.values().filter_map(|p| p.profile_image.as_ref()))
            .await?;

        Ok(threads
            .into_iter()
            .map(|thread| CommentThreadView {
                root: comment_node(thread.root, &authors, &links),
                children: thread
                    .children
                    .into_iter()
                    .map(|child| comment_node(child, &authors, &links))
                    .collect(),
            })
            .collect())
    }

    async fn search_projects(
        &self,
        request: SearchProjectsRequest,
    ) -> Result<Slice<ProjectSummaryView>, Error> {
        let SearchProjectsRequest {
            viewer,
            completed,
            filter_type,
            filter_value,
            mine,
            page,
        } = request;
        let filter = ProjectSearchFilter {
            completed,
            filter_type,
            filter_value,
            owner: mine.then_some(viewer),
        };
        let slice = self.projects.search(&filter, page).await?;

        let completed_ids: Vec<ProjectId> = slice
            .content()
            .iter()
            .filter(|p| p.completed)
            .map(|p| p.id)
            .collect();
        let mut rosters = if completed_ids.is_empty() {
            HashMap::new()
        } else {
            group_by_project(self.members.list_by_project_ids(&completed_ids).await?)
        };

        let thumbnails = slice.content().iter().filter_map(|p| p.thumbnail.as_ref());
        let avatars = rosters
            .values()
            .flatten()
            .filter_map(|member| member.user_thumbnail.as_ref());
        let links = self.sign_links(thumbnails.chain(avatars)).await?;

        Ok(slice.map(|project| {
            let members = rosters.remove(&project.id).unwrap_or_default();
            Self::summary(project, &viewer, &members, &links)
        }))
    }

    async fn list_my_projects(
        &self,
        request: MyProjectsRequest,
    ) -> Result<Slice<MyProjectView>, Error> {
        match request.status {
            MyProjectsStatus::All => self.owned_projects(request).await,
            MyProjectsStatus::InProgress => self.projects_in_progress(request).await,
            MyProjectsStatus::InReview => self.projects_in_review(request).await,
        }
    }
}
