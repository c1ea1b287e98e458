//! In-memory [`ProjectRepository`].

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::{PageRequest, Slice};

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectId, ProjectSearchFilter, UserId};

use super::{lock, upsert};

/// Project store backed by a vector in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
}

impl InMemoryProjectRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn page_of(
        &self,
        page: PageRequest,
        keep: impl Fn(&Project) -> bool,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        let projects = lock(&self.projects, "project").map_err(ProjectRepositoryError::query)?;
        let mut matching: Vec<Project> = projects
            .iter()
            .rev()
            .filter(|project| keep(project))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Slice::paginate(matching, page))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut projects =
            lock(&self.projects, "project").map_err(ProjectRepositoryError::query)?;
        upsert(&mut projects, project.clone(), |p| p.id == project.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let projects = lock(&self.projects, "project").map_err(ProjectRepositoryError::query)?;
        Ok(projects.iter().find(|p| p.id == *id).cloned())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectRepositoryError> {
        let mut projects =
            lock(&self.projects, "project").map_err(ProjectRepositoryError::query)?;
        projects.retain(|p| p.id != *id);
        Ok(())
    }

    async fn search(
        &self,
        filter: &ProjectSearchFilter,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        self.page_of(page, |project| filter.matches(project))
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        self.page_of(page, |project| project.owner_id == *owner)
    }

    async fn list_by_ids(
        &self,
        ids: &[ProjectId],
        completed: bool,
        page: PageRequest,
    ) -> Result<Slice<Project>, ProjectRepositoryError> {
        self.page_of(page, |project| {
            project.completed == completed && ids.contains(&project.id)
        })
    }
}
