//! In-memory [`TryoutRepository`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{TryoutRepository, TryoutRepositoryError};
use crate::domain::{ProjectId, Tryout, TryoutId, TryoutStatus, UserId};

use super::{lock, upsert};

/// Tryout store keeping submissions in creation order.
#[derive(Debug, Default)]
pub struct InMemoryTryoutRepository {
    tryouts: Mutex<Vec<Tryout>>,
}

impl InMemoryTryoutRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect(
        &self,
        keep: impl Fn(&Tryout) -> bool,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError> {
        let tryouts = lock(&self.tryouts, "tryout").map_err(TryoutRepositoryError::query)?;
        Ok(tryouts.iter().filter(|t| keep(t)).cloned().collect())
    }

    fn remove(&self, drop: impl Fn(&Tryout) -> bool) -> Result<(), TryoutRepositoryError> {
        let mut tryouts = lock(&self.tryouts, "tryout").map_err(TryoutRepositoryError::query)?;
        tryouts.retain(|t| !drop(t));
        Ok(())
    }
}

fn status_matches(tryout: &Tryout, status: Option<TryoutStatus>) -> bool {
    status.is_none_or(|wanted| tryout.status == wanted)
}

#[async_trait]
impl TryoutRepository for InMemoryTryoutRepository {
    async fn save(&self, tryout: &Tryout) -> Result<(), TryoutRepositoryError> {
        let mut tryouts = lock(&self.tryouts, "tryout").map_err(TryoutRepositoryError::query)?;
        upsert(&mut tryouts, tryout.clone(), |t| t.id == tryout.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &TryoutId) -> Result<Option<Tryout>, TryoutRepositoryError> {
        Ok(self.collect(|t| t.id == *id)?.into_iter().next())
    }

    async fn list_by_project(
        &self,
        project_id: &ProjectId,
        status: Option<TryoutStatus>,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError> {
        self.collect(|t| t.project_id == *project_id && status_matches(t, status))
    }

    async fn list_by_applicant(
        &self,
        applicant_id: &UserId,
        status: Option<TryoutStatus>,
    ) -> Result<Vec<Tryout>, TryoutRepositoryError> {
        self.collect(|t| t.applicant_id == *applicant_id && status_matches(t, status))
    }

    async fn delete(&self, id: &TryoutId) -> Result<(), TryoutRepositoryError> {
        self.remove(|t| t.id == *id)
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), TryoutRepositoryError> {
        self.remove(|t| t.project_id == *project_id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    use crate::domain::{ResumeId, ResumeSnapshot};

    fn tryout(project_id: ProjectId, applicant: UserId) -> Tryout {
        let resume = ResumeSnapshot {
            id: ResumeId::random(),
            owner_id: applicant,
            display_name: "Grace".to_owned(),
            self_description: None,
            profile_image: None,
        };
        Tryout::apply(project_id, &resume, "Frontend", Utc::now()).expect("valid tryout")
    }

    #[rstest]
    #[tokio::test]
    async fn status_filter_narrows_project_listing() {
        let store = InMemoryTryoutRepository::new();
        let project_id = ProjectId::random();
        let pending = tryout(project_id, UserId::random());
        let mut accepted = tryout(project_id, UserId::random());
        accepted.transition(TryoutStatus::Accepted, Utc::now());
        store.save(&pending).await.expect("save");
        store.save(&accepted).await.expect("save");
        store
            .save(&tryout(ProjectId::random(), UserId::random()))
            .await
            .expect("save");

        let all = store
            .list_by_project(&project_id, None)
            .await
            .expect("list");
        assert_eq!(
            all.iter().map(|t| t.id).collect::<Vec<_>>(),
            [pending.id, accepted.id]
        );
        let only_accepted = store
            .list_by_project(&project_id, Some(TryoutStatus::Accepted))
            .await
            .expect("list");
        assert_eq!(only_accepted.len(), 1);
        assert_eq!(only_accepted[0].id, accepted.id);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_project_keeps_other_projects() {
        let store = InMemoryTryoutRepository::new();
        let applicant = UserId::random();
        let doomed = tryout(ProjectId::random(), applicant);
        let kept = tryout(ProjectId::random(), applicant);
        store.save(&doomed).await.expect("save");
        store.save(&kept).await.expect("save");

        store
            .delete_by_project(&doomed.project_id)
            .await
            .expect("delete");

        let remaining = store
            .list_by_applicant(&applicant, Some(TryoutStatus::InReview))
            .await
            .expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }
}
