//! In-memory [`MemberRepository`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{MemberId, Membership, ProjectId, UserId};

use super::{lock, upsert};

/// Membership store; roster replacement happens under a single lock.
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    members: Mutex<Vec<Membership>>,
}

impl InMemoryMemberRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn collect(
        &self,
        keep: impl Fn(&Membership) -> bool,
    ) -> Result<Vec<Membership>, MemberRepositoryError> {
        let members = lock(&self.members, "member").map_err(MemberRepositoryError::query)?;
        Ok(members.iter().filter(|m| keep(m)).cloned().collect())
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, member: &Membership) -> Result<(), MemberRepositoryError> {
        let mut members = lock(&self.members, "member").map_err(MemberRepositoryError::query)?;
        upsert(&mut members, member.clone(), |m| m.id == member.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Membership>, MemberRepositoryError> {
        Ok(self.collect(|m| m.id == *id)?.into_iter().next())
    }

    async fn list_by_project_ids(
        &self,
        project_ids: &[ProjectId],
    ) -> Result<Vec<Membership>, MemberRepositoryError> {
        self.collect(|m| project_ids.contains(&m.project_id))
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Membership>, MemberRepositoryError> {
        self.collect(|m| m.user_id == *user_id)
    }

    async fn delete(&self, id: &MemberId) -> Result<(), MemberRepositoryError> {
        let mut members = lock(&self.members, "member").map_err(MemberRepositoryError::query)?;
        members.retain(|m| m.id != *id);
        Ok(())
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), MemberRepositoryError> {
        let mut members = lock(&self.members, "member").map_err(MemberRepositoryError::query)?;
        members.retain(|m| m.project_id != *project_id);
        Ok(())
    }

    async fn replace_for_project(
        &self,
        project_id: &ProjectId,
        replacement: Vec<Membership>,
    ) -> Result<(), MemberRepositoryError> {
        let mut members = lock(&self.members, "member").map_err(MemberRepositoryError::query)?;
        members.retain(|m| m.project_id != *project_id);
        members.extend(replacement);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    use crate::domain::UserProfile;

    fn owner_member(project_id: ProjectId) -> Membership {
        let profile = UserProfile {
            id: UserId::random(),
            display_name: "Owner".to_owned(),
            profile_image: None,
        };
        Membership::for_owner(project_id, &profile, Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn replace_supersedes_only_the_target_project() {
        let store = InMemoryMemberRepository::new();
        let target = ProjectId::random();
        let other = ProjectId::random();
        let old = owner_member(target);
        let untouched = owner_member(other);
        store.save(&old).await.expect("save");
        store.save(&untouched).await.expect("save");

        let fresh = vec![owner_member(target), owner_member(target)];
        let fresh_ids: Vec<_> = fresh.iter().map(|m| m.id).collect();
        store
            .replace_for_project(&target, fresh)
            .await
            .expect("replace");

        let roster = store
            .list_by_project_ids(&[target])
            .await
            .expect("list");
        assert_eq!(roster.iter().map(|m| m.id).collect::<Vec<_>>(), fresh_ids);
        assert!(roster.iter().all(|m| m.id != old.id));
        assert!(store.find_by_id(&untouched.id).await.expect("lookup").is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_user_spans_projects() {
        let store = InMemoryMemberRepository::new();
        let first = owner_member(ProjectId::random());
        let mut second = owner_member(ProjectId::random());
        second.user_id = first.user_id;
        store.save(&first).await.expect("save");
        store.save(&second).await.expect("save");

        let held = store.list_by_user(&first.user_id).await.expect("list");
        assert_eq!(held.len(), 2);
    }
}
