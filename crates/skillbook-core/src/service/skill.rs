//! Skill management service.
//!
//! Every public operation opens exactly one session from the injected
//! provider, performs one data-access call (plus a count for listings), and
//! commits on success. Early returns drop the session, which rolls it back.

use skillbook_types::error::{RepositoryError, SkillError};
use skillbook_types::page::{Page, PageRequest};
use skillbook_types::skill::{validate_skill_name, LevelOfConfidence, NewSkill, Skill, SkillId};

use crate::repository::session::{SessionProvider, SkillSession};
use crate::repository::AccessMode;

/// Service orchestrating the skill lifecycle.
///
/// Generic over the session provider to maintain clean architecture --
/// skillbook-core never depends on skillbook-infra.
pub struct SkillService<P: SessionProvider> {
    provider: P,
}

fn storage_error(e: RepositoryError) -> SkillError {
    SkillError::StorageError(e.to_string())
}

impl<P: SessionProvider> SkillService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The provider sessions are drawn from.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn begin(&self, mode: AccessMode) -> Result<P::Session, SkillError> {
        self.provider.begin(mode).await.map_err(storage_error)
    }

    /// Every skill, in insertion order.
    pub async fn get_skills(&self) -> Result<Vec<Skill>, SkillError> {
        let mut session = self.begin(AccessMode::Read).await?;
        let skills = session.list(None).await.map_err(storage_error)?;
        session.commit().await.map_err(storage_error)?;
        Ok(skills)
    }

    /// One page of skills plus the total count, read from a single snapshot.
    pub async fn list_skills(&self, page: PageRequest) -> Result<Page<Skill>, SkillError> {
        let mut session = self.begin(AccessMode::Read).await?;
        let total = session.count().await.map_err(storage_error)?;
        let items = session.list(Some(page)).await.map_err(storage_error)?;
        session.commit().await.map_err(storage_error)?;

        tracing::debug!(
            total,
            offset = page.offset,
            limit = page.limit,
            returned = items.len(),
            "listed skills"
        );

        Ok(Page {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    pub async fn get_skill_by_id(&self, id: SkillId) -> Result<Skill, SkillError> {
        let mut session = self.begin(AccessMode::Read).await?;
        let skill = session.get_by_id(id).await.map_err(storage_error)?;
        session.commit().await.map_err(storage_error)?;
        skill.ok_or(SkillError::NotFoundById(id))
    }

    pub async fn get_skill_by_name(&self, name: &str) -> Result<Skill, SkillError> {
        let mut session = self.begin(AccessMode::Read).await?;
        let skill = session.get_by_name(name).await.map_err(storage_error)?;
        session.commit().await.map_err(storage_error)?;
        skill.ok_or_else(|| SkillError::NotFoundByName(name.to_string()))
    }

    /// Create a new skill.
    ///
    /// The store's uniqueness constraint decides conflicts: there is no
    /// separate existence check, so two concurrent creates with the same name
    /// resolve to exactly one success and one [`SkillError::Conflict`].
    pub async fn create_skill(&self, new: NewSkill) -> Result<Skill, SkillError> {
        validate_skill_name(&new.skill_name).map_err(SkillError::InvalidName)?;

        let mut session = self.begin(AccessMode::Write).await?;
        let skill = match session.create(&new).await {
            Ok(skill) => skill,
            Err(RepositoryError::Conflict(_)) => {
                tracing::warn!(skill_name = %new.skill_name, "skill already exists");
                return Err(SkillError::Conflict(new.skill_name));
            }
            Err(e) => return Err(storage_error(e)),
        };
        session.commit().await.map_err(storage_error)?;

        tracing::info!(
            skill_id = %skill.skill_id,
            skill_name = %skill.skill_name,
            level = %skill.level_of_confidence,
            "skill created"
        );
        Ok(skill)
    }

    /// Rename an existing skill, keeping its id and level.
    pub async fn rename_skill(&self, id: SkillId, new_name: &str) -> Result<Skill, SkillError> {
        validate_skill_name(new_name).map_err(SkillError::InvalidName)?;

        let mut session = self.begin(AccessMode::Write).await?;
        let updated = match session.update_name(id, new_name).await {
            Ok(Some(skill)) => skill,
            Ok(None) => return Err(SkillError::NotFoundById(id)),
            Err(RepositoryError::Conflict(_)) => {
                tracing::warn!(skill_id = %id, new_name, "rename collides with an existing skill");
                return Err(SkillError::Conflict(new_name.to_string()));
            }
            Err(e) => return Err(storage_error(e)),
        };
        session.commit().await.map_err(storage_error)?;

        tracing::info!(skill_id = %id, new_name, "skill renamed");
        Ok(updated)
    }

    /// Change the confidence level of an existing skill.
    pub async fn set_skill_level(
        &self,
        id: SkillId,
        level: LevelOfConfidence,
    ) -> Result<Skill, SkillError> {
        let mut session = self.begin(AccessMode::Write).await?;
        let updated = session
            .update_level(id, level)
            .await
            .map_err(storage_error)?
            .ok_or(SkillError::NotFoundById(id))?;
        session.commit().await.map_err(storage_error)?;

        tracing::info!(skill_id = %id, %level, "skill level changed");
        Ok(updated)
    }

    /// Delete a skill. Deleting a skill that does not exist succeeds silently.
    pub async fn delete_skill(&self, id: SkillId) -> Result<(), SkillError> {
        let mut session = self.begin(AccessMode::Write).await?;
        session.delete(id).await.map_err(storage_error)?;
        session.commit().await.map_err(storage_error)?;

        tracing::info!(skill_id = %id, "skill deleted");
        Ok(())
    }
}
