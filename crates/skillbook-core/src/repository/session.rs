//! Transactional session traits for skill persistence.

use std::future::Future;

use skillbook_types::error::RepositoryError;
use skillbook_types::page::PageRequest;
use skillbook_types::skill::{LevelOfConfidence, NewSkill, Skill, SkillId};

use super::AccessMode;

/// One transactional unit of work against the skill store.
///
/// Every data-access operation runs inside the session. Changes become
/// visible to other sessions only after [`SkillSession::commit`]; dropping
/// a session without committing discards them.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SkillSession: Send {
    /// All skills in insertion order, optionally restricted to a window.
    fn list(
        &mut self,
        page: Option<PageRequest>,
    ) -> impl Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    /// Total number of stored skills.
    fn count(&mut self) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    /// Exact match on the primary key.
    fn get_by_id(
        &mut self,
        id: SkillId,
    ) -> impl Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Exact match on the unique name.
    fn get_by_name(
        &mut self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Insert a new skill and return it with its assigned id.
    ///
    /// Returns [`RepositoryError::Conflict`] when the name is already taken.
    fn create(
        &mut self,
        skill: &NewSkill,
    ) -> impl Future<Output = Result<Skill, RepositoryError>> + Send;

    /// Rename a skill. `Ok(None)` when no skill has that id.
    ///
    /// Returns [`RepositoryError::Conflict`] when `new_name` is already taken.
    fn update_name(
        &mut self,
        id: SkillId,
        new_name: &str,
    ) -> impl Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Change a skill's confidence level. `Ok(None)` when no skill has that id.
    fn update_level(
        &mut self,
        id: SkillId,
        level: LevelOfConfidence,
    ) -> impl Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Remove a skill. Removing a missing skill is a no-op.
    fn delete(&mut self, id: SkillId) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Make the session's changes durable.
    fn commit(self) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Discard the session's changes.
    fn rollback(self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Hands out sessions. Injected into the service at construction, so tests
/// can swap the production store for a temporary one.
pub trait SessionProvider: Send + Sync {
    type Session: SkillSession;

    /// Open a new session.
    fn begin(
        &self,
        mode: AccessMode,
    ) -> impl Future<Output = Result<Self::Session, RepositoryError>> + Send;
}
