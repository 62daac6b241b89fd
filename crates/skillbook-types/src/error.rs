use thiserror::Error;

use crate::skill::SkillId;

/// Errors related to skill operations.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Skill with id {0} not found")]
    NotFoundById(SkillId),

    #[error("Skill with name '{0}' not found")]
    NotFoundByName(String),

    #[error("skill '{0}' already exists")]
    Conflict(String),

    #[error("invalid skill name: {0}")]
    InvalidName(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in skillbook-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}
