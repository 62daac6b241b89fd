//! SQLite session implementation.
//!
//! Implements `SessionProvider` and `SkillSession` from `skillbook-core`.
//! Each session wraps one `sqlx::Transaction`; read sessions run on the
//! reader pool, write sessions on the single writer connection. A session
//! dropped without `commit` is rolled back by sqlx.

use skillbook_core::repository::session::{SessionProvider, SkillSession};
use skillbook_core::repository::AccessMode;
use skillbook_types::error::RepositoryError;
use skillbook_types::page::PageRequest;
use skillbook_types::skill::{LevelOfConfidence, NewSkill, Skill, SkillId};
use sqlx::{Row, Sqlite, Transaction};

use super::pool::DatabasePool;

const SKILL_COLUMNS: &str = "skill_id, skill_name, level_of_confidence";

/// Opens SQLite-backed sessions from a [`DatabasePool`].
#[derive(Clone)]
pub struct SqliteSessionProvider {
    pool: DatabasePool,
}

impl SqliteSessionProvider {
    /// Create a new provider backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

/// One open SQLite transaction.
pub struct SqliteSession {
    tx: Transaction<'static, Sqlite>,
}

/// Internal row type for mapping SQLite rows to domain Skill.
struct SkillRow {
    skill_id: i64,
    skill_name: String,
    level_of_confidence: String,
}

impl SkillRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            skill_id: row.try_get("skill_id")?,
            skill_name: row.try_get("skill_name")?,
            level_of_confidence: row.try_get("level_of_confidence")?,
        })
    }

    fn into_skill(self) -> Result<Skill, RepositoryError> {
        let level_of_confidence: LevelOfConfidence = self
            .level_of_confidence
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Skill {
            skill_id: SkillId(self.skill_id),
            skill_name: self.skill_name,
            level_of_confidence,
        })
    }
}

fn row_to_skill(row: &sqlx::sqlite::SqliteRow) -> Result<Skill, RepositoryError> {
    SkillRow::from_row(row)
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .into_skill()
}

/// Map a failed write, turning UNIQUE violations on the name into conflicts.
fn write_error(e: sqlx::Error, name: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() || db_err.message().contains("UNIQUE") {
            return RepositoryError::Conflict(format!("skill '{name}' already exists"));
        }
    }
    RepositoryError::Query(e.to_string())
}

impl SessionProvider for SqliteSessionProvider {
    type Session = SqliteSession;

    async fn begin(&self, mode: AccessMode) -> Result<SqliteSession, RepositoryError> {
        let pool = match mode {
            AccessMode::Read => &self.pool.reader,
            AccessMode::Write => &self.pool.writer,
        };
        let tx = pool.begin().await.map_err(|e| match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => RepositoryError::Connection,
            other => RepositoryError::Query(other.to_string()),
        })?;
        Ok(SqliteSession { tx })
    }
}

impl SkillSession for SqliteSession {
    async fn list(&mut self, page: Option<PageRequest>) -> Result<Vec<Skill>, RepositoryError> {
        let rows = match page {
            Some(page) => {
                sqlx::query(&format!(
                    "SELECT {SKILL_COLUMNS} FROM skills ORDER BY skill_id LIMIT ? OFFSET ?"
                ))
                .bind(i64::try_from(page.limit).unwrap_or(i64::MAX))
                .bind(i64::try_from(page.offset).unwrap_or(i64::MAX))
                .fetch_all(&mut *self.tx)
                .await
            }
            None => {
                sqlx::query(&format!("SELECT {SKILL_COLUMNS} FROM skills ORDER BY skill_id"))
                    .fetch_all(&mut *self.tx)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(row_to_skill).collect()
    }

    async fn count(&mut self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM skills")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count.max(0) as u64)
    }

    async fn get_by_id(&mut self, id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE skill_id = ?"
        ))
        .bind(id.0)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(row_to_skill).transpose()
    }

    async fn get_by_name(&mut self, name: &str) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE skill_name = ?"
        ))
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(row_to_skill).transpose()
    }

    async fn create(&mut self, skill: &NewSkill) -> Result<Skill, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO skills (skill_name, level_of_confidence) VALUES (?, ?)",
        )
        .bind(&skill.skill_name)
        .bind(skill.level_of_confidence.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| write_error(e, &skill.skill_name))?;

        Ok(Skill {
            skill_id: SkillId(result.last_insert_rowid()),
            skill_name: skill.skill_name.clone(),
            level_of_confidence: skill.level_of_confidence,
        })
    }

    async fn update_name(
        &mut self,
        id: SkillId,
        new_name: &str,
    ) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query(&format!(
            "UPDATE skills SET skill_name = ? WHERE skill_id = ? RETURNING {SKILL_COLUMNS}"
        ))
        .bind(new_name)
        .bind(id.0)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| write_error(e, new_name))?;

        row.as_ref().map(row_to_skill).transpose()
    }

    async fn update_level(
        &mut self,
        id: SkillId,
        level: LevelOfConfidence,
    ) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query(&format!(
            "UPDATE skills SET level_of_confidence = ? WHERE skill_id = ? RETURNING {SKILL_COLUMNS}"
        ))
        .bind(level.as_str())
        .bind(id.0)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(row_to_skill).transpose()
    }

    async fn delete(&mut self, id: SkillId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM skills WHERE skill_id = ?")
            .bind(id.0)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            tracing::debug!(skill_id = %id, "delete matched no skill");
        }
        Ok(())
    }

    async fn commit(self) -> Result<(), RepositoryError> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillbook_core::service::skill::SkillService;
    use skillbook_types::error::SkillError;

    async fn test_provider() -> SqliteSessionProvider {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        SqliteSessionProvider::new(DatabasePool::new(&url).await.unwrap())
    }

    fn skill(name: &str, level: LevelOfConfidence) -> NewSkill {
        NewSkill::new(name, level)
    }

    async fn create_committed(provider: &SqliteSessionProvider, new: &NewSkill) -> Skill {
        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        let created = session.create(new).await.unwrap();
        session.commit().await.unwrap();
        created
    }

    #[tokio::test]
    async fn test_create_and_get_by_name() {
        let provider = test_provider().await;
        let python = skill("python", LevelOfConfidence::Level2);

        let created = create_committed(&provider, &python).await;
        assert_eq!(created.skill_id, SkillId(1));

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        let found = session.get_by_name("python").await.unwrap().unwrap();
        assert_eq!(found.skill_name, python.skill_name);
        assert_eq!(found.level_of_confidence, python.level_of_confidence);
        assert_eq!(found.skill_id, created.skill_id);
    }

    #[tokio::test]
    async fn test_get_on_empty_store() {
        let provider = test_provider().await;
        let mut session = provider.begin(AccessMode::Read).await.unwrap();

        assert!(session.get_by_id(SkillId(1)).await.unwrap().is_none());
        assert!(session.get_by_name("python").await.unwrap().is_none());
        assert!(session.list(None).await.unwrap().is_empty());
        assert_eq!(session.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_name_lookup_is_case_sensitive() {
        let provider = test_provider().await;
        create_committed(&provider, &skill("Python", LevelOfConfidence::Level1)).await;

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        assert!(session.get_by_name("python").await.unwrap().is_none());
        assert!(session.get_by_name("Python").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflict() {
        let provider = test_provider().await;
        let python = skill("python", LevelOfConfidence::Level2);
        create_committed(&provider, &python).await;

        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        let err = session.create(&python).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        session.rollback().await.unwrap();

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        assert_eq!(session.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order_with_window() {
        let provider = test_provider().await;
        let names = ["python", "typescript", "go", "rust"];
        for name in names {
            create_committed(&provider, &skill(name, LevelOfConfidence::Level1)).await;
        }

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        let all = session.list(None).await.unwrap();
        let listed: Vec<&str> = all.iter().map(|s| s.skill_name.as_str()).collect();
        assert_eq!(listed, names);

        let window = session.list(Some(PageRequest::new(1, 2))).await.unwrap();
        let listed: Vec<&str> = window.iter().map(|s| s.skill_name.as_str()).collect();
        assert_eq!(listed, ["typescript", "go"]);

        let past_end = session.list(Some(PageRequest::new(10, 5))).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_update_name() {
        let provider = test_provider().await;
        let created = create_committed(&provider, &skill("python", LevelOfConfidence::Level2)).await;

        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        let updated = session
            .update_name(created.skill_id, "rust")
            .await
            .unwrap()
            .unwrap();
        session.commit().await.unwrap();
        assert_eq!(updated.skill_id, created.skill_id);
        assert_eq!(updated.skill_name, "rust");

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        let found = session.get_by_id(created.skill_id).await.unwrap().unwrap();
        assert_eq!(found.skill_name, "rust");
        assert_eq!(found.level_of_confidence, LevelOfConfidence::Level2);
    }

    #[tokio::test]
    async fn test_update_name_missing_and_colliding() {
        let provider = test_provider().await;
        let python = create_committed(&provider, &skill("python", LevelOfConfidence::Level2)).await;
        create_committed(&provider, &skill("rust", LevelOfConfidence::Level3)).await;

        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        assert!(session.update_name(SkillId(99), "go").await.unwrap().is_none());
        let err = session.update_name(python.skill_id, "rust").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_level() {
        let provider = test_provider().await;
        let created = create_committed(&provider, &skill("python", LevelOfConfidence::Level1)).await;

        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        let updated = session
            .update_level(created.skill_id, LevelOfConfidence::Level3)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.level_of_confidence, LevelOfConfidence::Level3);
        assert!(
            session
                .update_level(SkillId(50), LevelOfConfidence::Level3)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_and_delete_nonexistent() {
        let provider = test_provider().await;
        let created = create_committed(&provider, &skill("python", LevelOfConfidence::Level1)).await;

        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        session.delete(SkillId(404)).await.unwrap();
        assert_eq!(session.count().await.unwrap(), 1);

        session.delete(created.skill_id).await.unwrap();
        session.commit().await.unwrap();

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        assert!(session.get_by_id(created.skill_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_uncommitted_session_is_rolled_back_on_drop() {
        let provider = test_provider().await;
        {
            let mut session = provider.begin(AccessMode::Write).await.unwrap();
            session
                .create(&skill("python", LevelOfConfidence::Level1))
                .await
                .unwrap();
        }

        let mut session = provider.begin(AccessMode::Read).await.unwrap();
        assert_eq!(session.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let provider = test_provider().await;
        let first = create_committed(&provider, &skill("python", LevelOfConfidence::Level1)).await;

        let mut session = provider.begin(AccessMode::Write).await.unwrap();
        session.delete(first.skill_id).await.unwrap();
        session.commit().await.unwrap();

        let second = create_committed(&provider, &skill("python", LevelOfConfidence::Level1)).await;
        assert!(second.skill_id > first.skill_id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_creates_with_same_name_admit_one() {
        let service = std::sync::Arc::new(SkillService::new(test_provider().await));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .create_skill(skill("python", LevelOfConfidence::Level1))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(SkillError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 31);

        let mut session = service.provider().begin(AccessMode::Read).await.unwrap();
        assert_eq!(session.count().await.unwrap(), 1);
    }
}
