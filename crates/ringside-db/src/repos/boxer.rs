//! Boxer repository
//!
//! The registry of boxer profiles. Every name lookup goes through the
//! `name_key` column, which holds [`ringside_types::name_key`] of the name.

use chrono::Utc;
use ringside_types::{name_key, NewBoxer};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::{DbBoxer, DbError, DbResult};

const BOXER_COLUMNS: &str = "id, name, weight, height, reach, age, wins, losses, created_at";

/// Boxer repository for registration, lookup and fight records
#[derive(Clone)]
pub struct BoxerRepo {
    pool: SqlitePool,
}

impl BoxerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new boxer with an empty record
    pub async fn register(&self, input: &NewBoxer) -> DbResult<DbBoxer> {
        input.validate()?;
        let name = input.normalized_name();
        let key = name_key(name);

        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM boxers WHERE name_key = ?")
            .bind(&key)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            warn!(boxer = %name, "Boxer already exists");
            return Err(DbError::Duplicate(name.to_string()));
        }

        let boxer = sqlx::query_as::<_, DbBoxer>(&format!(
            r#"
            INSERT INTO boxers (name, name_key, weight, height, reach, age, wins, losses, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?)
            RETURNING {BOXER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(&key)
        .bind(input.weight)
        .bind(input.height)
        .bind(input.reach)
        .bind(input.age)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DbError::Duplicate(name.to_string());
                }
            }
            DbError::Query(e)
        })?;

        tx.commit().await?;

        info!(boxer = %boxer.name, id = boxer.id, "Registered boxer");
        Ok(boxer)
    }

    /// Find boxer by name
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<DbBoxer>> {
        let boxer = sqlx::query_as::<_, DbBoxer>(&format!(
            "SELECT {BOXER_COLUMNS} FROM boxers WHERE name_key = ?"
        ))
        .bind(name_key(name))
        .fetch_optional(&self.pool)
        .await?;
        Ok(boxer)
    }

    /// Get boxer by name, failing if it does not exist
    pub async fn get(&self, name: &str) -> DbResult<DbBoxer> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Boxer '{}'", name.trim())))
    }

    /// Find boxer by ID
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<DbBoxer>> {
        let boxer = sqlx::query_as::<_, DbBoxer>(&format!(
            "SELECT {BOXER_COLUMNS} FROM boxers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(boxer)
    }

    /// Get boxer by ID, failing if it does not exist
    pub async fn get_by_id(&self, id: i64) -> DbResult<DbBoxer> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("Boxer with ID {}", id)))
    }

    /// All boxers, ordered by name
    pub async fn list(&self) -> DbResult<Vec<DbBoxer>> {
        let boxers = sqlx::query_as::<_, DbBoxer>(&format!(
            "SELECT {BOXER_COLUMNS} FROM boxers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(boxers)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boxers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Credit one win to `winner` and one loss to `loser` in a single transaction.
    ///
    /// If either boxer is missing the transaction is dropped before commit,
    /// so neither counter moves.
    pub async fn record_result(&self, winner: &str, loser: &str) -> DbResult<(DbBoxer, DbBoxer)> {
        if ringside_types::same_name(winner, loser) {
            return Err(ringside_types::RingsideError::invalid_attribute(
                "loser",
                format!("'{}' cannot fight themselves", loser),
            )
            .into());
        }

        let mut tx = self.pool.begin().await?;

        let winner_row = sqlx::query_as::<_, DbBoxer>(&format!(
            "UPDATE boxers SET wins = wins + 1 WHERE name_key = ? RETURNING {BOXER_COLUMNS}"
        ))
        .bind(name_key(winner))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Boxer '{}'", winner.trim())))?;

        let loser_row = sqlx::query_as::<_, DbBoxer>(&format!(
            "UPDATE boxers SET losses = losses + 1 WHERE name_key = ? RETURNING {BOXER_COLUMNS}"
        ))
        .bind(name_key(loser))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("Boxer '{}'", loser.trim())))?;

        tx.commit().await?;

        debug!(
            winner = %winner_row.name,
            wins = winner_row.wins,
            loser = %loser_row.name,
            losses = loser_row.losses,
            "Recorded fight result"
        );
        Ok((winner_row, loser_row))
    }

    /// Delete every boxer. Returns the number of rows removed.
    pub async fn clear_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM boxers").execute(&self.pool).await?;
        info!(removed = result.rows_affected(), "Cleared all boxers");
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use ringside_types::RingsideError;

    async fn repo() -> BoxerRepo {
        Database::in_memory().await.unwrap().boxer_repo()
    }

    fn smokey(name: &str) -> NewBoxer {
        NewBoxer::new(name, 180, 70, 72.5, 28)
    }

    #[tokio::test]
    async fn test_register_starts_with_empty_record() {
        let repo = repo().await;
        let boxer = repo.register(&smokey("SmokeyOne")).await.unwrap();
        assert_eq!(boxer.name, "SmokeyOne");
        assert_eq!(boxer.reach, 72.5);
        assert_eq!((boxer.wins, boxer.losses), (0, 0));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_insensitive() {
        let repo = repo().await;
        repo.register(&smokey("SmokeyOne")).await.unwrap();

        let other_attrs = NewBoxer::new("smokeyone", 200, 75, 80.0, 33);
        let err = repo.register(&other_attrs).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_folds_non_ascii_case() {
        let repo = repo().await;
        repo.register(&smokey("Émile")).await.unwrap();

        let err = repo.register(&smokey("émile")).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
        assert_eq!(repo.count().await.unwrap(), 1);

        assert_eq!(repo.get("ÉMILE").await.unwrap().name, "Émile");
        repo.register(&smokey("Tyson")).await.unwrap();
        let (winner, _) = repo.record_result("émile", "Tyson").await.unwrap();
        assert_eq!(winner.wins, 1);
    }

    #[tokio::test]
    async fn test_invalid_attributes_are_rejected() {
        let repo = repo().await;
        let err = repo.register(&NewBoxer::new("Ghost", 0, 70, 72.5, 28)).await.unwrap_err();
        assert!(matches!(
            RingsideError::from(err),
            RingsideError::InvalidAttributes { .. }
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lookup_by_name_and_id() {
        let repo = repo().await;
        let created = repo.register(&smokey("Ali")).await.unwrap();

        assert_eq!(repo.get("ALI").await.unwrap().id, created.id);
        assert_eq!(repo.get_by_id(created.id).await.unwrap().name, "Ali");
        assert!(matches!(repo.get("Tyson").await, Err(DbError::NotFound(_))));
        assert!(matches!(repo.get_by_id(999).await, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_record_result_updates_both_boxers() {
        let repo = repo().await;
        repo.register(&smokey("Ali")).await.unwrap();
        repo.register(&smokey("Tyson")).await.unwrap();
        repo.register(&smokey("Rocky")).await.unwrap();

        let (winner, loser) = repo.record_result("Ali", "tyson").await.unwrap();
        assert_eq!((winner.wins, winner.losses), (1, 0));
        assert_eq!((loser.wins, loser.losses), (0, 1));

        let bystander = repo.get("Rocky").await.unwrap();
        assert_eq!((bystander.wins, bystander.losses), (0, 0));
    }

    #[tokio::test]
    async fn test_record_result_is_all_or_nothing() {
        let repo = repo().await;
        repo.register(&smokey("Ali")).await.unwrap();

        let err = repo.record_result("Ali", "Nobody").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));

        let ali = repo.get("Ali").await.unwrap();
        assert_eq!(ali.wins, 0, "winner increment must roll back");
    }

    #[tokio::test]
    async fn test_record_result_rejects_self_fight() {
        let repo = repo().await;
        repo.register(&smokey("Ali")).await.unwrap();
        assert!(matches!(
            repo.record_result("Ali", "ali").await,
            Err(DbError::Rejected(RingsideError::InvalidAttributes { .. }))
        ));
    }

    #[tokio::test]
    async fn test_clear_all_allows_name_reuse() {
        let repo = repo().await;
        repo.register(&smokey("Ali")).await.unwrap();
        repo.register(&smokey("Tyson")).await.unwrap();

        assert_eq!(repo.clear_all().await.unwrap(), 2);
        assert!(repo.list().await.unwrap().is_empty());
        repo.register(&smokey("Ali")).await.unwrap();
    }
}
