//! Repository for the `groups` table.

use petkare_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::group::Group;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, scientific_name, created_at";

/// Provides upsert and batch lookup operations for groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Return the group whose scientific name matches case-insensitively,
    /// creating it if none exists.
    ///
    /// Backed by the unique index on `LOWER(scientific_name)`, so concurrent
    /// callers converge on a single row. The stored casing is the first one
    /// seen; the no-op `DO UPDATE` makes `RETURNING` yield the existing row.
    pub async fn create_or_get<'e, E>(executor: E, scientific_name: &str) -> Result<Group, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO groups (scientific_name) \
             VALUES ($1) \
             ON CONFLICT ((LOWER(scientific_name))) \
             DO UPDATE SET scientific_name = groups.scientific_name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(scientific_name)
            .fetch_one(executor)
            .await
    }

    /// Fetch every group whose ID is in `ids`.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Group>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
