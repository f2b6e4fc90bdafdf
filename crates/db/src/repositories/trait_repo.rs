//! Repository for the `traits` table and its `pet_traits` junction.

use petkare_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::pet_trait::{PetTraitRow, Trait};

/// Column list for `traits` queries.
const COLUMNS: &str = "id, name, created_at";

/// Column list for `traits` joined through `pet_traits`.
const JOINED_COLUMNS: &str = "pt.pet_id, t.id, t.name, t.created_at";

/// Provides upsert and per-pet lookup operations for traits.
pub struct TraitRepo;

impl TraitRepo {
    /// Return the trait whose name matches case-insensitively, creating it if
    /// none exists. Same conflict handling as `GroupRepo::create_or_get`.
    pub async fn create_or_get<'e, E>(executor: E, name: &str) -> Result<Trait, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO traits (name) \
             VALUES ($1) \
             ON CONFLICT ((LOWER(name))) \
             DO UPDATE SET name = traits.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trait>(&query)
            .bind(name)
            .fetch_one(executor)
            .await
    }

    /// All traits attached to any pet in `pet_ids`, tagged with the owning pet.
    ///
    /// Ordered by pet, then trait ID.
    pub async fn list_for_pets(
        pool: &PgPool,
        pet_ids: &[DbId],
    ) -> Result<Vec<PetTraitRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM pet_traits pt \
             JOIN traits t ON t.id = pt.trait_id \
             WHERE pt.pet_id = ANY($1) \
             ORDER BY pt.pet_id, t.id"
        );
        sqlx::query_as::<_, PetTraitRow>(&query)
            .bind(pet_ids)
            .fetch_all(pool)
            .await
    }
}
