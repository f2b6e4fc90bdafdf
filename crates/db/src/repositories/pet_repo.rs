//! Repository for the `pets` table.
//!
//! Writes that touch more than one table run in a single transaction: the
//! group upsert, the pet row and the trait links either all land or none do.

use std::collections::HashMap;

use petkare_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::Group;
use crate::models::pet::{NewPet, Pet, PetChanges, PetDetail};
use crate::models::pet_trait::Trait;
use crate::repositories::{GroupRepo, TraitRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, age, weight, sex, group_id, created_at";

/// Optional case-insensitive trait filter. `$1` is NULL when unfiltered.
const TRAIT_FILTER: &str = "($1::TEXT IS NULL OR EXISTS ( \
        SELECT 1 FROM pet_traits pt \
        JOIN traits t ON t.id = pt.trait_id \
        WHERE pt.pet_id = pets.id AND LOWER(t.name) = LOWER($1)))";

/// Provides CRUD operations for pets and their trait links.
pub struct PetRepo;

impl PetRepo {
    /// Insert a pet, resolving its group and traits by name, and return it
    /// fully expanded.
    pub async fn create(pool: &PgPool, input: &NewPet) -> Result<PetDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let group = GroupRepo::create_or_get(&mut *tx, &input.group_name).await?;

        let query = format!(
            "INSERT INTO pets (name, age, weight, sex, group_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let pet = sqlx::query_as::<_, Pet>(&query)
            .bind(&input.name)
            .bind(input.age)
            .bind(input.weight)
            .bind(input.sex)
            .bind(group.id)
            .fetch_one(&mut *tx)
            .await?;

        let trait_ids = Self::resolve_traits(&mut tx, &input.trait_names).await?;
        Self::set_traits_inner(&mut tx, pet.id, &trait_ids).await?;

        tx.commit().await?;

        Self::expand_one(pool, pet).await
    }

    /// Find a pet row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1");
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a pet by ID, expanded with its group and traits.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PetDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(pet) => Ok(Some(Self::expand_one(pool, pet).await?)),
            None => Ok(None),
        }
    }

    /// Count pets, optionally restricted to those carrying `trait_name`.
    pub async fn count(pool: &PgPool, trait_name: Option<&str>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM pets WHERE {TRAIT_FILTER}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(trait_name)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// One page of pets in insertion order, optionally restricted to those
    /// carrying `trait_name`, each expanded with group and traits.
    pub async fn list_page(
        pool: &PgPool,
        trait_name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PetDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets \
             WHERE {TRAIT_FILTER} \
             ORDER BY id \
             LIMIT $2 OFFSET $3"
        );
        let pets = sqlx::query_as::<_, Pet>(&query)
            .bind(trait_name)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Self::expand(pool, pets).await
    }

    /// Apply a partial update. Only `Some` fields are written.
    ///
    /// A supplied group name is resolved (or created) and reassigned; supplied
    /// trait names replace the whole trait set. Returns `None` if no pet with
    /// the given `id` exists, in which case nothing is written.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &PetChanges,
    ) -> Result<Option<PetDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let group_id = match &changes.group_name {
            Some(name) => Some(GroupRepo::create_or_get(&mut *tx, name).await?.id),
            None => None,
        };

        let query = format!(
            "UPDATE pets SET \
                name = COALESCE($2, name), \
                age = COALESCE($3, age), \
                weight = COALESCE($4, weight), \
                sex = COALESCE($5, sex), \
                group_id = COALESCE($6, group_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let pet = sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.age)
            .bind(changes.weight)
            .bind(changes.sex)
            .bind(group_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(pet) = pet else {
            // Dropping the transaction rolls back any group created above.
            return Ok(None);
        };

        if let Some(names) = &changes.trait_names {
            let trait_ids = Self::resolve_traits(&mut tx, names).await?;
            Self::set_traits_inner(&mut tx, pet.id, &trait_ids).await?;
        }

        tx.commit().await?;

        Ok(Some(Self::expand_one(pool, pet).await?))
    }

    /// Delete a pet by ID. Its trait links go with it; groups and traits stay.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Expansion
    // -----------------------------------------------------------------------

    /// Attach group and traits to each pet, preserving input order.
    ///
    /// Issues two queries regardless of how many pets are passed.
    pub async fn expand(pool: &PgPool, pets: Vec<Pet>) -> Result<Vec<PetDetail>, sqlx::Error> {
        if pets.is_empty() {
            return Ok(Vec::new());
        }

        let pet_ids: Vec<DbId> = pets.iter().map(|p| p.id).collect();
        let mut group_ids: Vec<DbId> = pets.iter().map(|p| p.group_id).collect();
        group_ids.sort_unstable();
        group_ids.dedup();

        let groups: HashMap<DbId, Group> = GroupRepo::find_many(pool, &group_ids)
            .await?
            .into_iter()
            .map(|g| (g.id, g))
            .collect();

        let mut traits: HashMap<DbId, Vec<Trait>> = HashMap::new();
        for row in TraitRepo::list_for_pets(pool, &pet_ids).await? {
            traits.entry(row.pet_id).or_default().push(row.pet_trait);
        }

        pets.into_iter()
            .map(|pet| -> Result<PetDetail, sqlx::Error> {
                let group = groups
                    .get(&pet.group_id)
                    .cloned()
                    .ok_or(sqlx::Error::RowNotFound)?;
                let pet_traits = traits.remove(&pet.id).unwrap_or_default();
                Ok(PetDetail::new(pet, group, pet_traits))
            })
            .collect()
    }

    async fn expand_one(pool: &PgPool, pet: Pet) -> Result<PetDetail, sqlx::Error> {
        Self::expand(pool, vec![pet])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Upsert each trait name within the transaction, returning their IDs.
    ///
    /// Each upsert holds a row lock until commit, so names are visited in
    /// case-insensitive sorted order: concurrent writers naming the same
    /// traits then lock them in the same sequence and cannot deadlock.
    async fn resolve_traits(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        names: &[String],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut ids = Vec::with_capacity(names.len());
        for name in lock_order(names) {
            let resolved = TraitRepo::create_or_get(&mut **tx, name).await?;
            ids.push(resolved.id);
        }
        Ok(ids)
    }

    /// Replace a pet's trait links within an existing transaction.
    ///
    /// Deletes existing links, then inserts the new set. Duplicate IDs
    /// collapse to one link.
    async fn set_traits_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        pet_id: DbId,
        trait_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM pet_traits WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&mut **tx)
            .await?;

        if trait_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO pet_traits (pet_id, trait_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(pet_id)
        .bind(trait_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

/// Names deduplicated and sorted by their lowercase form, first spelling wins.
fn lock_order(names: &[String]) -> Vec<&str> {
    let mut keyed: Vec<(String, &str)> = names
        .iter()
        .map(|name| (name.to_lowercase(), name.as_str()))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|later, earlier| later.0 == earlier.0);
    keyed.into_iter().map(|(_, name)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn lock_order_ignores_payload_order() {
        let forward = owned(&["Loyal", "Calm"]);
        let backward = owned(&["Calm", "Loyal"]);
        assert_eq!(lock_order(&forward), lock_order(&backward));
        assert_eq!(lock_order(&forward), vec!["Calm", "Loyal"]);
    }

    #[test]
    fn lock_order_collapses_case_variants() {
        let names = owned(&["loyal", "Calm", "LOYAL"]);
        assert_eq!(lock_order(&names), vec!["Calm", "loyal"]);
    }
}
