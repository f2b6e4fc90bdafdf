//! Trait (characteristic) model and DTOs.

use petkare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `traits` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Trait {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A trait joined with the pet it is attached to.
#[derive(Debug, Clone, FromRow)]
pub struct PetTraitRow {
    pub pet_id: DbId,
    #[sqlx(flatten)]
    pub pet_trait: Trait,
}

/// Nested trait payload inside a pet write. Created on first use.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TraitInput {
    #[validate(
        required,
        length(max = 20),
        custom(function = "petkare_core::validation::not_blank")
    )]
    pub name: Option<String>,
}

impl TraitInput {
    /// The trimmed trait name, once validation has passed.
    pub fn normalized_name(&self) -> Option<String> {
        self.name.as_deref().map(|n| n.trim().to_string())
    }
}
