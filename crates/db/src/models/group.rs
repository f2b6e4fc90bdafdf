//! Group (species) model and DTOs.

use petkare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `groups` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub scientific_name: String,
    pub created_at: Timestamp,
}

/// Nested group payload inside a pet write.
///
/// The group is resolved by case-insensitive scientific name and created on
/// first use.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupInput {
    #[validate(
        required,
        length(max = 50),
        custom(function = "petkare_core::validation::not_blank")
    )]
    pub scientific_name: Option<String>,
}

impl GroupInput {
    /// The trimmed scientific name, once validation has passed.
    pub fn normalized_name(&self) -> Option<String> {
        self.scientific_name.as_deref().map(|n| n.trim().to_string())
    }
}
