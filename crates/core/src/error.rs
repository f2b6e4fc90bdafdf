use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Field-level constraint failures, keyed by field path.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(FieldErrors),

    #[error("Invalid page.")]
    InvalidPage,
}
