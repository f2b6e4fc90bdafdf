//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /api/pets`.
///
/// Page values stay raw strings so that malformed input reaches the
/// pagination rules (fallback or `INVALID_PAGE`) instead of failing
/// extraction.
#[derive(Debug, Default, Deserialize)]
pub struct PetListParams {
    /// Case-insensitive exact trait name to filter by.
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
    /// 1-based page number, or `last`.
    pub pagina: Option<String>,
    /// Requested page size, clamped to the maximum.
    pub page_size: Option<String>,
}

impl PetListParams {
    /// The trait filter, ignoring blank values.
    pub fn trait_filter(&self) -> Option<&str> {
        self.trait_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
