//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request payloads
//! - The validated form handed to the repositories

pub mod group;
pub mod pet;
pub mod pet_trait;
pub mod sex;
