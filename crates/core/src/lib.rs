//! Domain-level building blocks shared by the database and API crates.
//!
//! Nothing in here touches the database or HTTP: error kinds, pagination
//! arithmetic and validation error flattening.

pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
