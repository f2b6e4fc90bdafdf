//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any Postgres executor, where the call must be able to
//! join a caller's transaction) as the first argument.

pub mod group_repo;
pub mod pet_repo;
pub mod trait_repo;

pub use group_repo::GroupRepo;
pub use pet_repo::PetRepo;
pub use trait_repo::TraitRepo;
