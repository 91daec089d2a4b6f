//! Entity services for the slaughterhouse registry.
//! - `storage` holds the per-entity row stores (memory, JSON file, SeaORM).
//! - `services` holds the CRUD services and the animal read filters.
//! - Every operation reports failures as [`errors::ServiceError`].

pub mod errors;
pub mod services;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use services::Services;
