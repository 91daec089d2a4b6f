//! Persisted record types, one SeaORM entity per collection.
pub mod db;
pub mod animal;
pub mod animal_part;
pub mod product;
pub mod product_to_part;
pub mod tray;
