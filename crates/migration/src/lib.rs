//! Migrator registering one table per entity collection.
//! Tables carry no foreign keys: references between collections are not enforced.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_animal;
mod m20240301_000002_create_animal_part;
mod m20240301_000003_create_product;
mod m20240301_000004_create_product_to_part;
mod m20240301_000005_create_tray;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_animal::Migration),
            Box::new(m20240301_000002_create_animal_part::Migration),
            Box::new(m20240301_000003_create_product::Migration),
            Box::new(m20240301_000004_create_product_to_part::Migration),
            Box::new(m20240301_000005_create_tray::Migration),
        ]
    }
}
