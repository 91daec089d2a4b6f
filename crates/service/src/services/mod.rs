//! Entity services: one per record type, each over its own repository.
//!
//! Services share no state. Cross-entity references (part → animal,
//! mapping → product/part) are never checked and deletes never cascade.

pub mod crud;
pub mod animal;
pub mod animal_part;
pub mod product;
pub mod product_to_part;
pub mod tray;

use std::{path::Path, sync::Arc};

use models::{
    animal as animal_model, animal_part as part_model, product as product_model,
    product_to_part as mapping_model, tray as tray_model,
};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::storage::{JsonFileRepository, MemoryRepository, SeaOrmRepository};

pub use animal::{AnimalService, AnimalUpdate, NewAnimal};
pub use animal_part::{AnimalPartService, NewAnimalPart};
pub use crud::{CrudService, Draft};
pub use product::{NewProduct, ProductService};
pub use product_to_part::{NewMapping, ProductToPartMappingService};
pub use tray::{NewTray, TrayService};

/// The five entity services, each constructed around an explicit storage handle.
#[derive(Clone)]
pub struct Services {
    pub animals: Arc<AnimalService>,
    pub animal_parts: Arc<AnimalPartService>,
    pub products: Arc<ProductService>,
    pub mappings: Arc<ProductToPartMappingService>,
    pub trays: Arc<TrayService>,
}

impl Services {
    pub fn in_memory(server_assigned_arrival_time: bool) -> Self {
        let animals = MemoryRepository::<animal_model::Model>::new();
        let parts = MemoryRepository::<part_model::Model>::new();
        let products = MemoryRepository::<product_model::Model>::new();
        let mappings = MemoryRepository::<mapping_model::Model>::new();
        let trays = MemoryRepository::<tray_model::Model>::new();
        Self {
            animals: Arc::new(AnimalService::new(Arc::new(animals), server_assigned_arrival_time)),
            animal_parts: Arc::new(AnimalPartService::new(Arc::new(parts))),
            products: Arc::new(ProductService::new(Arc::new(products))),
            mappings: Arc::new(ProductToPartMappingService::new(Arc::new(mappings))),
            trays: Arc::new(TrayService::new(Arc::new(trays))),
        }
    }

    /// One JSON file per collection under `data_dir`, which is created if
    /// missing.
    pub async fn file_backed(
        data_dir: &Path,
        server_assigned_arrival_time: bool,
    ) -> Result<Self, ServiceError> {
        let path = |file: &str| data_dir.join(file);
        let animals = JsonFileRepository::<animal_model::Model>::open(path("animals.json")).await?;
        let parts = JsonFileRepository::<part_model::Model>::open(path("animal_parts.json")).await?;
        let products =
            JsonFileRepository::<product_model::Model>::open(path("products.json")).await?;
        let mappings =
            JsonFileRepository::<mapping_model::Model>::open(path("product_to_part.json")).await?;
        let trays = JsonFileRepository::<tray_model::Model>::open(path("trays.json")).await?;
        Ok(Self {
            animals: Arc::new(AnimalService::new(Arc::new(animals), server_assigned_arrival_time)),
            animal_parts: Arc::new(AnimalPartService::new(Arc::new(parts))),
            products: Arc::new(ProductService::new(Arc::new(products))),
            mappings: Arc::new(ProductToPartMappingService::new(Arc::new(mappings))),
            trays: Arc::new(TrayService::new(Arc::new(trays))),
        })
    }

    /// SeaORM tables; the schema must already be migrated.
    pub fn with_database(db: DatabaseConnection, server_assigned_arrival_time: bool) -> Self {
        let animals = SeaOrmRepository::<animal_model::ActiveModel>::new(db.clone());
        let parts = SeaOrmRepository::<part_model::ActiveModel>::new(db.clone());
        let products = SeaOrmRepository::<product_model::ActiveModel>::new(db.clone());
        let mappings = SeaOrmRepository::<mapping_model::ActiveModel>::new(db.clone());
        let trays = SeaOrmRepository::<tray_model::ActiveModel>::new(db);
        Self {
            animals: Arc::new(AnimalService::new(Arc::new(animals), server_assigned_arrival_time)),
            animal_parts: Arc::new(AnimalPartService::new(Arc::new(parts))),
            products: Arc::new(ProductService::new(Arc::new(products))),
            mappings: Arc::new(ProductToPartMappingService::new(Arc::new(mappings))),
            trays: Arc::new(TrayService::new(Arc::new(trays))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    async fn exercise(services: &Services) -> Result<(), anyhow::Error> {
        let pig = NewAnimal {
            registration_number: "DK-1".into(),
            weight: 80.0,
            origin: "Pig".into(),
            arrival_time: None,
        };
        let pig = services.animals.create(pig).await?;
        assert_eq!(pig.id, 1);
        let leg = NewAnimalPart { animal_id: pig.id, part_type: "Leg".into(), weight: 12.5 };
        let leg = services.animal_parts.create(leg).await?;
        let sausage = NewProduct { name: "Sausage".into(), description: String::new() };
        let sausage = services.products.create(sausage).await?;
        let mapping = NewMapping { product_id: sausage.id, part_id: leg.id, quantity: 3 };
        let mapping = services.mappings.create(mapping).await?;
        services.trays.create(NewTray { part_type: "Leg".into(), max_weight: 40.0 }).await?;

        // no cascade in either direction
        services.products.delete(sausage.id).await?;
        services.animals.delete(pig.id).await?;
        assert_eq!(services.mappings.list().await?, vec![mapping]);
        assert_eq!(services.animal_parts.get(leg.id).await?, leg);
        Ok(())
    }

    #[tokio::test]
    async fn memory_services_do_not_cascade() -> Result<(), anyhow::Error> {
        exercise(&Services::in_memory(true)).await
    }

    #[tokio::test]
    async fn database_services_do_not_cascade() -> Result<(), anyhow::Error> {
        exercise(&Services::with_database(get_db().await?, true)).await
    }

    #[tokio::test]
    async fn file_services_do_not_cascade() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("slaughterhouse_{}", uuid::Uuid::new_v4()));
        // data dir and its parents do not exist yet
        let dir = root.join("nested").join("data");
        exercise(&Services::file_backed(&dir, true).await?).await?;
        assert!(tokio::fs::try_exists(dir.join("trays.json")).await?);
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
