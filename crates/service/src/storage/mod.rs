//! Storage collaborator for the entity services.
//!
//! One generic [`Repository`] contract keyed by integer id, with in-memory,
//! JSON-file and SeaORM-backed implementations.

pub mod json_file;
pub mod memory;
pub mod seaorm;

use async_trait::async_trait;
use models::{animal, animal_part, product, product_to_part, tray};

use crate::errors::ServiceError;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use seaorm::SeaOrmRepository;

/// A stored record with a store-assigned integer id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in not-found messages and logs.
    const ENTITY: &'static str;

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

macro_rules! impl_record {
    ($model:ty, $name:literal) => {
        impl Record for $model {
            const ENTITY: &'static str = $name;

            fn id(&self) -> i32 {
                self.id
            }
            fn set_id(&mut self, id: i32) {
                self.id = id;
            }
        }
    };
}

impl_record!(animal::Model, "Animal");
impl_record!(animal_part::Model, "AnimalPart");
impl_record!(product::Model, "Product");
impl_record!(product_to_part::Model, "ProductToPart mapping");
impl_record!(tray::Model, "Tray");

/// Row store for one entity type.
///
/// Implementations must assign unique, never-reused ids under concurrent
/// `create` calls. Each method is a single atomic storage call.
#[async_trait]
pub trait Repository<M: Record>: Send + Sync {
    /// Persist a new record. The incoming id is ignored and replaced.
    async fn create(&self, record: M) -> Result<M, ServiceError>;
    /// Overwrite an existing record, keyed by its id.
    async fn save(&self, record: M) -> Result<M, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<M>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<M>, ServiceError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError>;
}
