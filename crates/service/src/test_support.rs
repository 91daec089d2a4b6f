#![cfg(test)]
use async_trait::async_trait;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::storage::{Record, Repository};

/// Fresh in-memory SQLite database with every migration applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Store whose every call fails, for exercising error propagation.
pub struct FailingRepository;

fn unavailable() -> ServiceError {
    ServiceError::Db("storage unavailable".into())
}

#[async_trait]
impl<M: Record> Repository<M> for FailingRepository {
    async fn create(&self, _record: M) -> Result<M, ServiceError> {
        Err(unavailable())
    }
    async fn save(&self, _record: M) -> Result<M, ServiceError> {
        Err(unavailable())
    }
    async fn find_by_id(&self, _id: i32) -> Result<Option<M>, ServiceError> {
        Err(unavailable())
    }
    async fn find_all(&self) -> Result<Vec<M>, ServiceError> {
        Err(unavailable())
    }
    async fn exists_by_id(&self, _id: i32) -> Result<bool, ServiceError> {
        Err(unavailable())
    }
    async fn delete_by_id(&self, _id: i32) -> Result<(), ServiceError> {
        Err(unavailable())
    }
}
