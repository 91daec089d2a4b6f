use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Record, Repository};
use crate::errors::ServiceError;

/// Process-local store. Ids start at 1 and are never reused.
pub struct MemoryRepository<M> {
    rows: RwLock<BTreeMap<i32, M>>,
    next_id: AtomicI32,
}

impl<M> MemoryRepository<M> {
    pub fn new() -> Self {
        Self { rows: RwLock::new(BTreeMap::new()), next_id: AtomicI32::new(1) }
    }
}

impl<M> Default for MemoryRepository<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: Record> Repository<M> for MemoryRepository<M> {
    async fn create(&self, mut record: M) -> Result<M, ServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.set_id(id);
        self.rows.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn save(&self, record: M) -> Result<M, ServiceError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(ServiceError::not_found(M::ENTITY, record.id())),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<M>, ServiceError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<M>, ServiceError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.rows.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}
