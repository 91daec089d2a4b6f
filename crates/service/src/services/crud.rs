use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::{Record, Repository};

/// Caller-supplied creation input for one record type. The store assigns the id.
pub trait Draft: Send {
    type Record: Record;

    fn into_record(self) -> Self::Record;
}

/// Create/read/list/update/delete over one repository, shared by every entity service.
///
/// Every missing id is reported as [`ServiceError::NotFound`].
pub struct CrudService<M: Record> {
    repo: Arc<dyn Repository<M>>,
}

impl<M: Record> CrudService<M> {
    pub fn new(repo: Arc<dyn Repository<M>>) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, fields(entity = M::ENTITY))]
    pub async fn create<D>(&self, draft: D) -> Result<M, ServiceError>
    where
        D: Draft<Record = M>,
    {
        let created = self.repo.create(draft.into_record()).await?;
        info!(entity = M::ENTITY, id = created.id(), "created");
        Ok(created)
    }

    #[instrument(skip(self), fields(entity = M::ENTITY))]
    pub async fn get(&self, id: i32) -> Result<M, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(M::ENTITY, id))
    }

    pub async fn list(&self) -> Result<Vec<M>, ServiceError> {
        self.repo.find_all().await
    }

    /// Load, apply `change`, and write the record back. The id is restored
    /// after `change` runs.
    #[instrument(skip(self, change), fields(entity = M::ENTITY))]
    pub async fn update<F>(&self, id: i32, change: F) -> Result<M, ServiceError>
    where
        F: FnOnce(&mut M) + Send,
    {
        let mut record = self.get(id).await?;
        change(&mut record);
        record.set_id(id);
        let updated = self.repo.save(record).await?;
        info!(entity = M::ENTITY, id, "updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(entity = M::ENTITY))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found(M::ENTITY, id));
        }
        self.repo.delete_by_id(id).await?;
        info!(entity = M::ENTITY, id, "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRepository;
    use crate::test_support::FailingRepository;
    use models::tray;

    struct TrayDraft(&'static str);

    impl Draft for TrayDraft {
        type Record = tray::Model;

        fn into_record(self) -> tray::Model {
            tray::Model { id: 0, part_type: self.0.into(), max_weight: 30.0 }
        }
    }

    fn service() -> CrudService<tray::Model> {
        CrudService::new(Arc::new(MemoryRepository::<tray::Model>::new()))
    }

    #[tokio::test]
    async fn get_round_trips_created_record() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(TrayDraft("Leg")).await?;
        assert_eq!(svc.get(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_not_found_and_keeps_rows() -> Result<(), anyhow::Error> {
        let svc = service();
        svc.create(TrayDraft("Leg")).await?;
        let err = svc.delete(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Tray with ID 404 not found"));
        assert_eq!(svc.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_cannot_move_a_record() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.create(TrayDraft("Leg")).await?;
        let updated = svc
            .update(created.id, |t| {
                t.id = 77;
                t.max_weight = 12.0;
            })
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(svc.get(created.id).await?.max_weight, 12.0);
        assert!(matches!(svc.update(9, |_| {}).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn storage_faults_propagate() {
        let svc = CrudService::<tray::Model>::new(Arc::new(FailingRepository));
        assert!(matches!(svc.create(TrayDraft("Leg")).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.get(1).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.list().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.delete(1).await, Err(ServiceError::Db(_))));
    }
}
