use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Iterable, PrimaryKeyToColumn, PrimaryKeyTrait,
};

use super::{Record, Repository};
use crate::errors::ServiceError;

type EntityOf<A> = <A as ActiveModelTrait>::Entity;
type ModelOf<A> = <EntityOf<A> as EntityTrait>::Model;
type PkValueOf<A> = <<EntityOf<A> as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// SeaORM-backed repository, generic over the entity's active model.
///
/// Ids come from the table's auto-increment primary key.
pub struct SeaOrmRepository<A> {
    db: DatabaseConnection,
    _active: PhantomData<fn() -> A>,
}

impl<A> SeaOrmRepository<A> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _active: PhantomData }
    }
}

#[async_trait]
impl<A> Repository<ModelOf<A>> for SeaOrmRepository<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + Sync + 'static,
    ModelOf<A>: Record + IntoActiveModel<A>,
    PkValueOf<A>: From<i32>,
{
    async fn create(&self, record: ModelOf<A>) -> Result<ModelOf<A>, ServiceError> {
        let mut am = record.into_active_model().reset_all();
        for key in <EntityOf<A> as EntityTrait>::PrimaryKey::iter() {
            am.not_set(key.into_column());
        }
        Ok(am.insert(&self.db).await?)
    }

    async fn save(&self, record: ModelOf<A>) -> Result<ModelOf<A>, ServiceError> {
        let id = record.id();
        match record.into_active_model().reset_all().update(&self.db).await {
            Ok(updated) => Ok(updated),
            Err(DbErr::RecordNotUpdated) => {
                Err(ServiceError::not_found(<ModelOf<A> as Record>::ENTITY, id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ModelOf<A>>, ServiceError> {
        Ok(A::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<ModelOf<A>>, ServiceError> {
        Ok(A::Entity::find().all(&self.db).await?)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(A::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        A::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::{FixedOffset, TimeZone};
    use models::{animal, animal_part};

    #[tokio::test]
    async fn seaorm_repository_crud() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmRepository::<animal_part::ActiveModel>::new(db);

        // submitted id is ignored
        let part = |id, part_type: &str, weight| animal_part::Model {
            id,
            animal_id: 1,
            part_type: part_type.into(),
            weight,
        };
        let leg = repo.create(part(99, "Leg", 12.5)).await?;
        let wing = repo.create(part(0, "Wing", 3.0)).await?;
        assert_eq!(leg.id, 1);
        assert_eq!(wing.id, 2);

        assert_eq!(repo.find_by_id(leg.id).await?, Some(leg.clone()));
        assert!(repo.exists_by_id(wing.id).await?);
        assert_eq!(repo.find_all().await?.len(), 2);

        repo.delete_by_id(wing.id).await?;
        assert!(!repo.exists_by_id(wing.id).await?);
        assert_eq!(repo.find_by_id(wing.id).await?, None);
        // deleting a missing row is not a storage fault
        repo.delete_by_id(wing.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_save_overwrites_every_column() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmRepository::<animal::ActiveModel>::new(db);
        let tz = FixedOffset::east_opt(0).ok_or_else(|| anyhow::anyhow!("offset"))?;
        let arrival = tz
            .with_ymd_and_hms(2024, 3, 5, 6, 0, 0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("time"))?;

        let created = repo
            .create(animal::Model {
                id: 0,
                registration_number: "DK-7".into(),
                weight: 90.0,
                origin: "Pig".into(),
                arrival_time: arrival,
            })
            .await?;
        let mut changed = created.clone();
        changed.origin = "Cattle".into();
        changed.weight = 410.0;
        let saved = repo.save(changed.clone()).await?;
        assert_eq!(saved, changed);
        assert_eq!(repo.find_by_id(created.id).await?, Some(changed));

        let ghost = animal::Model { id: 500, ..created };
        assert!(matches!(repo.save(ghost).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
