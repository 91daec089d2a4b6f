use std::{collections::BTreeMap, path::{Path, PathBuf}, sync::atomic::{AtomicI32, Ordering}};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use super::{Record, Repository};
use crate::errors::ServiceError;

/// JSON file-backed row store.
///
/// Keeps the whole collection in memory and rewrites the file after every
/// mutation. The file is written while the write lock is held, so the file
/// never lags behind a later mutation.
pub struct JsonFileRepository<M> {
    inner: RwLock<BTreeMap<i32, M>>,
    next_id: AtomicI32,
    file_path: PathBuf,
}

impl<M> JsonFileRepository<M>
where
    M: Record + Serialize + DeserializeOwned,
{
    /// Open the store at `path`, creating the file with an empty map if missing.
    /// Ids resume after the highest id found in the file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        }

        let map: BTreeMap<i32, M> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Db(format!("corrupt store {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: BTreeMap<i32, M> = BTreeMap::new();
                Self::write_file(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::Db(e.to_string())),
        };

        let next_id = map.keys().next_back().map_or(1, |max| max + 1);
        debug!(path = %file_path.display(), rows = map.len(), next_id, "opened json store");
        Ok(Self { inner: RwLock::new(map), next_id: AtomicI32::new(next_id), file_path })
    }

    async fn write_file(path: &Path, map: &BTreeMap<i32, M>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map).map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::write(path, data).await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}

#[async_trait]
impl<M> Repository<M> for JsonFileRepository<M>
where
    M: Record + Serialize + DeserializeOwned,
{
    async fn create(&self, mut record: M) -> Result<M, ServiceError> {
        let mut map = self.inner.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.set_id(id);
        map.insert(id, record.clone());
        if let Err(e) = Self::write_file(&self.file_path, &map).await {
            map.remove(&id);
            return Err(e);
        }
        Ok(record)
    }

    async fn save(&self, record: M) -> Result<M, ServiceError> {
        let mut map = self.inner.write().await;
        let previous = match map.get_mut(&record.id()) {
            Some(slot) => std::mem::replace(slot, record.clone()),
            None => return Err(ServiceError::not_found(M::ENTITY, record.id())),
        };
        if let Err(e) = Self::write_file(&self.file_path, &map).await {
            map.insert(record.id(), previous);
            return Err(e);
        }
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<M>, ServiceError> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<M>, ServiceError> {
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.inner.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let Some(removed) = map.remove(&id) else { return Ok(()) };
        if let Err(e) = Self::write_file(&self.file_path, &map).await {
            map.insert(id, removed);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::product;

    fn product(name: &str) -> product::Model {
        product::Model { id: 0, name: name.into(), description: format!("{name} from the line") }
    }

    #[tokio::test]
    async fn json_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_repo_{}.json", uuid::Uuid::new_v4()));
        let store = JsonFileRepository::<product::Model>::open(&tmp).await?;

        // initially empty
        assert_eq!(store.find_all().await?.len(), 0);

        let sausage = store.create(product("Sausage")).await?;
        let ham = store.create(product("Ham")).await?;
        assert_eq!((sausage.id, ham.id), (1, 2));

        let mut renamed = sausage.clone();
        renamed.name = "Bratwurst".into();
        store.save(renamed).await?;

        // remove and reload persistence
        store.delete_by_id(ham.id).await?;
        let reloaded = JsonFileRepository::<product::Model>::open(&tmp).await?;
        let rows = reloaded.find_all().await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Bratwurst");

        // counter resumes after the highest surviving id
        let next = reloaded.create(product("Pate")).await?;
        assert_eq!(next.id, 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_repo_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, b"{not json").await?;
        let opened = JsonFileRepository::<product::Model>::open(&tmp).await;
        assert!(matches!(opened, Err(ServiceError::Db(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
