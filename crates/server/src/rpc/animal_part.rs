use std::sync::Arc;

use async_trait::async_trait;
use service::services::{AnimalPartService, NewAnimalPart};
use tonic::{Request, Response, Status};
use tracing::info;

use super::proto::{
    AnimalPartProto, CreateAnimalPartRequest, CreateAnimalPartResponse, DeleteByIdRequest,
    DeleteResponse, GetByIdRequest, ListAnimalPartsResponse,
};
use super::{finish, missing_payload};

const ENTITY: &str = "animal_part";

#[async_trait]
pub trait AnimalPartRpc: Send + Sync + 'static {
    async fn create_animal_part(
        &self,
        request: Request<CreateAnimalPartRequest>,
    ) -> Result<Response<CreateAnimalPartResponse>, Status>;
    async fn list_animal_parts(
        &self,
        request: Request<()>,
    ) -> Result<Response<ListAnimalPartsResponse>, Status>;
    async fn get_animal_part(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<AnimalPartProto>, Status>;
    async fn delete_animal_part(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status>;
}

#[derive(Clone)]
pub struct AnimalPartRpcService {
    parts: Arc<AnimalPartService>,
}

impl AnimalPartRpcService {
    pub fn new(parts: Arc<AnimalPartService>) -> Self {
        Self { parts }
    }
}

#[async_trait]
impl AnimalPartRpc for AnimalPartRpcService {
    async fn create_animal_part(
        &self,
        request: Request<CreateAnimalPartRequest>,
    ) -> Result<Response<CreateAnimalPartResponse>, Status> {
        let part = request.into_inner().part.ok_or_else(|| missing_payload("part"))?;
        let input = NewAnimalPart::from(part);
        let created = finish(ENTITY, "create", self.parts.create(input).await)?;
        info!(id = created.id, "rpc animal_part created");
        Ok(Response::new(CreateAnimalPartResponse { part: Some(created.into()) }))
    }

    async fn list_animal_parts(
        &self,
        _request: Request<()>,
    ) -> Result<Response<ListAnimalPartsResponse>, Status> {
        let rows = finish(ENTITY, "list", self.parts.list().await)?;
        Ok(Response::new(ListAnimalPartsResponse {
            parts: rows.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_animal_part(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<AnimalPartProto>, Status> {
        let id = request.into_inner().id;
        let found = finish(ENTITY, "get", self.parts.get(id).await)?;
        Ok(Response::new(found.into()))
    }

    async fn delete_animal_part(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = request.into_inner().id;
        finish(ENTITY, "delete", self.parts.delete(id).await)?;
        Ok(Response::new(DeleteResponse {}))
    }
}
