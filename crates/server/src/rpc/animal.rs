use std::sync::Arc;

use async_trait::async_trait;
use service::services::{AnimalService, NewAnimal};
use tonic::{Request, Response, Status};
use tracing::info;

use super::proto::{
    AnimalProto, CreateAnimalRequest, CreateAnimalResponse, DeleteByIdRequest, DeleteResponse,
    GetByIdRequest, ListAnimalsResponse,
};
use super::{finish, missing_payload};

const ENTITY: &str = "animal";

#[async_trait]
pub trait AnimalRpc: Send + Sync + 'static {
    async fn create_animal(
        &self,
        request: Request<CreateAnimalRequest>,
    ) -> Result<Response<CreateAnimalResponse>, Status>;
    async fn list_animals(
        &self,
        request: Request<()>,
    ) -> Result<Response<ListAnimalsResponse>, Status>;
    async fn get_animal(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<AnimalProto>, Status>;
    async fn delete_animal(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status>;
}

#[derive(Clone)]
pub struct AnimalRpcService {
    animals: Arc<AnimalService>,
}

impl AnimalRpcService {
    pub fn new(animals: Arc<AnimalService>) -> Self {
        Self { animals }
    }
}

#[async_trait]
impl AnimalRpc for AnimalRpcService {
    async fn create_animal(
        &self,
        request: Request<CreateAnimalRequest>,
    ) -> Result<Response<CreateAnimalResponse>, Status> {
        let animal = request.into_inner().animal.ok_or_else(|| missing_payload("animal"))?;
        let input = NewAnimal::try_from(animal)?;
        let created = finish(ENTITY, "create", self.animals.create(input).await)?;
        info!(id = created.id, "rpc animal created");
        Ok(Response::new(CreateAnimalResponse { animal: Some(created.into()) }))
    }

    async fn list_animals(
        &self,
        _request: Request<()>,
    ) -> Result<Response<ListAnimalsResponse>, Status> {
        let animals = finish(ENTITY, "list", self.animals.list().await)?;
        Ok(Response::new(ListAnimalsResponse {
            animals: animals.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_animal(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<AnimalProto>, Status> {
        let id = request.into_inner().id;
        let found = finish(ENTITY, "get", self.animals.get(id).await)?;
        Ok(Response::new(found.into()))
    }

    async fn delete_animal(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = request.into_inner().id;
        finish(ENTITY, "delete", self.animals.delete(id).await)?;
        Ok(Response::new(DeleteResponse {}))
    }
}
