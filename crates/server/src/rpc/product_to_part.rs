use std::sync::Arc;

use async_trait::async_trait;
use service::services::{NewMapping, ProductToPartMappingService};
use tonic::{Request, Response, Status};
use tracing::info;

use super::proto::{
    CreateProductToPartRequest, CreateProductToPartResponse, DeleteByIdRequest, DeleteResponse,
    GetByIdRequest, ListProductToPartResponse, ProductToPartProto,
};
use super::{finish, missing_payload};

const ENTITY: &str = "product_to_part";

#[async_trait]
pub trait ProductToPartRpc: Send + Sync + 'static {
    async fn create_product_to_part(
        &self,
        request: Request<CreateProductToPartRequest>,
    ) -> Result<Response<CreateProductToPartResponse>, Status>;
    async fn list_product_to_part(
        &self,
        request: Request<()>,
    ) -> Result<Response<ListProductToPartResponse>, Status>;
    async fn get_product_to_part(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<ProductToPartProto>, Status>;
    async fn delete_product_to_part(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status>;
}

#[derive(Clone)]
pub struct ProductToPartRpcService {
    mappings: Arc<ProductToPartMappingService>,
}

impl ProductToPartRpcService {
    pub fn new(mappings: Arc<ProductToPartMappingService>) -> Self {
        Self { mappings }
    }
}

#[async_trait]
impl ProductToPartRpc for ProductToPartRpcService {
    async fn create_product_to_part(
        &self,
        request: Request<CreateProductToPartRequest>,
    ) -> Result<Response<CreateProductToPartResponse>, Status> {
        let mapping = request.into_inner().mapping.ok_or_else(|| missing_payload("mapping"))?;
        let input = NewMapping::from(mapping);
        let created = finish(ENTITY, "create", self.mappings.create(input).await)?;
        info!(id = created.id, "rpc product_to_part created");
        Ok(Response::new(CreateProductToPartResponse { mapping: Some(created.into()) }))
    }

    async fn list_product_to_part(
        &self,
        _request: Request<()>,
    ) -> Result<Response<ListProductToPartResponse>, Status> {
        let rows = finish(ENTITY, "list", self.mappings.list().await)?;
        Ok(Response::new(ListProductToPartResponse {
            mappings: rows.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_product_to_part(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<ProductToPartProto>, Status> {
        let id = request.into_inner().id;
        let found = finish(ENTITY, "get", self.mappings.get(id).await)?;
        Ok(Response::new(found.into()))
    }

    async fn delete_product_to_part(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = request.into_inner().id;
        finish(ENTITY, "delete", self.mappings.delete(id).await)?;
        Ok(Response::new(DeleteResponse {}))
    }
}
