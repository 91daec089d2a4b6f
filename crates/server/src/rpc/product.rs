use std::sync::Arc;

use async_trait::async_trait;
use service::services::{NewProduct, ProductService};
use tonic::{Request, Response, Status};
use tracing::info;

use super::proto::{
    CreateProductRequest, CreateProductResponse, DeleteByIdRequest, DeleteResponse, GetByIdRequest,
    ListProductsResponse, ProductProto,
};
use super::{finish, missing_payload};

const ENTITY: &str = "product";

#[async_trait]
pub trait ProductRpc: Send + Sync + 'static {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<CreateProductResponse>, Status>;
    async fn list_products(
        &self,
        request: Request<()>,
    ) -> Result<Response<ListProductsResponse>, Status>;
    async fn get_product(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<ProductProto>, Status>;
    async fn delete_product(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status>;
}

#[derive(Clone)]
pub struct ProductRpcService {
    products: Arc<ProductService>,
}

impl ProductRpcService {
    pub fn new(products: Arc<ProductService>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductRpc for ProductRpcService {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<CreateProductResponse>, Status> {
        let product = request.into_inner().product.ok_or_else(|| missing_payload("product"))?;
        let input = NewProduct::from(product);
        let created = finish(ENTITY, "create", self.products.create(input).await)?;
        info!(id = created.id, "rpc product created");
        Ok(Response::new(CreateProductResponse { product: Some(created.into()) }))
    }

    async fn list_products(
        &self,
        _request: Request<()>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let rows = finish(ENTITY, "list", self.products.list().await)?;
        Ok(Response::new(ListProductsResponse {
            products: rows.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_product(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<ProductProto>, Status> {
        let id = request.into_inner().id;
        let found = finish(ENTITY, "get", self.products.get(id).await)?;
        Ok(Response::new(found.into()))
    }

    async fn delete_product(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = request.into_inner().id;
        finish(ENTITY, "delete", self.products.delete(id).await)?;
        Ok(Response::new(DeleteResponse {}))
    }
}
