use std::sync::Arc;

use async_trait::async_trait;
use service::services::{NewTray, TrayService};
use tonic::{Request, Response, Status};
use tracing::info;

use super::proto::{
    CreateTrayRequest, CreateTrayResponse, DeleteByIdRequest, DeleteResponse, GetByIdRequest,
    ListTraysResponse, TrayProto,
};
use super::{finish, missing_payload};

const ENTITY: &str = "tray";

#[async_trait]
pub trait TrayRpc: Send + Sync + 'static {
    async fn create_tray(
        &self,
        request: Request<CreateTrayRequest>,
    ) -> Result<Response<CreateTrayResponse>, Status>;
    async fn list_trays(
        &self,
        request: Request<()>,
    ) -> Result<Response<ListTraysResponse>, Status>;
    async fn get_tray(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<TrayProto>, Status>;
    async fn delete_tray(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status>;
}

#[derive(Clone)]
pub struct TrayRpcService {
    trays: Arc<TrayService>,
}

impl TrayRpcService {
    pub fn new(trays: Arc<TrayService>) -> Self {
        Self { trays }
    }
}

#[async_trait]
impl TrayRpc for TrayRpcService {
    async fn create_tray(
        &self,
        request: Request<CreateTrayRequest>,
    ) -> Result<Response<CreateTrayResponse>, Status> {
        let tray = request.into_inner().tray.ok_or_else(|| missing_payload("tray"))?;
        let input = NewTray::from(tray);
        let created = finish(ENTITY, "create", self.trays.create(input).await)?;
        info!(id = created.id, "rpc tray created");
        Ok(Response::new(CreateTrayResponse { tray: Some(created.into()) }))
    }

    async fn list_trays(
        &self,
        _request: Request<()>,
    ) -> Result<Response<ListTraysResponse>, Status> {
        let rows = finish(ENTITY, "list", self.trays.list().await)?;
        Ok(Response::new(ListTraysResponse {
            trays: rows.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_tray(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<TrayProto>, Status> {
        let id = request.into_inner().id;
        let found = finish(ENTITY, "get", self.trays.get(id).await)?;
        Ok(Response::new(found.into()))
    }

    async fn delete_tray(
        &self,
        request: Request<DeleteByIdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = request.into_inner().id;
        finish(ENTITY, "delete", self.trays.delete(id).await)?;
        Ok(Response::new(DeleteResponse {}))
    }
}
