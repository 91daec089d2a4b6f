//! RPC boundary for all five entity services.
//!
//! Each service is a trait shaped like a tonic server trait plus one
//! implementation over the matching entity service. Every missing id is
//! reported as `Status::not_found`. [`http`] serves the services as JSON
//! under `/rpc` on the main listener.

pub mod http;
pub mod proto;

mod animal;
mod animal_part;
mod product;
mod product_to_part;
mod tray;

pub use animal::{AnimalRpc, AnimalRpcService};
pub use animal_part::{AnimalPartRpc, AnimalPartRpcService};
pub use product::{ProductRpc, ProductRpcService};
pub use product_to_part::{ProductToPartRpc, ProductToPartRpcService};
pub use tray::{TrayRpc, TrayRpcService};

use service::{ServiceError, Services};
use tonic::Status;
use tracing::{error, warn};

use crate::metrics;

/// Map a service failure to the transport status. Storage faults never leak
/// their detail to the caller.
pub(crate) fn to_status(err: ServiceError) -> Status {
    match err {
        ServiceError::NotFound(msg) => {
            warn!(%msg, "rpc not found");
            Status::not_found(msg)
        }
        ServiceError::Validation(msg) => Status::invalid_argument(msg),
        ServiceError::Db(msg) => {
            error!(error = %msg, "rpc storage fault");
            Status::internal("storage error")
        }
    }
}

/// Count the operation, then convert any failure to a status.
pub(crate) fn finish<T>(
    entity: &str,
    operation: &str,
    result: Result<T, ServiceError>,
) -> Result<T, Status> {
    metrics::observe(entity, operation, result).map_err(to_status)
}

pub(crate) fn missing_payload(field: &str) -> Status {
    Status::invalid_argument(format!("request is missing `{field}`"))
}

/// The five RPC services, built over one [`Services`] bundle.
#[derive(Clone)]
pub struct RpcServices {
    pub animals: AnimalRpcService,
    pub animal_parts: AnimalPartRpcService,
    pub products: ProductRpcService,
    pub mappings: ProductToPartRpcService,
    pub trays: TrayRpcService,
}

impl RpcServices {
    pub fn new(services: &Services) -> Self {
        Self {
            animals: AnimalRpcService::new(services.animals.clone()),
            animal_parts: AnimalPartRpcService::new(services.animal_parts.clone()),
            products: ProductRpcService::new(services.products.clone()),
            mappings: ProductToPartRpcService::new(services.mappings.clone()),
            trays: TrayRpcService::new(services.trays.clone()),
        }
    }
}
