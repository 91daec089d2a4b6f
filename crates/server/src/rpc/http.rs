//! JSON bridge for the RPC services: `POST /rpc/<Service>/<Method>`.
//!
//! Request and response bodies are the [`super::proto`] messages as JSON.
//! List methods take no body. A failed call answers with the HTTP status
//! matching its RPC code and a `{code, message}` body.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tonic::{Code, Request, Status};

use super::proto::*;
use super::{AnimalPartRpc, AnimalRpc, ProductRpc, ProductToPartRpc, RpcServices, TrayRpc};

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub code: i32,
    pub message: String,
}

/// An RPC status carried over HTTP.
#[derive(Debug)]
pub struct RpcHttpError(pub Status);

impl From<Status> for RpcHttpError {
    fn from(status: Status) -> Self {
        Self(status)
    }
}

impl From<JsonRejection> for RpcHttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Status::invalid_argument(rejection.body_text()))
    }
}

impl IntoResponse for RpcHttpError {
    fn into_response(self) -> Response {
        let status = match self.0.code() {
            Code::NotFound => StatusCode::NOT_FOUND,
            Code::InvalidArgument => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = StatusBody { code: self.0.code() as i32, message: self.0.message().to_string() };
        (status, Json(body)).into_response()
    }
}

macro_rules! unary {
    ($handler:ident, $svc:ident . $method:ident, () => $resp:ty) => {
        async fn $handler(State(rpc): State<RpcServices>) -> Result<Json<$resp>, RpcHttpError> {
            let resp = rpc.$svc.$method(Request::new(())).await?;
            Ok(Json(resp.into_inner()))
        }
    };
    ($handler:ident, $svc:ident . $method:ident, $req:ty => $resp:ty) => {
        async fn $handler(
            State(rpc): State<RpcServices>,
            payload: Result<Json<$req>, JsonRejection>,
        ) -> Result<Json<$resp>, RpcHttpError> {
            let Json(req) = payload?;
            let resp = rpc.$svc.$method(Request::new(req)).await?;
            Ok(Json(resp.into_inner()))
        }
    };
}

unary!(create_animal, animals.create_animal, CreateAnimalRequest => CreateAnimalResponse);
unary!(list_animals, animals.list_animals, () => ListAnimalsResponse);
unary!(get_animal, animals.get_animal, GetByIdRequest => AnimalProto);
unary!(delete_animal, animals.delete_animal, DeleteByIdRequest => DeleteResponse);

unary!(
    create_part,
    animal_parts.create_animal_part,
    CreateAnimalPartRequest => CreateAnimalPartResponse
);
unary!(list_parts, animal_parts.list_animal_parts, () => ListAnimalPartsResponse);
unary!(get_part, animal_parts.get_animal_part, GetByIdRequest => AnimalPartProto);
unary!(delete_part, animal_parts.delete_animal_part, DeleteByIdRequest => DeleteResponse);

unary!(create_product, products.create_product, CreateProductRequest => CreateProductResponse);
unary!(list_products, products.list_products, () => ListProductsResponse);
unary!(get_product, products.get_product, GetByIdRequest => ProductProto);
unary!(delete_product, products.delete_product, DeleteByIdRequest => DeleteResponse);

unary!(
    create_mapping,
    mappings.create_product_to_part,
    CreateProductToPartRequest => CreateProductToPartResponse
);
unary!(list_mappings, mappings.list_product_to_part, () => ListProductToPartResponse);
unary!(get_mapping, mappings.get_product_to_part, GetByIdRequest => ProductToPartProto);
unary!(delete_mapping, mappings.delete_product_to_part, DeleteByIdRequest => DeleteResponse);

unary!(create_tray, trays.create_tray, CreateTrayRequest => CreateTrayResponse);
unary!(list_trays, trays.list_trays, () => ListTraysResponse);
unary!(get_tray, trays.get_tray, GetByIdRequest => TrayProto);
unary!(delete_tray, trays.delete_tray, DeleteByIdRequest => DeleteResponse);

/// Routes for all five services, relative to the `/rpc` mount point.
pub fn router() -> Router<RpcServices> {
    Router::new()
        .route("/AnimalService/CreateAnimal", post(create_animal))
        .route("/AnimalService/ListAnimals", post(list_animals))
        .route("/AnimalService/GetAnimal", post(get_animal))
        .route("/AnimalService/DeleteAnimal", post(delete_animal))
        .route("/AnimalPartService/CreateAnimalPart", post(create_part))
        .route("/AnimalPartService/ListAnimalParts", post(list_parts))
        .route("/AnimalPartService/GetAnimalPart", post(get_part))
        .route("/AnimalPartService/DeleteAnimalPart", post(delete_part))
        .route("/ProductService/CreateProduct", post(create_product))
        .route("/ProductService/ListProducts", post(list_products))
        .route("/ProductService/GetProduct", post(get_product))
        .route("/ProductService/DeleteProduct", post(delete_product))
        .route("/ProductToPartService/CreateProductToPart", post(create_mapping))
        .route("/ProductToPartService/ListProductToPart", post(list_mappings))
        .route("/ProductToPartService/GetProductToPart", post(get_mapping))
        .route("/ProductToPartService/DeleteProductToPart", post(delete_mapping))
        .route("/TrayService/CreateTray", post(create_tray))
        .route("/TrayService/ListTrays", post(list_trays))
        .route("/TrayService/GetTray", post(get_tray))
        .route("/TrayService/DeleteTray", post(delete_tray))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_http() {
        let cases = [
            (Status::not_found("gone"), StatusCode::NOT_FOUND),
            (Status::invalid_argument("bad"), StatusCode::BAD_REQUEST),
            (Status::internal("storage error"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (status, expected) in cases {
            assert_eq!(RpcHttpError(status).into_response().status(), expected);
        }
    }
}
