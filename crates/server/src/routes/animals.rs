use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::animal;
use serde::Deserialize;
use service::services::{AnimalUpdate, NewAnimal};
use tracing::info;

use crate::{errors::ApiError, metrics, routes::ServerState};

const ENTITY: &str = "animal";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Arrival date, `yyyy-MM-dd`.
    pub date: Option<String>,
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/animal", get(list).post(create))
        .route("/animal/origin/:origin", get(list_by_origin))
        .route("/animal/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    post, path = "/animal", tag = "animal",
    request_body = crate::openapi::NewAnimalDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AnimalDoc),
        (status = 400, description = "Malformed body or storage rejected the record",
            body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewAnimal>, JsonRejection>,
) -> Result<(StatusCode, Json<animal::Model>), ApiError> {
    let Json(input) = payload?;
    let created = metrics::observe(ENTITY, "create", state.services.animals.create(input).await)
        .map_err(ApiError::on_create)?;
    info!(id = created.id, origin = %created.origin, "animal registered");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/animal", tag = "animal",
    params(ListQuery),
    responses(
        (status = 200, description = "All animals, or those that arrived on `date`",
            body = [crate::openapi::AnimalDoc]),
        (status = 400, description = "Invalid date format, use yyyy-MM-dd",
            body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<animal::Model>>, ApiError> {
    let Query(q) = query?;
    let animals = &state.services.animals;
    let found = match q.date.as_deref() {
        Some(date) => metrics::observe(ENTITY, "list_by_date", animals.list_by_date(date).await)?,
        None => metrics::observe(ENTITY, "list", animals.list().await)?,
    };
    Ok(Json(found))
}

#[utoipa::path(
    get, path = "/animal/origin/{origin}", tag = "animal",
    params(("origin" = String, Path, description = "Origin, matched ignoring case")),
    responses(
        (status = 200, description = "Matching animals", body = [crate::openapi::AnimalDoc])
    )
)]
pub async fn list_by_origin(
    State(state): State<ServerState>,
    Path(origin): Path<String>,
) -> Result<Json<Vec<animal::Model>>, ApiError> {
    let matched = state.services.animals.list_by_origin(&origin).await;
    Ok(Json(metrics::observe(ENTITY, "list_by_origin", matched)?))
}

#[utoipa::path(
    get, path = "/animal/{id}", tag = "animal",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AnimalDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<animal::Model>, ApiError> {
    let found = metrics::observe(ENTITY, "get", state.services.animals.get(id).await)?;
    Ok(Json(found))
}

#[utoipa::path(
    put, path = "/animal/{id}", tag = "animal",
    params(("id" = i32, Path, description = "Animal ID")),
    request_body = crate::openapi::AnimalUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AnimalDoc),
        (status = 400, description = "Malformed body", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<AnimalUpdate>, JsonRejection>,
) -> Result<Json<animal::Model>, ApiError> {
    let Json(input) = payload?;
    let updated = state.services.animals.update(id, input).await;
    Ok(Json(metrics::observe(ENTITY, "update", updated)?))
}

#[utoipa::path(
    delete, path = "/animal/{id}", tag = "animal",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    metrics::observe(ENTITY, "delete", state.services.animals.delete(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}
