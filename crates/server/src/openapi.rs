use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDoc {
    pub id: i32,
    pub registration_number: String,
    pub weight: f64,
    pub origin: String,
    #[schema(example = "2024-03-05T08:15:00+01:00")]
    pub arrival_time: String,
}

/// `arrivalTime` is ignored while the server stamps arrival times itself.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimalDoc {
    pub registration_number: String,
    pub weight: f64,
    pub origin: String,
    pub arrival_time: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalUpdateDoc {
    pub origin: String,
    pub weight: f64,
    pub arrival_time: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    pub message: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::animals::create,
        crate::routes::animals::list,
        crate::routes::animals::list_by_origin,
        crate::routes::animals::get_one,
        crate::routes::animals::update,
        crate::routes::animals::remove,
    ),
    components(
        schemas(
            HealthResponse,
            AnimalDoc,
            NewAnimalDoc,
            AnimalUpdateDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "animal")
    )
)]
pub struct ApiDoc;
