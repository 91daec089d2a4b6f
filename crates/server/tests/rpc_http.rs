use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use service::Services;
use tower::ServiceExt;

fn app(server_assigned: bool) -> Router {
    server::startup::build_app(Services::in_memory(server_assigned))
}

async fn call(
    app: &Router,
    path: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method("POST").uri(format!("/rpc/{path}"));
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn missing_ids_are_404_with_status_body() -> anyhow::Result<()> {
    let app = app(true);
    for path in [
        "AnimalService/GetAnimal",
        "AnimalPartService/DeleteAnimalPart",
        "ProductService/GetProduct",
        "ProductToPartService/DeleteProductToPart",
        "TrayService/GetTray",
    ] {
        let (status, body) = call(&app, path, Some(json!({"id": 7}))).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["code"], tonic::Code::NotFound as i32);
        assert!(body["message"].as_str().is_some_and(|m| m.ends_with("with ID 7 not found")));
    }
    Ok(())
}

#[tokio::test]
async fn invalid_arrival_time_is_400_and_nothing_is_stored() -> anyhow::Result<()> {
    let app = app(false);
    let animal = json!({
        "id": 0,
        "registration_number": "DK-7",
        "weight": 90.0,
        "origin": "Pig",
        "arrival_time": {"seconds": 0, "nanos": -5}
    });
    let request = json!({"animal": animal});
    let (status, body) = call(&app, "AnimalService/CreateAnimal", Some(request)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], tonic::Code::InvalidArgument as i32);

    let (status, body) = call(&app, "AnimalService/ListAnimals", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["animals"], json!([]));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_400() -> anyhow::Result<()> {
    let request = json!({"tray": 5});
    let (status, body) = call(&app(true), "TrayService/CreateTray", Some(request)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], tonic::Code::InvalidArgument as i32);
    Ok(())
}

#[tokio::test]
async fn butchery_flow_over_http() -> anyhow::Result<()> {
    let app = app(true);
    let pig = json!({"id": 0, "registration_number": "DK-1", "weight": 100.0, "origin": "Pig"});
    let request = json!({"animal": pig});
    let (status, created) = call(&app, "AnimalService/CreateAnimal", Some(request)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["animal"]["id"], 1);
    assert!(created["animal"]["arrival_time"]["seconds"].is_i64());

    let leg = json!({"id": 0, "animal_id": 1, "part_type": "Leg", "weight": 12.5});
    let request = json!({"part": leg});
    let (_, part) = call(&app, "AnimalPartService/CreateAnimalPart", Some(request)).await?;
    assert_eq!(part["part"]["id"], 1);

    let sausage = json!({"id": 0, "name": "Sausage", "description": "smoked"});
    let request = json!({"product": sausage});
    let (_, product) = call(&app, "ProductService/CreateProduct", Some(request)).await?;
    let product_id = product["product"]["id"].clone();
    let mapping = json!({"id": 0, "product_id": product_id, "part_id": 1, "quantity": 3});
    let request = json!({"mapping": mapping});
    let (status, _) = call(&app, "ProductToPartService/CreateProductToPart", Some(request)).await?;
    assert_eq!(status, StatusCode::OK);

    let request = json!({"id": 1});
    let (status, deleted) = call(&app, "ProductService/DeleteProduct", Some(request)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({}));

    // mappings survive the product they point at
    let (_, mappings) = call(&app, "ProductToPartService/ListProductToPart", None).await?;
    assert_eq!(mappings["mappings"].as_array().map(Vec::len), Some(1));

    let (_, fetched) = call(&app, "AnimalService/GetAnimal", Some(json!({"id": 1}))).await?;
    assert_eq!(fetched, created["animal"]);
    Ok(())
}
