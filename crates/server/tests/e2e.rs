use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::Services;
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

async fn start_server(services: Services) -> anyhow::Result<TestApp> {
    let app = server::startup::build_app(services);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(Services::in_memory(true)).await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_animal_lifecycle_over_file_storage() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("slaughterhouse_e2e_{}", uuid::Uuid::new_v4()));
    let app = start_server(Services::file_backed(&dir, true).await?).await?;
    let c = client();

    let res = c
        .post(format!("{}/animal", app.base_url))
        .json(&json!({"registrationNumber": "DK-9", "weight": 95.5, "origin": "Pig"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_i64().ok_or_else(|| anyhow::anyhow!("no id"))?;

    let res = c.get(format!("{}/animal/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    // the record survives a reopen of the same data directory
    let reopened = Services::file_backed(&dir, true).await?;
    let stored = reopened.animals.get(id as i32).await?;
    assert_eq!(stored.registration_number, "DK-9");

    let res = c.delete(format!("{}/animal/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(format!("{}/animal/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}
