//! Business service in front of a real data service on SQLite.

use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use gateway::{client::DataServiceClient, routes::AppState};

async fn serve(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

/// Starts both tiers and returns the business service base url.
async fn start_stack() -> anyhow::Result<String> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(4).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    let data_url = serve(server::routes::build_router(
        server::routes::AppState { db },
        CorsLayer::very_permissive(),
    ))
    .await?;

    let client = DataServiceClient::with_client(reqwest::Client::new(), &data_url)?;
    serve(gateway::routes::build_router(AppState::new(client, 10), CorsLayer::very_permissive())).await
}

async fn post_json(c: &reqwest::Client, url: String, body: Value) -> anyhow::Result<(HttpStatusCode, Value)> {
    let res = c.post(url).json(&body).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

#[tokio::test]
async fn e2e_health_metrics_and_docs() -> anyhow::Result<()> {
    let api = start_stack().await?;
    let c = reqwest::Client::new();

    let body = c.get(format!("{api}/health")).send().await?.json::<Value>().await?;
    assert_eq!(body["status"], "ok");

    c.get(format!("{api}/api/categories")).send().await?;
    let metrics = c.get(format!("{api}/metrics")).send().await?.text().await?;
    assert!(metrics.contains("service=\"business-service\""));

    let doc = c.get(format!("{api}/api-docs/openapi.json")).send().await?.json::<Value>().await?;
    assert!(doc["paths"]["/api/products/{id}/details"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_category_round_trip_and_conflict() -> anyhow::Result<()> {
    let api = start_stack().await?;
    let c = reqwest::Client::new();

    let (status, created) =
        post_json(&c, format!("{api}/api/categories"), json!({"name": "Outdoor", "description": "Garden"})).await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let got = c.get(format!("{api}/api/categories/{id}")).send().await?.json::<Value>().await?;
    assert_eq!(got["name"], "Outdoor");
    assert_eq!(got["description"], "Garden");

    let res = c.get(format!("{api}/api/categories/name/outdoor")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let (status, body) = post_json(&c, format!("{api}/api/categories"), json!({"name": "OUTDOOR"})).await?;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["path"], "/api/categories");

    let res = c.delete(format!("{api}/api/categories/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(format!("{api}/api/categories/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["path"], format!("/api/categories/{id}"));
    Ok(())
}

#[tokio::test]
async fn e2e_products_inventory_and_details() -> anyhow::Result<()> {
    let api = start_stack().await?;
    let c = reqwest::Client::new();

    let (_, cat) = post_json(&c, format!("{api}/api/categories"), json!({"name": "Lighting"})).await?;
    let cid = cat["id"].as_i64().unwrap();
    let (status, lamp) = post_json(
        &c,
        format!("{api}/api/products"),
        json!({"name": "Desk Lamp", "price": "24.90", "category": {"id": cid}}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(lamp["category"]["name"], "Lighting");
    let pid = lamp["id"].as_i64().unwrap();
    post_json(&c, format!("{api}/api/products"), json!({"name": "Sofa", "price": 700})).await?;

    let hits = c.get(format!("{api}/api/products/search?name=LAMP")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);
    let cheap = c.get(format!("{api}/api/products/price/max/100")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(cheap.len(), 1);
    let in_cat = c
        .get(format!("{api}/api/products/category/name/lighting"))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(in_cat.len(), 1);

    for (q, loc) in [(3, "Aisle 2"), (4, "Aisle 1"), (1, "Aisle 2")] {
        let (status, _) = post_json(
            &c,
            format!("{api}/api/inventory"),
            json!({"product": {"id": pid}, "quantity": q, "location": loc}),
        )
        .await?;
        assert_eq!(status, HttpStatusCode::CREATED);
    }

    let details = c.get(format!("{api}/api/products/{pid}/details")).send().await?.json::<Value>().await?;
    assert_eq!(details["stockQuantity"], 8);
    assert_eq!(details["isLowStock"], true);
    assert_eq!(details["location"], "Aisle 1, Aisle 2");
    assert_eq!(details["name"], "Desk Lamp");
    assert!(details["lastUpdated"].is_string());

    let (status, body) =
        post_json(&c, format!("{api}/api/inventory"), json!({"product": {"id": 9999}, "quantity": 1, "location": "X"}))
            .await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let res = c.delete(format!("{api}/api/products/{pid}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let rows = c.get(format!("{api}/api/inventory")).send().await?.json::<Vec<Value>>().await?;
    assert!(rows.is_empty());
    let res = c.get(format!("{api}/api/products/{pid}/details")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_data_service_validation_passes_through() -> anyhow::Result<()> {
    let api = start_stack().await?;
    let c = reqwest::Client::new();

    let (_, p) = post_json(&c, format!("{api}/api/products"), json!({"name": "Kettle", "price": 30})).await?;
    let pid = p["id"].as_i64().unwrap();

    // passes business validation, rejected by the data service
    let (status, body) = post_json(
        &c,
        format!("{api}/api/products"),
        json!({"name": "Mug", "price": 4, "category": {"id": 424242}}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap_or_default().contains("424242"));

    let (_, row) = post_json(
        &c,
        format!("{api}/api/inventory"),
        json!({"product": {"id": pid}, "quantity": 2, "location": "Back"}),
    )
    .await?;
    let id = row["id"].as_i64().unwrap();
    let res = c.patch(format!("{api}/api/inventory/{id}/quantity/0")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let out = c.get(format!("{api}/api/inventory/out-of-stock")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["product"]["name"], "Kettle");
    Ok(())
}

#[tokio::test]
async fn e2e_search_wildcards_are_literal() -> anyhow::Result<()> {
    let api = start_stack().await?;
    let c = reqwest::Client::new();

    for name in ["Tools", "100% Cotton"] {
        post_json(&c, format!("{api}/api/categories"), json!({"name": name})).await?;
    }
    post_json(&c, format!("{api}/api/products"), json!({"name": "Hammer", "price": 12})).await?;

    let hits = c.get(format!("{api}/api/categories/search?name=%25")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "100% Cotton");
    let hits = c.get(format!("{api}/api/products/search?name=_")).send().await?.json::<Vec<Value>>().await?;
    assert!(hits.is_empty());
    Ok(())
}
