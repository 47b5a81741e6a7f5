use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, AppState};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(4).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;

    let app: Router = routes::build_router(AppState { db }, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

async fn post_json(c: &reqwest::Client, url: String, body: Value) -> anyhow::Result<(HttpStatusCode, Value)> {
    let res = c.post(url).json(&body).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

#[tokio::test]
async fn e2e_public_health_and_metrics() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");

    let metrics = client().get(app.url("/metrics")).send().await?.text().await?;
    assert!(metrics.contains("catalog_http_requests_total"));
    Ok(())
}

#[tokio::test]
async fn e2e_category_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let (status, created) = post_json(
        &c,
        app.url("/data/categories"),
        json!({"name": "Electronics", "description": "Devices"}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let got = c.get(app.url(&format!("/data/categories/{id}"))).send().await?.json::<Value>().await?;
    assert_eq!(got["name"], "Electronics");
    assert_eq!(got["description"], "Devices");

    let by_name = c.get(app.url("/data/categories/name/ELECTRONICS")).send().await?;
    assert_eq!(by_name.status(), HttpStatusCode::OK);

    let (status, body) = post_json(&c, app.url("/data/categories"), json!({"name": "electronics"})).await?;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(body["path"], "/data/categories");

    let res = c
        .put(app.url(&format!("/data/categories/{id}")))
        .json(&json!({"name": "Gadgets"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.delete(app.url(&format!("/data/categories/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(app.url(&format!("/data/categories/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], format!("/data/categories/{id}"));
    Ok(())
}

#[tokio::test]
async fn e2e_product_validation_errors() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let (status, body) = post_json(&c, app.url("/data/products"), json!({"name": "", "price": -1})).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product validation failed");
    assert_eq!(body["errors"]["name"], "Product name is required");
    assert_eq!(body["errors"]["price"], "Product price must be positive");

    let (status, body) = post_json(
        &c,
        app.url("/data/products"),
        json!({"name": "Lamp", "price": 10, "category": {"id": 999}}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let res = c.get(app.url("/data/products/price/max/cheap")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.get(app.url("/data/products/not-a-number")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["path"], "/data/products/not-a-number");

    let res = c
        .post(app.url("/data/products"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_product_search_and_cascade() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let (_, cat) = post_json(&c, app.url("/data/categories"), json!({"name": "Books"})).await?;
    let cid = cat["id"].as_i64().unwrap();
    let (status, rust) = post_json(
        &c,
        app.url("/data/products"),
        json!({"name": "Rust Book", "price": "39.99", "category": {"id": cid}}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(rust["price"], "39.99");
    assert_eq!(rust["category"]["name"], "Books");
    post_json(&c, app.url("/data/products"), json!({"name": "Desk", "price": 250})).await?;

    let hits = c.get(app.url("/data/products/search?name=book")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Rust Book");

    let range = c
        .get(app.url("/data/products/price/range?minPrice=10&maxPrice=40"))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(range.len(), 1);

    let pid = rust["id"].as_i64().unwrap();
    let (status, stock) = post_json(
        &c,
        app.url("/data/inventory"),
        json!({"product": {"id": pid}, "quantity": 5, "location": "Shelf 1"}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::CREATED);
    let inv_id = stock["id"].as_i64().unwrap();
    assert_eq!(stock["product"]["name"], "Rust Book");

    let res = c.delete(app.url(&format!("/data/products/{pid}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(app.url(&format!("/data/inventory/{inv_id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_inventory_quantity_rules() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let (_, p) = post_json(&c, app.url("/data/products"), json!({"name": "Chair", "price": 89.5})).await?;
    let pid = p["id"].as_i64().unwrap();

    let (status, body) = post_json(
        &c,
        app.url("/data/inventory"),
        json!({"product": {"id": pid}, "quantity": -2, "location": ""}),
    )
    .await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["quantity"], "Quantity cannot be negative");
    assert_eq!(body["errors"]["location"], "Location is required");

    let (status, body) = post_json(&c, app.url("/data/inventory"), json!({"quantity": 1, "location": "A"})).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["product"], "Product is required");

    let (_, row) = post_json(
        &c,
        app.url("/data/inventory"),
        json!({"product": {"id": pid}, "quantity": 3, "location": "A"}),
    )
    .await?;
    let id = row["id"].as_i64().unwrap();

    let res = c.patch(app.url(&format!("/data/inventory/{id}/quantity/0"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let out = c.get(app.url("/data/inventory/out-of-stock")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(out.len(), 1);

    let res = c.patch(app.url(&format!("/data/inventory/{id}/quantity/-1"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let res = c.patch(app.url("/data/inventory/999/quantity/-1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(app.url("/data/unknown")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_search_terms_match_literally() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    for name in ["Garden", "50% Off"] {
        post_json(&c, app.url("/data/categories"), json!({"name": name})).await?;
    }
    for name in ["Lamp", "snake_case mug"] {
        post_json(&c, app.url("/data/products"), json!({"name": name, "price": 5})).await?;
    }

    let hits = c.get(app.url("/data/categories/search?name=%25")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "50% Off");
    let hits = c.get(app.url("/data/categories/search?name=_")).send().await?.json::<Vec<Value>>().await?;
    assert!(hits.is_empty());

    let hits = c.get(app.url("/data/products/search?name=_")).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "snake_case mug");
    Ok(())
}
