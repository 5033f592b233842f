#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog::{
    Catalog,
    backend::{ListOrder, ProductStore},
    error::{StoreError, StoreResult},
    memory::InMemoryStore,
    product::{NewProduct, Product, ProductId, ProductPatch},
};

// ── App builders ───────────────────────────────────────────────

pub fn app() -> (Router, Catalog) {
    let catalog = Catalog::new(InMemoryStore::new());

    (catalog::app::router(catalog.clone()), catalog)
}

pub fn broken_app() -> Router {
    catalog::app::router(Catalog::new(DownStore))
}

// ── Request helpers ────────────────────────────────────────────

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    dispatch(app, request.body(body).unwrap()).await
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }

    dispatch(app, request.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn graphql(app: &Router, query: &str, variables: Value) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/graphql",
        Some(json!({ "query": query, "variables": variables })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "graphql transport failed: {body}");

    body
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, body)
}

// ── Failing store ──────────────────────────────────────────────

pub const BACKEND_DETAIL: &str = "connection refused (10.0.0.7:27017)";

/// A store whose every data operation fails, as if the database were down.
#[derive(Debug)]
pub struct DownStore;

impl DownStore {
    fn fail<T>(&self) -> StoreResult<T> {
        Err(StoreError::Backend(BACKEND_DETAIL.to_string()))
    }
}

#[async_trait]
impl ProductStore for DownStore {
    fn parse_id(&self, raw: &str) -> Option<ProductId> {
        raw.parse::<u64>().ok().map(ProductId::Sequence)
    }

    fn list_order(&self) -> ListOrder {
        ListOrder::Insertion
    }

    async fn create(&self, _product: NewProduct) -> StoreResult<Product> {
        self.fail()
    }

    async fn get(&self, _id: &ProductId) -> StoreResult<Option<Product>> {
        self.fail()
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        self.fail()
    }

    async fn update(&self, _id: &ProductId, _patch: ProductPatch) -> StoreResult<Option<Product>> {
        self.fail()
    }

    async fn delete(&self, _id: &ProductId) -> StoreResult<Option<Product>> {
        self.fail()
    }
}
