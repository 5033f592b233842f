//! REST adapter.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/` | 200 banner |
//! | GET | `/products` | 200 array |
//! | GET | `/products/:id` | 200 record |
//! | POST | `/products` | 201 created record |
//! | PUT | `/products/:id` | 200 updated record |
//! | DELETE | `/products/:id` | 200 deleted record |
//!
//! Failures use a fixed body per kind: `{"error": "Invalid data", "details": [...]}` (400),
//! `{"error": "Product not found"}` (404) and `{"error": "Server error"}` (500).

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tracing::debug;

use catalog_core::{
    catalog::Catalog,
    error::{CatalogError, ValidationErrors},
    product::Product,
};

pub const BANNER: &str = "Product catalog API is running. REST on /products, GraphQL on /graphql.";

/// Builds the REST routes over `catalog`.
pub fn routes(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(catalog)
}

/// A [`CatalogError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let mut errors = ValidationErrors::new();
        errors.malformed("body", rejection.body_text());

        Self(CatalogError::Validation(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CatalogError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid data", "details": errors })),
            )
                .into_response(),
            CatalogError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Product not found" })),
            )
                .into_response(),
            // Already logged by the catalog
            CatalogError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server error" })),
            )
                .into_response(),
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

async fn banner() -> &'static str {
    BANNER
}

async fn list_products(State(catalog): State<Catalog>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(catalog.list().await?))
}

async fn get_product(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    Ok(Json(catalog.get(&id).await?))
}

async fn create_product(
    State(catalog): State<Catalog>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = body?;
    let product = catalog.create(&input).await?;

    debug!(id = %product.id, "created product over rest");

    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Json(input) = body?;

    Ok(Json(catalog.update(&id, &input).await?))
}

async fn delete_product(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    Ok(Json(catalog.delete(&id).await?))
}
