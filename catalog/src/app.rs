//! Wiring: backend selection and the combined REST + GraphQL router.

use axum::{
    Router,
    http::{HeaderValue, Method},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use catalog_core::{
    backend::ProductStoreBuilder,
    catalog::Catalog,
    error::{StoreError, StoreResult},
};
use catalog_memory::InMemoryStore;

use crate::{
    config::{CorsConfig, ServerConfig, StoreKind},
    graphql, rest,
};

/// Builds both adapters over clones of one [`Catalog`] with permissive CORS.
pub fn router(catalog: Catalog) -> Router {
    router_with_cors(catalog, &CorsConfig::default())
}

/// Builds both adapters over clones of one [`Catalog`].
pub fn router_with_cors(catalog: Catalog, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(rest::routes(catalog.clone()))
        .merge(graphql::routes(catalog))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
}

/// Creates the CORS layer from config
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    cors.allow_origin(origins)
}

/// Connects the backend named by `config` and wraps it in a [`Catalog`].
pub async fn build_catalog(config: &ServerConfig) -> StoreResult<Catalog> {
    match config.store {
        StoreKind::Memory => {
            let mut builder = InMemoryStore::builder();
            if config.seed_demo {
                builder = builder.with_demo_products();
            }

            let catalog = Catalog::new(builder.build().await?);
            info!(seeded = config.seed_demo, "using in-memory store");

            Ok(catalog)
        }
        StoreKind::MongoDb => build_mongodb(config).await,
    }
}

#[cfg(feature = "mongodb")]
async fn build_mongodb(config: &ServerConfig) -> StoreResult<Catalog> {
    use catalog_mongodb::MongoDbStore;
    use std::time::Duration;

    let uri = config
        .mongo
        .uri
        .as_deref()
        .ok_or_else(|| StoreError::Initialization("MONGO_URI is not set".to_string()))?;

    if config.seed_demo {
        warn!("CATALOG_SEED_DEMO only applies to the in-memory store");
    }

    let store = MongoDbStore::builder(uri, &config.mongo.database)
        .collection(&config.mongo.collection)
        .timeout(Duration::from_millis(config.mongo.timeout_ms))
        .build()
        .await?;

    Ok(Catalog::new(store))
}

#[cfg(not(feature = "mongodb"))]
async fn build_mongodb(_config: &ServerConfig) -> StoreResult<Catalog> {
    Err(StoreError::Initialization(
        "built without the `mongodb` feature".to_string(),
    ))
}
