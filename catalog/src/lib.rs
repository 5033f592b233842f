//! Product catalog service exposing one store over REST and GraphQL.
//!
//! This crate is the entry point for running the catalog. It re-exports the core types from
//! `catalog-core`, the storage backends, and provides the two protocol adapters plus the
//! configuration that wires them to a backend chosen at start-up.
//!
//! # Quick Start
//!
//! ```ignore
//! use catalog::{prelude::*, memory::InMemoryStoreBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = InMemoryStoreBuilder::default()
//!         .with_demo_products()
//!         .build()
//!         .await?;
//!     let catalog = Catalog::new(store);
//!
//!     // REST on /products, GraphQL on /graphql, both against the same store
//!     let app = catalog::app::router(catalog.clone());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     catalog.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-process store with sequential numeric identifiers
//! - [`mongodb`] - MongoDB-backed store with ObjectId identifiers (requires `mongodb` feature)

pub mod app;
pub mod config;
pub mod graphql;
pub mod prelude;
pub mod rest;

pub use catalog_core::{backend, catalog::Catalog, error, product, validate};

/// In-memory storage backend.
pub mod memory {
    pub use catalog_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use catalog_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
