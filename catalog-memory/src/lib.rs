//! In-memory product storage backend for the catalog.
//!
//! This crate provides a thread-safe, in-memory implementation of the `ProductStore` trait.
//! It uses async-aware read-write locks for concurrent access and is ideal for development,
//! testing, and demos.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Stable identifiers** - Monotonic integer ids that are never reused
//! - **Insertion-ordered listing** - Records come back in the order they were created
//! - **Seeding** - Optional initial products via the builder
//!
//! # Quick Start
//!
//! ```ignore
//! use catalog::{Catalog, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = Catalog::new(InMemoryStore::new());
//!
//!     let laptop = catalog
//!         .create(&json!({ "name": "Laptop", "price": 1000 }))
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(laptop.id.to_string(), "1");
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as catalog_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
