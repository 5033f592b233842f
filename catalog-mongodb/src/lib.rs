//! MongoDB backend implementation for the catalog.
//!
//! This crate provides a MongoDB-based implementation of the `ProductStore` trait,
//! enabling persistent product storage.
//!
//! To use this backend, include the `mongodb` feature of the `catalog` crate in your `Cargo.toml`
//! (it is enabled by default):
//!
//! ```toml
//! [dependencies]
//! catalog = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Opaque identifiers** - Products are keyed by driver-generated ObjectIds
//! - **Newest-first listing** - Backed by a descending `createdAt` index
//! - **Bounded latency** - Server selection and connect timeouts surface outages as errors
//!
//! # Example
//!
//! ```ignore
//! use catalog::{backend::ProductStoreBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "shop")
//!         .collection("products")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as catalog_mongodb;

pub mod store;
mod document;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
