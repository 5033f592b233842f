//! Core of the catalog service: one product model, one validation boundary and one mediator
//! that every protocol adapter goes through.
//!
//! This crate provides:
//!
//! - **Product model** ([`product`]) - The record, its identifier and validated create/update fragments
//! - **Validation** ([`validate`]) - Turns untyped input into those fragments or a list of field errors
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing different storage backends
//! - **Catalog mediator** ([`catalog`]) - The create/read/update/delete entry point shared by REST and GraphQL
//! - **Error handling** ([`error`]) - Backend errors and the three catalog failure kinds
//!
//! # Example
//!
//! ```ignore
//! use catalog_core::catalog::Catalog;
//! use serde_json::json;
//!
//! let catalog = Catalog::new(backend);
//! let created = catalog.create(&json!({ "name": "Laptop", "price": 1000 })).await?;
//! let updated = catalog.update(&created.id.to_string(), &json!({ "price": 900 })).await?;
//! assert_eq!(updated.name, "Laptop");
//! ```

#[allow(unused_extern_crates)]
extern crate self as catalog_core;

pub mod backend;
pub mod catalog;
pub mod error;
pub mod product;
pub mod validate;
