//! Convenient re-exports of commonly used types.
//!
//! ```ignore
//! use catalog::prelude::*;
//! ```

pub use catalog_core::{
    backend::{ListOrder, ProductStore, ProductStoreBuilder},
    catalog::Catalog,
    error::{CatalogError, CatalogResult, FieldError, FieldIssue, StoreError, StoreResult, ValidationErrors},
    product::{NewProduct, Product, ProductId, ProductPatch},
};

pub use crate::{
    app::{build_catalog, router, router_with_cors},
    config::{ConfigError, CorsConfig, MongoConfig, ServerConfig, StoreKind},
    graphql::CatalogSchema,
};
