//! The CRUD mediator shared by every protocol adapter.
//!
//! [`Catalog`] is the only way the REST and GraphQL adapters reach product data. It owns the
//! sequence every operation follows:
//!
//! 1. parse the wire identifier with the backend's own rules (malformed means not found),
//! 2. validate and normalize untyped input (failures never reach the store),
//! 3. run exactly one store operation,
//! 4. translate the outcome into a [`CatalogError`] kind.
//!
//! Cloning a `Catalog` clones a handle, not the data: all clones observe and mutate the same
//! backend, which is what keeps two adapters built from one catalog consistent.
//!
//! # Example
//!
//! ```ignore
//! use catalog::{Catalog, memory::InMemoryStore};
//! use serde_json::json;
//!
//! let catalog = Catalog::new(InMemoryStore::new());
//! let laptop = catalog.create(&json!({ "name": "Laptop", "price": 1000 })).await?;
//! let fetched = catalog.get(&laptop.id.to_string()).await?;
//! assert_eq!(laptop, fetched);
//! ```

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::{
    backend::{ListOrder, ProductStore},
    error::{CatalogError, CatalogResult, StoreError},
    product::{Product, ProductId},
    validate::{validate_new, validate_patch},
};

#[derive(Debug, Clone)]
pub struct Catalog {
    store: Arc<dyn ProductStore>,
}

impl Catalog {
    /// Creates a catalog that takes ownership of `store`.
    pub fn new<S: ProductStore + 'static>(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates a catalog over an already shared store handle.
    pub fn from_shared(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// The ordering policy of [`Catalog::list`] for the underlying backend.
    pub fn list_order(&self) -> ListOrder {
        self.store.list_order()
    }

    pub async fn list(&self) -> CatalogResult<Vec<Product>> {
        self.store
            .list()
            .await
            .map_err(infrastructure("list"))
    }

    pub async fn get(&self, raw_id: &str) -> CatalogResult<Product> {
        let id = self.resolve_id(raw_id)?;

        self.store
            .get(&id)
            .await
            .map_err(infrastructure("get"))?
            .ok_or_else(|| not_found(&id))
    }

    pub async fn create(&self, input: &Value) -> CatalogResult<Product> {
        let product = validate_new(input)?;
        let created = self.store
            .create(product)
            .await
            .map_err(infrastructure("create"))?;

        debug!(id = %created.id, "product created");

        Ok(created)
    }

    /// Applies a partial update. The identifier is checked first, then the input, then the store.
    pub async fn update(&self, raw_id: &str, input: &Value) -> CatalogResult<Product> {
        let id = self.resolve_id(raw_id)?;
        let patch = validate_patch(input)?;

        let updated = self.store
            .update(&id, patch)
            .await
            .map_err(infrastructure("update"))?
            .ok_or_else(|| not_found(&id))?;

        debug!(id = %updated.id, "product updated");

        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> CatalogResult<Product> {
        let id = self.resolve_id(raw_id)?;

        let deleted = self.store
            .delete(&id)
            .await
            .map_err(infrastructure("delete"))?
            .ok_or_else(|| not_found(&id))?;

        debug!(id = %deleted.id, "product deleted");

        Ok(deleted)
    }

    /// Releases backend resources. Other clones of this catalog must not be used afterwards.
    pub async fn shutdown(&self) -> CatalogResult<()> {
        self.store
            .shutdown()
            .await
            .map_err(infrastructure("shutdown"))
    }

    fn resolve_id(&self, raw: &str) -> CatalogResult<ProductId> {
        self.store
            .parse_id(raw)
            .ok_or_else(|| CatalogError::NotFound(raw.to_string()))
    }
}

fn not_found(id: &ProductId) -> CatalogError {
    CatalogError::NotFound(id.to_string())
}

fn infrastructure(operation: &'static str) -> impl FnOnce(StoreError) -> CatalogError {
    move |err| {
        error!(operation, error = %err, "store operation failed");
        CatalogError::from(err)
    }
}
