//! Storage backend abstraction for the catalog.
//!
//! This module defines the traits that abstract over the places product records can live,
//! so the same [`Catalog`](crate::catalog::Catalog) and the same protocol adapters can run on
//! top of an in-memory map during tests and a document database in production.
//!
//! # Traits
//!
//! - [`ProductStore`]: The core trait for storage backends
//! - [`ProductStoreBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use catalog::{backend::{ProductStore, ProductStoreBuilder}, memory::InMemoryStore};
//!
//! let store = InMemoryStore::builder().build().await?;
//! let created = store.create(new_product).await?;
//! assert_eq!(store.get(&created.id).await?, Some(created));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::StoreResult,
    product::{NewProduct, Product, ProductId, ProductPatch},
};

/// The order in which a backend returns [`ProductStore::list`] results.
///
/// Each backend documents its own policy; the two are not expected to agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Oldest record first, in the order records were created.
    Insertion,
    /// Most recently created record first (`createdAt` descending).
    NewestFirst,
}

/// Abstract interface for product storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks. Each individual operation must be atomic with respect to every other
/// operation: no caller may observe a half-applied create, update or delete.
///
/// # Not found
///
/// A missing record is not an error at this layer. `get`, `update` and `delete` return
/// `Ok(None)` for an identifier that does not name a live record, and [`StoreError`]
/// is reserved for infrastructure faults.
///
/// [`StoreError`]: crate::error::StoreError
#[async_trait]
pub trait ProductStore: Send + Sync + Debug {
    /// Parses a wire identifier into this backend's identifier type.
    ///
    /// Returns `None` when `raw` cannot possibly name a record in this backend.
    fn parse_id(&self, raw: &str) -> Option<ProductId>;

    /// The ordering policy of [`ProductStore::list`].
    fn list_order(&self) -> ListOrder;

    /// Assigns a fresh identifier and creation timestamp, stores the record and returns it.
    ///
    /// Identifiers are never reused, even after the record they named is deleted.
    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    /// Retrieves a single record.
    async fn get(&self, id: &ProductId) -> StoreResult<Option<Product>>;

    /// Retrieves every record, ordered according to [`ProductStore::list_order`].
    async fn list(&self) -> StoreResult<Vec<Product>>;

    /// Merges the provided fields of `patch` into an existing record and returns the result.
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> StoreResult<Option<Product>>;

    /// Removes a record and returns it as it was just before removal.
    async fn delete(&self, id: &ProductId) -> StoreResult<Option<Product>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op, but backends with external connections
    /// should override this.
    async fn shutdown(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Factory for backend instances.
#[async_trait]
pub trait ProductStoreBuilder {
    type Backend: ProductStore;

    async fn build(self) -> StoreResult<Self::Backend>;
}
