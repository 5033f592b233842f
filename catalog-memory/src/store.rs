//! In-memory storage implementation for the catalog.
//!
//! Products live in an ordered map keyed by a monotonically increasing sequence number and
//! guarded by an async-aware read-write lock.

use async_trait::async_trait;
use chrono::Utc;
use mea::rwlock::RwLock;
use std::{collections::BTreeMap, sync::Arc};
use tracing::debug;

use catalog_core::{
    backend::{ListOrder, ProductStore, ProductStoreBuilder},
    error::StoreResult,
    product::{NewProduct, Product, ProductId, ProductPatch},
};

/// Records plus the last identifier handed out.
///
/// `last_id` only ever grows, so a deleted identifier is never assigned again. Because keys
/// are assigned in increasing order, iterating `products` yields insertion order.
#[derive(Debug, Default)]
struct Shelf {
    last_id: u64,
    products: BTreeMap<u64, Product>,
}

/// Thread-safe in-memory product storage backend.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data. Every mutation happens under a single write lock,
/// which makes each operation atomic.
///
/// # Identifiers
///
/// Identifiers are [`ProductId::Sequence`] values starting at 1. Listing returns records in
/// insertion order ([`ListOrder::Insertion`]).
///
/// # Example
///
/// ```ignore
/// use catalog_memory::InMemoryStore;
/// use catalog_core::backend::ProductStore;
///
/// let store = InMemoryStore::new();
/// let laptop = store.create(new_laptop).await?;
/// assert_eq!(laptop.id, ProductId::Sequence(1));
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    shelf: Arc<RwLock<Shelf>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an `InMemoryStore` with initial products.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    fn key(id: &ProductId) -> Option<u64> {
        match id {
            ProductId::Sequence(n) => Some(*n),
            ProductId::Object(_) => None,
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    fn parse_id(&self, raw: &str) -> Option<ProductId> {
        // Only canonical decimal, so each record has exactly one spelling
        if raw.is_empty() || raw.starts_with('0') || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        raw.parse::<u64>().ok().map(ProductId::Sequence)
    }

    fn list_order(&self) -> ListOrder {
        ListOrder::Insertion
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let mut shelf = self.shelf.write().await;

        shelf.last_id += 1;
        let key = shelf.last_id;
        let created = Product::from_new(ProductId::Sequence(key), product, Utc::now());

        shelf.products.insert(key, created.clone());

        Ok(created)
    }

    async fn get(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        Ok(
            self.shelf
                .read()
                .await
                .products
                .get(&key)
                .cloned()
        )
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(
            self.shelf
                .read()
                .await
                .products
                .values()
                .cloned()
                .collect()
        )
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        let mut shelf = self.shelf.write().await;

        Ok(
            shelf.products
                .get_mut(&key)
                .map(|product| {
                    patch.apply(product);
                    product.clone()
                })
        )
    }

    async fn delete(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        let Some(key) = Self::key(id) else {
            return Ok(None);
        };

        Ok(
            self.shelf
                .write()
                .await
                .products
                .remove(&key)
        )
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// Products given to [`seed`](Self::seed) are created, in order, when the store is built,
/// so they receive the first identifiers.
///
/// # Example
///
/// ```ignore
/// use catalog_memory::InMemoryStore;
/// use catalog_core::backend::ProductStoreBuilder;
///
/// let store = InMemoryStore::builder()
///     .with_demo_products()
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    seed: Vec<NewProduct>,
}

impl InMemoryStoreBuilder {
    /// Adds a product to be created when the store is built.
    pub fn seed(mut self, product: NewProduct) -> Self {
        self.seed.push(product);
        self
    }

    /// Seeds the two demo products the catalog has always shipped with.
    pub fn with_demo_products(self) -> Self {
        self.seed(NewProduct {
            name: "Laptop".to_string(),
            description: String::new(),
            price: 1000.0,
            in_stock: true,
        })
        .seed(NewProduct {
            name: "Phone".to_string(),
            description: String::new(),
            price: 500.0,
            in_stock: true,
        })
    }
}

#[async_trait]
impl ProductStoreBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let store = InMemoryStore::new();
        let count = self.seed.len();

        for product in self.seed {
            store.create(product).await?;
        }

        if count > 0 {
            debug!(count, "seeded in-memory store");
        }

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price,
            in_stock: true,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = InMemoryStore::new();

        let first = store.create(new_product("Laptop", 1000.0)).await.unwrap();
        let second = store.create(new_product("Phone", 500.0)).await.unwrap();

        assert_eq!(first.id, ProductId::Sequence(1));
        assert_eq!(second.id, ProductId::Sequence(2));
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = InMemoryStore::new();

        let first = store.create(new_product("Laptop", 1000.0)).await.unwrap();
        store.delete(&first.id).await.unwrap();
        let second = store.create(new_product("Phone", 500.0)).await.unwrap();

        assert_eq!(second.id, ProductId::Sequence(2));
        assert_eq!(store.get(&first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_is_insertion_ordered() {
        let store = InMemoryStore::new();
        for name in ["a", "b", "c"] {
            store.create(new_product(name, 1.0)).await.unwrap();
        }
        store.delete(&ProductId::Sequence(2)).await.unwrap();

        let names = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(store.list_order(), ListOrder::Insertion);
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryStore::new();
        let patch = ProductPatch {
            price: Some(1.0),
            ..Default::default()
        };

        assert_eq!(store.update(&ProductId::Sequence(1), patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_object_ids_never_match() {
        let store = InMemoryStore::new();
        store.create(new_product("Laptop", 1000.0)).await.unwrap();

        let foreign = ProductId::Object("1".into());
        assert_eq!(store.get(&foreign).await.unwrap(), None);
        assert_eq!(store.delete(&foreign).await.unwrap(), None);
    }

    #[test]
    fn test_parse_id() {
        let store = InMemoryStore::new();

        assert_eq!(store.parse_id("42"), Some(ProductId::Sequence(42)));
        assert_eq!(store.parse_id("0"), None);
        assert_eq!(store.parse_id("-3"), None);
        assert_eq!(store.parse_id("1.5"), None);
        assert_eq!(store.parse_id("+1"), None);
        assert_eq!(store.parse_id("01"), None);
        assert_eq!(store.parse_id(" 1 "), None);
        assert_eq!(store.parse_id(""), None);
        assert_eq!(store.parse_id("65a1f0c2e4b0a1b2c3d4e5f6"), None);
    }

    #[tokio::test]
    async fn test_builder_seeds_demo_products() {
        let store = InMemoryStore::builder()
            .with_demo_products()
            .build()
            .await
            .unwrap();

        let products = store.list().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Laptop");
        assert_eq!(products[1].id, ProductId::Sequence(2));
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        let created = clone.create(new_product("Laptop", 1000.0)).await.unwrap();

        assert_eq!(store.get(&created.id).await.unwrap(), Some(created));
    }
}
