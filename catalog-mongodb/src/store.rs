use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection, IndexModel,
    error::{Error as DriverError, ErrorKind},
    options::{ClientOptions, ReturnDocument},
};
use std::time::Duration;
use tracing::{debug, info};

use catalog_core::{
    backend::{ListOrder, ProductStore, ProductStoreBuilder},
    error::{StoreError, StoreResult},
    product::{NewProduct, Product, ProductId, ProductPatch},
};

use crate::document::{ProductDocument, object_id, set_document};

/// Collection used when the builder is not told otherwise.
pub const DEFAULT_COLLECTION: &str = "products";

/// Upper bound on server selection and connection setup when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// MongoDB-backed product store.
///
/// Identifiers are ObjectIds rendered as 24-character hex strings. Listing returns the most
/// recently created products first ([`ListOrder::NewestFirst`]). Each operation maps onto one
/// single-document server command, so it is atomic on the server.
#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
    collection: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String, collection: String) -> Self {
        Self { client, database, collection }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self) -> MongoCollection<ProductDocument> {
        self.client
            .database(&self.database)
            .collection(&self.collection)
    }

    /// Verifies the server is reachable and the listing index exists.
    pub async fn ensure_ready(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        self.get_collection()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "createdAt": -1 })
                    .build()
            )
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProductStore for MongoDbStore {
    fn parse_id(&self, raw: &str) -> Option<ProductId> {
        // Lowercase hex only, the form ids are rendered in
        ObjectId::parse_str(raw)
            .ok()
            .map(|oid| oid.to_hex())
            .filter(|hex| hex == raw)
            .map(ProductId::Object)
    }

    fn list_order(&self) -> ListOrder {
        ListOrder::NewestFirst
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let document = ProductDocument::new(product, Utc::now());

        self.get_collection()
            .insert_one(&document)
            .await
            .map_err(driver_error)?;

        Ok(document.into())
    }

    async fn get(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        Ok(
            self.get_collection()
                .find_one(doc! { "_id": oid })
                .await
                .map_err(driver_error)?
                .map(Product::from)
        )
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(
            self.get_collection()
                .find(doc! {})
                .sort(doc! { "createdAt": -1 })
                .await
                .map_err(driver_error)?
                .try_collect::<Vec<ProductDocument>>()
                .await
                .map_err(driver_error)?
                .into_iter()
                .map(Product::from)
                .collect()
        )
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        // `$set` with no fields is rejected by the server
        if patch.is_empty() {
            return self.get(id).await;
        }

        Ok(
            self.get_collection()
                .find_one_and_update(doc! { "_id": oid }, set_document(&patch))
                .return_document(ReturnDocument::After)
                .await
                .map_err(driver_error)?
                .map(Product::from)
        )
    }

    async fn delete(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        Ok(
            self.get_collection()
                .find_one_and_delete(doc! { "_id": oid })
                .await
                .map_err(driver_error)?
                .map(Product::from)
        )
    }

    async fn shutdown(&self) -> StoreResult<()> {
        self.client.clone().shutdown().await;
        debug!("mongodb client shut down");

        Ok(())
    }
}

/// Maps a driver error on a data operation to the store error it represents.
fn driver_error(err: DriverError) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::BsonDeserialization(_) => StoreError::InvalidDocument(err.to_string()),
        ErrorKind::BsonSerialization(_) => StoreError::Serialization(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Builder for [`MongoDbStore`].
///
/// The timeout bounds both server selection and connection setup, so an unreachable server
/// turns into a [`StoreError`] instead of a request that never finishes.
pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
    collection: String,
    timeout: Duration,
    connect_eagerly: bool,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_eagerly: true,
        }
    }

    pub fn collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether `build` pings the server and creates the listing index. Defaults to `true`.
    pub fn connect_eagerly(mut self, connect_eagerly: bool) -> Self {
        self.connect_eagerly = connect_eagerly;
        self
    }
}

#[async_trait]
impl ProductStoreBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);

        let store = MongoDbStore::new(
            Client::with_options(options)
                .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
            self.collection,
        );

        if self.connect_eagerly {
            store.ensure_ready().await?;
            info!(database = %store.database, collection = %store.collection, "connected to mongodb");
        }

        Ok(store)
    }
}
