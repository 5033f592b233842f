//! Mapping between catalog products and their stored MongoDB form.
//!
//! Stored documents use the field names the catalog has always written:
//! `_id` (ObjectId), `name`, `description`, `price`, `inStock`, `createdAt` (BSON date).

use bson::{Document, doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::product::{NewProduct, Product, ProductId, ProductPatch};

fn default_in_stock() -> bool {
    true
}

/// A product as stored in the collection.
///
/// Older documents may lack `description` or `inStock`; they read back with the same defaults
/// validation applies on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub created_at: bson::DateTime,
}

impl ProductDocument {
    /// Builds a new document with a fresh ObjectId.
    pub(crate) fn new(product: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            name: product.name,
            description: product.description,
            price: product.price,
            in_stock: product.in_stock,
            created_at: bson::DateTime::from_chrono(now),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(document: ProductDocument) -> Self {
        Product {
            id: ProductId::Object(document.id.to_hex()),
            name: document.name,
            description: document.description,
            price: document.price,
            in_stock: document.in_stock,
            created_at: document.created_at.to_chrono(),
        }
    }
}

/// Converts a catalog identifier into the ObjectId it names, if it can name one at all.
pub(crate) fn object_id(id: &ProductId) -> Option<ObjectId> {
    match id {
        ProductId::Object(hex) => ObjectId::parse_str(hex).ok(),
        ProductId::Sequence(_) => None,
    }
}

/// Builds the `$set` body for a patch. Only provided fields appear.
pub(crate) fn set_document(patch: &ProductPatch) -> Document {
    let mut set = Document::new();

    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.as_str());
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    if let Some(in_stock) = patch.in_stock {
        set.insert("inStock", in_stock);
    }

    doc! { "$set": set }
}
