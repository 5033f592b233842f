//! The product record and the validated fragments used to create and update it.
//!
//! [`Product`] is the only entity in the catalog. It is what backends store and what both
//! protocol adapters serialize. [`NewProduct`] and [`ProductPatch`] can only be produced by the
//! [`validate`](crate::validate) module, so a backend that accepts them never sees unchecked input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A product identifier.
///
/// The representation depends on the backend that assigned it: the in-memory store hands out
/// a monotonically increasing sequence number, a document store hands out an opaque string.
/// On the wire a sequence id is a JSON number and an opaque id is a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Sequence(u64),
    Object(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Sequence(n) => write!(f, "{n}"),
            ProductId::Object(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        ProductId::Sequence(n)
    }
}

/// A catalog record.
///
/// `id` and `created_at` are assigned by the store and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Builds the stored record for a freshly assigned identifier.
    pub fn from_new(id: ProductId, new: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            in_stock: new.in_stock,
            created_at,
        }
    }
}

/// A normalized creation payload with every default already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
}

/// A normalized partial update. `None` leaves the stored value untouched.
///
/// A patch cannot express a change to `id` or `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    /// Returns `true` if applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.in_stock.is_none()
    }

    /// Merges the provided fields into `product`.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
    }
}
