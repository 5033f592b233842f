//! Validation and normalization of untyped product input.
//!
//! Both protocol adapters funnel their input through this module as a
//! [`serde_json::Value`]: REST hands over the request body, GraphQL assembles one from the
//! resolver arguments. Whatever passes comes out as a [`NewProduct`] or [`ProductPatch`];
//! whatever fails comes out as a [`ValidationErrors`] listing every offending field.
//!
//! # Rules
//!
//! - `name`: string, non-empty after trimming, stored trimmed. Required on create.
//! - `price`: finite non-negative number, or a string that parses to one. Required on create.
//! - `description`: string. Defaults to `""` on create.
//! - `inStock`: boolean. Defaults to `true` on create.
//! - `null` counts as absent. `id`, `createdAt` and unknown keys are ignored.

use serde_json::{Map, Value};

use crate::{
    error::ValidationErrors,
    product::{NewProduct, ProductPatch},
};

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const PRICE: &str = "price";
const IN_STOCK: &str = "inStock";

/// Validates a creation payload.
pub fn validate_new(input: &Value) -> Result<NewProduct, ValidationErrors> {
    let fields = as_object(input)?;
    let mut errors = ValidationErrors::new();

    let name = match present(fields, NAME) {
        Some(value) => parse_name(value, &mut errors),
        None => {
            errors.missing(NAME);
            None
        }
    };
    let price = match present(fields, PRICE) {
        Some(value) => parse_price(value, &mut errors),
        None => {
            errors.missing(PRICE);
            None
        }
    };
    let description = present(fields, DESCRIPTION)
        .and_then(|value| parse_description(value, &mut errors));
    let in_stock = present(fields, IN_STOCK)
        .and_then(|value| parse_in_stock(value, &mut errors));

    match (name, price) {
        (Some(name), Some(price)) => errors.into_result(NewProduct {
            name,
            description: description.unwrap_or_default(),
            price,
            in_stock: in_stock.unwrap_or(true),
        }),
        _ => Err(errors),
    }
}

/// Validates a partial update payload. Fields that are absent stay `None`.
pub fn validate_patch(input: &Value) -> Result<ProductPatch, ValidationErrors> {
    let fields = as_object(input)?;
    let mut errors = ValidationErrors::new();

    let patch = ProductPatch {
        name: present(fields, NAME).and_then(|value| parse_name(value, &mut errors)),
        description: present(fields, DESCRIPTION)
            .and_then(|value| parse_description(value, &mut errors)),
        price: present(fields, PRICE).and_then(|value| parse_price(value, &mut errors)),
        in_stock: present(fields, IN_STOCK).and_then(|value| parse_in_stock(value, &mut errors)),
    };

    errors.into_result(patch)
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    input.as_object().ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.malformed("body", "request body must be a JSON object");
        errors
    })
}

/// Looks up a key, treating an explicit `null` the same as a missing key.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields
        .get(key)
        .filter(|value| !value.is_null())
}

fn parse_name(value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    match value.as_str().map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        Some(_) => {
            errors.malformed(NAME, "name must not be empty");
            None
        }
        None => {
            errors.malformed(NAME, "name must be a string");
            None
        }
    }
}

fn parse_price(value: &Value, errors: &mut ValidationErrors) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        // `+ 0.0` folds -0.0 into 0.0
        Some(price) if price.is_finite() && price >= 0.0 => Some(price + 0.0),
        _ => {
            errors.malformed(PRICE, "price must be a non-negative number");
            None
        }
    }
}

fn parse_description(value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    match value.as_str() {
        Some(description) => Some(description.to_string()),
        None => {
            errors.malformed(DESCRIPTION, "description must be a string");
            None
        }
    }
}

fn parse_in_stock(value: &Value, errors: &mut ValidationErrors) -> Option<bool> {
    match value.as_bool() {
        Some(in_stock) => Some(in_stock),
        None => {
            errors.malformed(IN_STOCK, "inStock must be a boolean");
            None
        }
    }
}
