//! Decoding of API response bodies into typed records.
//!
//! The service is loose about response shapes: a single entity may arrive as
//! a bare object or wrapped in a one-element array, and list endpoints wrap
//! their results in an object under `productlist`. This module normalizes
//! those shapes and applies lenient per-field defaults.
//!
//! Each operation comes in two forms. The `try_*` functions report the exact
//! [`DecodeError`]; the plain functions absorb it and return the empty value
//! the client hands back to callers.
//!
//! # Example
//!
//! ```rust
//! use ean_search::decoder;
//!
//! let single = decoder::decode_single(r#"[{"ean":"123","name":"Thing"}]"#).unwrap();
//! assert_eq!(single.product.name, "Thing");
//!
//! let list = decoder::decode_list(r#"{"productlist":[{"ean":"1"}, 7, {"ean":"2"}]}"#);
//! assert_eq!(list.len(), 2);
//!
//! assert!(decoder::decode_list("not json").is_empty());
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Product, ProductFull};

/// Field holding the results of the search endpoints.
pub const PRODUCT_LIST_FIELD: &str = "productlist";

/// Reasons a response body could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is an empty array.
    #[error("Response contains no entity")]
    NotFound,

    /// The entity is not a JSON object.
    #[error("Response entity is not a JSON object")]
    NotAnObject,

    /// The body has no `productlist` array.
    #[error("Response has no 'productlist' array")]
    MissingList,

    /// A requested leaf field is absent.
    #[error("Response has no '{field}' field")]
    MissingField {
        /// Name of the absent field.
        field: String,
    },
}

/// Parses a response body as JSON.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the body is not valid JSON.
pub fn parse(body: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

/// Picks the entity out of a single-entity response.
///
/// A non-empty array root yields its first element, an empty array yields
/// [`DecodeError::NotFound`], anything else is returned unchanged.
///
/// # Errors
///
/// Returns [`DecodeError::NotFound`] for an empty array root.
pub fn normalize_single(root: &Value) -> Result<&Value, DecodeError> {
    match root {
        Value::Array(items) => items.first().ok_or(DecodeError::NotFound),
        other => Ok(other),
    }
}

/// Decodes a barcode or ISBN lookup response.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the body is not JSON, is an empty array, or
/// the entity is not an object.
pub fn try_decode_single(body: &str) -> Result<ProductFull, DecodeError> {
    let root = parse(body)?;
    let node = normalize_single(&root)?;
    ProductFull::from_json(node).ok_or(DecodeError::NotAnObject)
}

/// Decodes a barcode or ISBN lookup response, absorbing errors into `None`.
#[must_use]
pub fn decode_single(body: &str) -> Option<ProductFull> {
    absorb(try_decode_single(body))
}

/// Decodes a search response.
///
/// Elements of `productlist` that are not objects are skipped.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the body is not JSON or has no
/// `productlist` array.
pub fn try_decode_list(body: &str) -> Result<Vec<Product>, DecodeError> {
    let root = parse(body)?;
    let items = root
        .get(PRODUCT_LIST_FIELD)
        .and_then(Value::as_array)
        .ok_or(DecodeError::MissingList)?;
    Ok(items.iter().filter_map(Product::from_json).collect())
}

/// Decodes a search response, absorbing errors into an empty list.
#[must_use]
pub fn decode_list(body: &str) -> Vec<Product> {
    absorb(try_decode_list(body)).unwrap_or_default()
}

/// Extracts one scalar field from a single-entity response as text.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the body is not JSON, is an empty array, or
/// the field is absent from the entity.
pub fn try_decode_leaf(body: &str, field: &str) -> Result<String, DecodeError> {
    let root = parse(body)?;
    let node = normalize_single(&root)?;
    node.get(field)
        .map(text_value)
        .ok_or_else(|| DecodeError::MissingField {
            field: field.to_string(),
        })
}

/// Extracts one scalar field as text, absorbing errors into `None`.
#[must_use]
pub fn decode_leaf(body: &str, field: &str) -> Option<String> {
    absorb(try_decode_leaf(body, field))
}

/// Reads the `valid` flag of a checksum verification response.
///
/// Anything but `"1"` or a case-insensitive `"true"` is `false`, including
/// an absent flag or an undecodable body.
#[must_use]
pub fn decode_valid(body: &str) -> bool {
    decode_leaf(body, "valid").is_some_and(|text| is_truthy(&text))
}

/// Returns whether a textual flag means "true" to the service.
#[must_use]
pub fn is_truthy(text: &str) -> bool {
    text == "1" || text.eq_ignore_ascii_case("true")
}

fn absorb<T>(result: Result<T, DecodeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "Discarding undecodable response");
            None
        }
    }
}

/// Reads a text field, defaulting to `""`.
pub(crate) fn text_field(object: &Map<String, Value>, name: &str) -> String {
    object.get(name).map(text_value).unwrap_or_default()
}

/// Reads an integer field, defaulting to `0`.
pub(crate) fn integer_field(object: &Map<String, Value>, name: &str) -> i64 {
    object.get(name).map_or(0, integer_value)
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integer_value(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|float| float as i64))
                .unwrap_or(0)
        }
        Value::Bool(flag) => i64::from(*flag),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}
