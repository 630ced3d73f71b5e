//! Product records returned by lookup and search operations.

use serde::Serialize;
use serde_json::Value;

use crate::decoder::{integer_field, text_field};

/// Basic product information, as returned by the search endpoints.
///
/// Every field is always present: strings default to `""` and numbers to `0`
/// when the service omits them or sends an unexpected type.
///
/// # Example
///
/// ```rust
/// use ean_search::Product;
/// use serde_json::json;
///
/// let product = Product::from_json(&json!({
///     "ean": "5099750442227",
///     "name": "Bohemian Rhapsody",
///     "categoryId": "45"
/// }))
/// .unwrap();
///
/// assert_eq!(product.category_id, 45);
/// assert_eq!(product.category_name, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// EAN/UPC/GTIN code.
    pub ean: String,
    /// Human readable product name.
    pub name: String,
    /// Numeric category id.
    pub category_id: i64,
    /// Category name.
    pub category_name: String,
    /// ISO code of the country that issued the barcode.
    pub issuing_country: String,
}

impl Product {
    /// Decodes a product from a JSON object.
    ///
    /// Returns `None` if `node` is not a JSON object.
    #[must_use]
    pub fn from_json(node: &Value) -> Option<Self> {
        let object = node.as_object()?;
        Some(Self {
            ean: text_field(object, "ean"),
            name: text_field(object, "name"),
            category_id: integer_field(object, "categoryId"),
            category_name: text_field(object, "categoryName"),
            issuing_country: text_field(object, "issuingCountry"),
        })
    }
}

/// Full product information, as returned by barcode and ISBN lookups.
///
/// Adds the Google product taxonomy id to the fields of [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFull {
    /// The basic product fields.
    #[serde(flatten)]
    pub product: Product,
    /// Google product taxonomy category id.
    pub google_category_id: i64,
}

impl ProductFull {
    /// Decodes a full product from a JSON object.
    ///
    /// Returns `None` if `node` is not a JSON object.
    #[must_use]
    pub fn from_json(node: &Value) -> Option<Self> {
        let product = Product::from_json(node)?;
        let google_category_id = node
            .as_object()
            .map_or(0, |object| integer_field(object, "googleCategoryId"));
        Some(Self {
            product,
            google_category_id,
        })
    }

    /// Discards the extended fields.
    #[must_use]
    pub fn into_product(self) -> Product {
        self.product
    }
}

impl AsRef<Product> for ProductFull {
    fn as_ref(&self) -> &Product {
        &self.product
    }
}

impl From<ProductFull> for Product {
    fn from(full: ProductFull) -> Self {
        full.product
    }
}
