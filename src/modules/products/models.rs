use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storage-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A catalog product as stored and as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the store on creation
    pub id: ProductId,
    /// Display name, 3 to 100 characters
    pub name: String,
    /// Unit price, strictly positive
    pub price: Decimal,
    /// Free-form description, at most 2000 characters
    pub description: Option<String>,
    /// Image location, at most 255 characters
    pub image_url: Option<String>,
}

impl Product {
    /// Overwrite every mutable field with `input`; the id is kept.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        self.description = input.description;
        self.image_url = input.image_url;
    }
}

/// Validated mutable fields of a product, used by both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ProductInput {
    /// Attach a storage-assigned id.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

/// Request body for creating or replacing a product.
///
/// Every field is optional at the wire level so that missing values are
/// reported as field errors rather than as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
