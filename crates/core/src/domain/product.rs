use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::validation::{FieldKind, FieldSpec, Payload};

pub const DEFAULT_STATUS: &str = "active";
pub const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub status: String,
    #[serde(with = "crate::clock::iso8601")]
    pub created_at: NaiveDateTime,
    #[serde(with = "crate::clock::iso8601")]
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == DEFAULT_STATUS
    }

    /// Overwrites every field the patch provides and refreshes `updated_at`.
    ///
    /// `updated_at` never moves behind its previous value, so a wall clock
    /// stepping backwards cannot break `created_at <= updated_at`.
    pub fn apply_patch(&mut self, patch: ProductPatch, now: NaiveDateTime) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now.max(self.updated_at);
    }
}

/// Create payload. `description` and `status` fall back to their defaults
/// when absent or `null`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId, now: NaiveDateTime) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            price: self.price,
            stock: self.stock,
            category: self.category,
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Payload for NewProduct {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::optional("description", FieldKind::Text),
        FieldSpec::required("price", FieldKind::Float),
        FieldSpec::required("stock", FieldKind::Integer),
        FieldSpec::required("category", FieldKind::Text),
        FieldSpec::optional("status", FieldKind::Text),
    ];
}

/// Sparse update payload: `None` means "not provided" and leaves the stored
/// value untouched.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl Payload for ProductPatch {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("name", FieldKind::Text),
        FieldSpec::optional("description", FieldKind::Text),
        FieldSpec::optional("price", FieldKind::Float),
        FieldSpec::optional("stock", FieldKind::Integer),
        FieldSpec::optional("category", FieldKind::Text),
        FieldSpec::optional("status", FieldKind::Text),
    ];
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub active: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl CatalogSummary {
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |mut summary, product| {
            summary.total += 1;
            if product.is_active() {
                summary.active += 1;
            }
            if product.stock == 0 {
                summary.out_of_stock += 1;
            } else if product.stock > 0 && product.stock <= LOW_STOCK_THRESHOLD {
                summary.low_stock += 1;
            }
            summary
        })
    }
}
