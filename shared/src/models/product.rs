//! Product and variant models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity.
///
/// A product either carries its own `price` (no variants) or delegates
/// pricing to its variants, in which case `price` is NULL and the buyer
/// must pick a variant at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Base price; NULL when the product is priced per variant
    pub price: Option<Decimal>,
    /// Minimum quantity per order line, 1 unless the store raises it
    pub min_quantity: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Product variant (size, flavor, bundle). Owns its own price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductVariant {
    pub id: i64,
    pub product_id: i64,
    pub label: String,
    pub price: Decimal,
    pub is_active: bool,
    pub display_order: i32,
}

/// Product with its variants loaded, as the order workflow consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}

impl ProductDetail {
    pub fn active_variants(&self) -> impl Iterator<Item = &ProductVariant> {
        self.variants.iter().filter(|v| v.is_active)
    }

    /// Whether ordering this product requires choosing a variant.
    /// Only active variants count; a product whose variants were all
    /// disabled behaves like a simple-priced product again.
    pub fn requires_variant(&self) -> bool {
        self.active_variants().next().is_some()
    }

    pub fn find_active_variant(&self, variant_id: i64) -> Option<&ProductVariant> {
        self.active_variants().find(|v| v.id == variant_id)
    }
}
