//! Catalog entities: products, variants, categories and sellers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Badge, CategoryId, Price, ProductId, SellerId, VariantId};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product invariant that does not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    #[error("product {0}: price is above the original price")]
    PriceAboveOriginal(ProductId),
    #[error("product {0}: price must not be negative")]
    NegativePrice(ProductId),
    #[error("product {id}: rating {rating} is outside 0..=5")]
    RatingOutOfRange { id: ProductId, rating: f64 },
    #[error("product {0}: minimum order quantity exceeds maximum")]
    OrderBoundsInverted(ProductId),
    #[error("product {product}: variant {variant} has a negative price")]
    NegativeVariantPrice {
        product: ProductId,
        variant: VariantId,
    },
}

/// A purchasable sub-option of a product, e.g. a pack size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    pub price: Price,
    /// `None` means unlimited or not yet harvested.
    #[serde(default)]
    pub stock: Option<u32>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub price: Price,
    /// Pre-discount price, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// `None` for pre-order or unlimited products.
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_order: Option<u32>,
    /// Shipping weight in grams.
    pub weight: u32,
    pub seller_id: SellerId,
    pub seller_name: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Check the product's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProductError`] found.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.price.is_negative() {
            return Err(ProductError::NegativePrice(self.id.clone()));
        }

        if let Some(original) = self.original_price
            && self.price > original
        {
            return Err(ProductError::PriceAboveOriginal(self.id.clone()));
        }

        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ProductError::RatingOutOfRange {
                id: self.id.clone(),
                rating: self.rating,
            });
        }

        if let (Some(min), Some(max)) = (self.min_order, self.max_order)
            && min > max
        {
            return Err(ProductError::OrderBoundsInverted(self.id.clone()));
        }

        if let Some(variant) = self.variants.iter().find(|v| v.price.is_negative()) {
            return Err(ProductError::NegativeVariantPrice {
                product: self.id.clone(),
                variant: variant.id.clone(),
            });
        }

        Ok(())
    }

    /// Whether the product carries the given badge.
    #[must_use]
    pub fn has_badge(&self, badge: &Badge) -> bool {
        self.badges.contains(badge)
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Whether the product is looked up by this id or slug.
    #[must_use]
    pub fn is_identified_by(&self, id_or_slug: &str) -> bool {
        self.id == id_or_slug || self.slug == id_or_slug
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A seller on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "slug": "nanas-madu-premium",
            "name": "Nanas Madu Premium",
            "description": "Nanas madu pilihan dari kebun Subang",
            "categoryId": "nanas-segar",
            "price": 45000,
            "originalPrice": 55000,
            "stock": 120,
            "badges": ["bestseller", "asli-subang"],
            "rating": 4.8,
            "reviewCount": 256,
            "weight": 1500,
            "sellerId": "seller-1",
            "sellerName": "Kebun Nanas Subang",
            "createdAt": "2024-03-15T08:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_product_deserializes_camel_case() {
        let product = product();
        assert_eq!(product.category_id, "nanas-segar");
        assert_eq!(product.original_price, Some(Price::from_rupiah(55_000)));
        assert_eq!(product.review_count, 256);
        assert!(product.variants.is_empty());
        assert!(product.has_badge(&Badge::Bestseller));
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(product().validate().is_ok());
    }

    #[test]
    fn test_price_above_original_rejected() {
        let mut product = product();
        product.original_price = Some(Price::from_rupiah(40_000));
        assert_eq!(
            product.validate(),
            Err(ProductError::PriceAboveOriginal(ProductId::new("1")))
        );
    }

    #[test]
    fn test_price_equal_to_original_allowed() {
        let mut product = product();
        product.original_price = Some(product.price);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut product = product();
        product.rating = 5.1;
        assert!(matches!(
            product.validate(),
            Err(ProductError::RatingOutOfRange { .. })
        ));

        product.rating = -0.5;
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_inverted_order_bounds_rejected() {
        let mut product = product();
        product.min_order = Some(10);
        product.max_order = Some(5);
        assert!(matches!(
            product.validate(),
            Err(ProductError::OrderBoundsInverted(_))
        ));
    }

    #[test]
    fn test_matches_text_is_case_insensitive() {
        let product = product();
        assert!(product.matches_text("madu"));
        assert!(product.matches_text("subang"));
        assert!(!product.matches_text("keripik"));
    }

    #[test]
    fn test_identified_by_id_or_slug() {
        let product = product();
        assert!(product.is_identified_by("1"));
        assert!(product.is_identified_by("nanas-madu-premium"));
        assert!(!product.is_identified_by("nanas"));
    }
}
