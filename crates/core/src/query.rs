//! Search queries, sort keys and suggestion results.

use serde::{Deserialize, Serialize};

use crate::product::{Category, Product, Seller};
use crate::types::{CategoryId, Price};

/// Catalog ordering applied after filtering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    /// Most reviewed first.
    Bestselling,
    /// Most recently added first.
    #[default]
    Newest,
}

impl SortKey {
    /// Parse from a URL parameter value.
    ///
    /// Unrecognized values fall back to [`SortKey::Newest`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "price_asc" | "price-ascending" => Self::PriceAsc,
            "price_desc" | "price-descending" => Self::PriceDesc,
            "rating_desc" | "rating" => Self::RatingDesc,
            "bestselling" | "best-selling" => Self::Bestselling,
            _ => Self::Newest,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::RatingDesc => "rating_desc",
            Self::Bestselling => "bestselling",
            Self::Newest => "newest",
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SortKey> for &'static str {
    fn from(sort: SortKey) -> Self {
        sort.as_str()
    }
}

/// A catalog search. Every field is optional; supplied filters are conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Free-text term matched against name and description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Inclusive lower price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Price>,
    /// Inclusive rating floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub sort: SortKey,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

impl SearchQuery {
    /// The normalized search term: trimmed and lowercased, `None` when blank.
    #[must_use]
    pub fn term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// The requested page, defaulting to 1 when missing or below 1.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
            .and_then(|page| usize::try_from(page).ok())
            .filter(|&page| page >= 1)
            .unwrap_or(1)
    }
}

/// Search-as-you-type results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub sellers: Vec<Seller>,
}

impl Suggestions {
    /// Check if there are any suggestions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty() && self.sellers.is_empty()
    }
}
