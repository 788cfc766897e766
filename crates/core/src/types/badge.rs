//! Promotional badges attached to products.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A promotional tag on a product.
///
/// Known badges map to their own variants; any other tag coming from the
/// catalog is kept verbatim in [`Badge::Other`] so that it round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Badge {
    /// Featured on the home page.
    Bestseller,
    New,
    /// Grown in Subang, West Java.
    AsliSubang,
    Promo,
    PreOrder,
    Organik,
    Other(String),
}

impl Badge {
    /// The wire representation of the badge.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bestseller => "bestseller",
            Self::New => "new",
            Self::AsliSubang => "asli-subang",
            Self::Promo => "promo",
            Self::PreOrder => "pre-order",
            Self::Organik => "organik",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Badge {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "bestseller" => Self::Bestseller,
            "new" => Self::New,
            "asli-subang" => Self::AsliSubang,
            "promo" => Self::Promo,
            "pre-order" => Self::PreOrder,
            "organik" => Self::Organik,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Badge {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<Badge> for String {
    fn from(badge: Badge) -> Self {
        match badge {
            Badge::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_badges_parse() {
        let badges: Vec<Badge> =
            serde_json::from_str(r#"["bestseller", "asli-subang", "pre-order"]"#).unwrap();
        assert_eq!(
            badges,
            vec![Badge::Bestseller, Badge::AsliSubang, Badge::PreOrder]
        );
    }

    #[test]
    fn test_unknown_badge_round_trips() {
        let badge: Badge = serde_json::from_str("\"limited-edition\"").unwrap();
        assert_eq!(badge, Badge::Other("limited-edition".to_string()));
        assert_eq!(
            serde_json::to_string(&badge).unwrap(),
            "\"limited-edition\""
        );
    }
}
