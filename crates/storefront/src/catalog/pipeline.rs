//! The catalog query pipeline: filter, sort, paginate and suggest.
//!
//! Everything here is a pure function over borrowed catalog data. The
//! fixture backend calls into it directly; the HTTP backend relies on the
//! remote API implementing the same contract.

use std::cmp::Ordering;

use nanasu_core::{
    Badge, DEFAULT_PAGE_SIZE, PaginatedResponse, Product, SearchQuery, SortKey, Suggestions,
};

use super::fixtures::CatalogData;

/// Maximum number of products in a suggestion list.
pub const SUGGESTION_LIMIT: usize = 5;

/// Queries shorter than this (after trimming) get no suggestions.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Maximum number of related products.
pub const RELATED_LIMIT: usize = 4;

/// Run a search: filter, sort, then slice out the requested page.
///
/// Totals are computed over the filtered set, before pagination.
#[must_use]
pub fn search(products: &[Product], query: &SearchQuery) -> PaginatedResponse<Product> {
    let term = query.term();

    let mut matches: Vec<&Product> = products
        .iter()
        .filter(|product| matches_filters(product, query, term.as_deref()))
        .collect();

    sort_products(&mut matches, query.sort);

    PaginatedResponse::paginate(matches, query.page(), DEFAULT_PAGE_SIZE).map(Product::clone)
}

/// Whether a product satisfies every supplied filter.
///
/// Checked in order: text, category, lower price bound, upper price bound,
/// rating floor. `term` must already be normalized by [`SearchQuery::term`].
fn matches_filters(product: &Product, query: &SearchQuery, term: Option<&str>) -> bool {
    if let Some(term) = term
        && !product.matches_text(term)
    {
        return false;
    }

    if let Some(category) = &query.category
        && product.category_id != *category
    {
        return false;
    }

    if let Some(min_price) = query.min_price
        && product.price < min_price
    {
        return false;
    }

    if let Some(max_price) = query.max_price
        && product.price > max_price
    {
        return false;
    }

    if let Some(min_rating) = query.rating
        && product.rating < min_rating
    {
        return false;
    }

    true
}

/// Sort in place. The sort is stable, so ties keep catalog order.
pub fn sort_products(products: &mut [&Product], sort: SortKey) {
    let compare: fn(&Product, &Product) -> Ordering = match sort {
        SortKey::PriceAsc => |a, b| a.price.cmp(&b.price),
        SortKey::PriceDesc => |a, b| b.price.cmp(&a.price),
        SortKey::RatingDesc => |a, b| b.rating.total_cmp(&a.rating),
        SortKey::Bestselling => |a, b| b.review_count.cmp(&a.review_count),
        SortKey::Newest => |a, b| b.created_at.cmp(&a.created_at),
    };

    products.sort_by(|a, b| compare(a, b));
}

/// Find a product by exact id or slug.
#[must_use]
pub fn find<'a>(products: &'a [Product], id_or_slug: &str) -> Option<&'a Product> {
    products
        .iter()
        .find(|product| product.is_identified_by(id_or_slug))
}

/// Up to [`RELATED_LIMIT`] other products in the same category.
///
/// Returns `None` when `product_id` does not resolve.
#[must_use]
pub fn related(products: &[Product], product_id: &str) -> Option<Vec<Product>> {
    let source = products.iter().find(|product| product.id == product_id)?;

    Some(
        products
            .iter()
            .filter(|product| product.category_id == source.category_id && product.id != source.id)
            .take(RELATED_LIMIT)
            .cloned()
            .collect(),
    )
}

/// Every product carrying the `bestseller` badge, in catalog order.
#[must_use]
pub fn featured(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|product| product.has_badge(&Badge::Bestseller))
        .cloned()
        .collect()
}

/// Search-as-you-type suggestions.
///
/// Queries under [`MIN_SUGGESTION_QUERY_LEN`] characters return empty lists.
#[must_use]
pub fn suggest(data: &CatalogData, partial: &str) -> Suggestions {
    let trimmed = partial.trim();
    if trimmed.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Suggestions::default();
    }

    let needle = trimmed.to_lowercase();
    let name_matches = |name: &str| name.to_lowercase().contains(&needle);

    Suggestions {
        products: data
            .products
            .iter()
            .filter(|product| product.matches_text(&needle))
            .take(SUGGESTION_LIMIT)
            .cloned()
            .collect(),
        categories: data
            .categories
            .iter()
            .filter(|category| name_matches(&category.name))
            .cloned()
            .collect(),
        sellers: data
            .sellers
            .iter()
            .filter(|seller| name_matches(&seller.name))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use nanasu_core::{CategoryId, Price};

    use super::*;
    use crate::catalog::fixtures::bundled_data;

    fn data() -> CatalogData {
        bundled_data().unwrap()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_first_page_of_everything() {
        let data = data();
        let page = search(&data.products, &SearchQuery::default());

        assert_eq!(page.pagination.total, data.products.len());
        assert_eq!(page.pagination.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(page.data.len(), DEFAULT_PAGE_SIZE.min(data.products.len()));
    }

    #[test]
    fn test_category_and_price_asc() {
        let data = data();
        let query = SearchQuery {
            category: Some(CategoryId::new("nanas-segar")),
            sort: SortKey::PriceAsc,
            ..Default::default()
        };
        let page = search(&data.products, &query);

        assert!(page.data.iter().all(|p| p.category_id == "nanas-segar"));
        assert!(page.data.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_text_filter_matches_description_case_insensitively() {
        let data = data();
        let query = SearchQuery {
            q: Some("SUBANG".to_string()),
            ..Default::default()
        };
        let page = search(&data.products, &query);

        assert!(page.pagination.total > 0);
        assert!(page.data.iter().all(|p| p.matches_text("subang")));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let data = data();
        let query = SearchQuery {
            min_price: Some(Price::from_rupiah(38_000)),
            max_price: Some(Price::from_rupiah(45_000)),
            ..Default::default()
        };
        let page = search(&data.products, &query);

        let found = ids(&page.data);
        assert!(found.contains(&"1"), "45000 is on the upper bound");
        assert!(found.contains(&"2"), "38000 is on the lower bound");
        assert!(page.data.iter().all(|p| {
            p.price >= Price::from_rupiah(38_000) && p.price <= Price::from_rupiah(45_000)
        }));
    }

    #[test]
    fn test_rating_floor() {
        let data = data();
        let query = SearchQuery {
            rating: Some(4.8),
            sort: SortKey::RatingDesc,
            ..Default::default()
        };
        let page = search(&data.products, &query);

        assert!(page.data.iter().all(|p| p.rating >= 4.8));
        assert!(page.data.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let data = data();
        let query = SearchQuery {
            q: Some("durian".to_string()),
            ..Default::default()
        };
        let page = search(&data.products, &query);

        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn test_bestselling_orders_by_review_count() {
        let data = data();
        let query = SearchQuery {
            sort: SortKey::Bestselling,
            ..Default::default()
        };
        let page = search(&data.products, &query);

        assert!(
            page.data
                .windows(2)
                .all(|w| w[0].review_count >= w[1].review_count)
        );
    }

    #[test]
    fn test_newest_orders_by_created_at() {
        let data = data();
        let page = search(&data.products, &SearchQuery::default());

        assert!(page.data.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_second_page() {
        let data = data();
        let query = SearchQuery {
            page: Some(2),
            ..Default::default()
        };
        let page = search(&data.products, &query);

        assert_eq!(page.pagination.page, 2);
        assert_eq!(
            page.data.len(),
            data.products.len().saturating_sub(DEFAULT_PAGE_SIZE).min(DEFAULT_PAGE_SIZE)
        );
    }

    #[test]
    fn test_find_by_id_and_slug() {
        let data = data();
        assert_eq!(
            find(&data.products, "nanas-madu-premium").map(|p| p.name.as_str()),
            Some("Nanas Madu Premium")
        );
        assert_eq!(find(&data.products, "1").map(|p| p.slug.as_str()), Some("nanas-madu-premium"));
        assert!(find(&data.products, "nonexistent-id").is_none());
    }

    #[test]
    fn test_related_excludes_source_and_stays_in_category() {
        let data = data();
        let related = related(&data.products, "1").unwrap();

        assert!(!related.is_empty());
        assert!(related.len() <= RELATED_LIMIT);
        assert!(related.iter().all(|p| p.id != "1"));
        assert!(related.iter().all(|p| p.category_id == "nanas-segar"));
    }

    #[test]
    fn test_related_unknown_source() {
        assert!(related(&data().products, "404").is_none());
    }

    #[test]
    fn test_featured_are_bestsellers() {
        let data = data();
        let featured = featured(&data.products);

        assert!(!featured.is_empty());
        assert!(featured.iter().all(|p| p.has_badge(&Badge::Bestseller)));
        assert_eq!(
            featured.len(),
            data.products
                .iter()
                .filter(|p| p.has_badge(&Badge::Bestseller))
                .count()
        );
    }

    #[test]
    fn test_short_suggestion_queries_are_empty() {
        let data = data();
        assert!(suggest(&data, "").is_empty());
        assert!(suggest(&data, "a").is_empty());
        assert!(suggest(&data, "  n  ").is_empty());
    }

    #[test]
    fn test_suggestions_cap_products() {
        let data = data();
        let suggestions = suggest(&data, "nanas");

        assert_eq!(suggestions.products.len(), SUGGESTION_LIMIT);
        assert!(!suggestions.categories.is_empty());
        assert!(
            suggestions
                .categories
                .iter()
                .all(|c| c.name.to_lowercase().contains("nanas"))
        );
        assert!(
            suggestions
                .sellers
                .iter()
                .all(|s| s.name.to_lowercase().contains("nanas"))
        );
    }

    #[test]
    fn test_suggestions_match_sellers() {
        let data = data();
        let suggestions = suggest(&data, "dapur");

        assert_eq!(suggestions.sellers.len(), 1);
        assert_eq!(suggestions.sellers[0].id, "seller-2");
    }
}
