//! Page slicing with totals computed over the full result set.

use serde::{Deserialize, Serialize};

/// Number of products on a catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Pagination metadata for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
    /// Number of items across all pages.
    pub total: usize,
    pub total_pages: usize,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Slice `items` into the requested page.
    ///
    /// `page` is 1-based; values below 1 are treated as 1. A page past the end
    /// yields empty `data` with accurate totals. A `limit` of 0 is treated as 1.
    #[must_use]
    pub fn paginate(items: Vec<T>, page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total = items.len();
        let offset = (page - 1).saturating_mul(limit);

        let data = items.into_iter().skip(offset).take(limit).collect();

        Self {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }
    }

    /// Map every item on the page, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Whether there is a page after this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.pagination.page < self.pagination.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = PaginatedResponse::paginate((1..=30).collect::<Vec<_>>(), 1, 12);
        assert_eq!(page.data, (1..=12).collect::<Vec<_>>());
        assert_eq!(
            page.pagination,
            PaginationMeta {
                page: 1,
                limit: 12,
                total: 30,
                total_pages: 3,
            }
        );
        assert!(page.has_next_page());
    }

    #[test]
    fn test_last_partial_page() {
        let page = PaginatedResponse::paginate((1..=30).collect::<Vec<_>>(), 3, 12);
        assert_eq!(page.data, (25..=30).collect::<Vec<_>>());
        assert!(!page.has_next_page());
    }

    #[test]
    fn test_page_past_end_is_empty_with_totals() {
        let page = PaginatedResponse::paginate(vec![1, 2, 3], 5, 12);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_empty_input() {
        let page = PaginatedResponse::<u8>::paginate(Vec::new(), 1, 12);
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = PaginatedResponse::paginate(vec![1, 2, 3], 0, 2);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.data, vec![1, 2]);
    }

    #[test]
    fn test_exact_multiple_total_pages() {
        let page = PaginatedResponse::paginate((1..=24).collect::<Vec<_>>(), 2, 12);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.data.len(), 12);
    }
}
