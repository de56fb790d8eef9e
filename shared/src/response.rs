//! Pagination envelope shared by list endpoints.

use serde::{Deserialize, Serialize};

/// A single page of results plus the totals the UI needs for paging controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Paginated<T> {
    /// Build a page. `page` is 1-based; `page_size` of 0 is clamped to 1.
    pub fn new(items: Vec<T>, total_count: u64, page: u64, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size);
        Self {
            items,
            total_count,
            total_pages,
            page: page.max(1),
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page: Paginated<u32> = Paginated::new(vec![], 101, 1, 50);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn zero_results_means_zero_pages() {
        let page: Paginated<u32> = Paginated::new(vec![], 0, 1, 50);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn page_size_is_clamped() {
        let page: Paginated<u32> = Paginated::new(vec![], 10, 0, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 10);
    }
}
