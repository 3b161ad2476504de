//! Query results and pagination.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Total number of matching items.
    pub total: usize,
    /// Total number of pages; zero when nothing matches.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if max_visible == 0 || self.total_pages == 0 {
            return Vec::new();
        }
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Whether the page lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }

    /// Get start item number (1-indexed), or 0 for an empty page.
    pub fn start_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            (self.page * self.page_size).min(self.total)
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryPage<T> {
    /// The result items.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> QueryPage<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert_eq!(p.start_item(), 41);
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 8, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
        assert!(p.page_numbers(5).is_empty());
        assert_eq!(p.start_item(), 0);
    }

    #[test]
    fn test_pagination_beyond_range() {
        let p = Pagination::new(9, 8, 10);
        assert_eq!(p.total_pages, 2);
        assert!(p.is_out_of_range());
        assert!(!p.has_next);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(1, 10, 100);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3]);
    }
}
