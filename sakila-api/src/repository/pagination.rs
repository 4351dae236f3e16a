//! Pagination and ordering types for repository queries

use std::fmt;

/// Direction for ordering results by primary key
///
/// # Example
///
/// ```rust
/// use sakila_api::repository::OrderDirection;
///
/// assert_eq!(OrderDirection::Ascending.to_string(), "asc");
/// assert_eq!(OrderDirection::Descending.as_sql(), "DESC");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    Descending,
}

impl OrderDirection {
    /// SQL keyword for this direction
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Pagination parameters for limiting query results
///
/// # Example
///
/// ```rust
/// use sakila_api::repository::Pagination;
///
/// let page3 = Pagination::page(3, 10);
/// assert_eq!(page3.offset, 20);
/// assert_eq!(page3.limit, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    /// Create new pagination parameters
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Create pagination for the first page with the given limit
    #[must_use]
    pub const fn first_page(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// Create pagination for a specific page number (1-indexed)
    ///
    /// Offsets saturate instead of overflowing for absurd page numbers; such
    /// a page is simply empty.
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        Self {
            offset,
            limit: page_size,
        }
    }

    /// Offset clamped to the range of a SQL `BIGINT`
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit clamped to the range of a SQL `BIGINT`
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Apply this window to an already ordered iterator
    pub fn apply<I: Iterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.skip(offset).take(limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction_display() {
        assert_eq!(format!("{}", OrderDirection::Ascending), "asc");
        assert_eq!(format!("{}", OrderDirection::Descending), "desc");
        assert_eq!(OrderDirection::default(), OrderDirection::Ascending);
    }

    #[test]
    fn test_order_direction_sql() {
        assert_eq!(OrderDirection::Ascending.as_sql(), "ASC");
        assert_eq!(OrderDirection::Descending.as_sql(), "DESC");
    }

    #[test]
    fn test_pagination_new() {
        let pagination = Pagination::new(40, 20);
        assert_eq!(pagination.offset, 40);
        assert_eq!(pagination.limit, 20);
    }

    #[test]
    fn test_pagination_first_page() {
        let pagination = Pagination::first_page(25);
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, 25);
    }

    #[test]
    fn test_pagination_page() {
        assert_eq!(Pagination::page(1, 10), Pagination::new(0, 10));
        assert_eq!(Pagination::page(2, 10), Pagination::new(10, 10));
        assert_eq!(Pagination::page(5, 25), Pagination::new(100, 25));
        // page 0 is treated like page 1
        assert_eq!(Pagination::page(0, 10), Pagination::new(0, 10));
    }

    #[test]
    fn test_pagination_saturates() {
        let pagination = Pagination::page(u64::MAX, 100);
        assert_eq!(pagination.offset, u64::MAX);
        assert_eq!(pagination.offset_i64(), i64::MAX);
        assert_eq!(pagination.limit_i64(), 100);
    }

    #[test]
    fn test_pagination_apply() {
        let window: Vec<_> = Pagination::page(2, 3).apply(1..=10).collect();
        assert_eq!(window, vec![4, 5, 6]);

        let past_end: Vec<_> = Pagination::page(5, 3).apply(1..=10).collect();
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_pagination_default() {
        let pagination = Pagination::default();
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, 10);
    }
}
