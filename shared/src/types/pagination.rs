//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a client may request
pub const MAX_LIMIT: u32 = 100;

/// Rejected pagination input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    InvalidPage(i64),
    InvalidLimit(i64),
}

impl std::fmt::Display for PaginationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaginationError::InvalidPage(page) => {
                write!(f, "page must be at least 1, got {}", page)
            }
            PaginationError::InvalidLimit(limit) => {
                write!(f, "limit must be between 1 and {}, got {}", MAX_LIMIT, limit)
            }
        }
    }
}

impl std::error::Error for PaginationError {}

/// Validated pagination parameters (1-indexed page)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Validates raw query values; absent values take the defaults
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT as i64);

        if page < 1 || page > u32::MAX as i64 {
            return Err(PaginationError::InvalidPage(page));
        }
        if limit < 1 || limit > MAX_LIMIT as i64 {
            return Err(PaginationError::InvalidLimit(limit));
        }

        Ok(Self {
            page: page as u32,
            limit: limit as u32,
        })
    }

    /// Row offset for SQL queries
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Row limit for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// One page of results plus the total number of matching rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, count: i64) -> Self {
        Self { items, count }
    }

    /// Transform every item, keeping the count
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pagination = Pagination::new(None, None).unwrap();
        assert_eq!(pagination, Pagination::default());
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit_i64(), 10);
    }

    #[test]
    fn test_offset() {
        let pagination = Pagination::new(Some(3), Some(20)).unwrap();
        assert_eq!(pagination.offset(), 40);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Pagination::new(Some(0), None),
            Err(PaginationError::InvalidPage(0))
        );
        assert_eq!(
            Pagination::new(None, Some(0)),
            Err(PaginationError::InvalidLimit(0))
        );
        assert_eq!(
            Pagination::new(None, Some(101)),
            Err(PaginationError::InvalidLimit(101))
        );
        assert!(Pagination::new(Some(-4), Some(10)).is_err());
    }

    #[test]
    fn test_page_map_keeps_count() {
        let page = Page::new(vec![1, 2, 3], 42).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.count, 42);
    }
}
