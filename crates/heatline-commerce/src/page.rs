//! Pagination shapes.
//!
//! Every list endpoint answers with the same `{count, rows}` wrapper: the
//! total number of matches regardless of pagination, plus the requested
//! slice. The original response DTOs for bestsellers/new/search added no
//! fields of their own, so a single generic wrapper replaces them all.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A `{count, rows}` result shape.
///
/// `count` is the total matching row count ignoring pagination; `rows` is
/// the page slice, ordered by id ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Total number of matching rows.
    pub count: i64,
    /// The page slice.
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    /// Create a new page.
    pub fn new(count: i64, rows: Vec<T>) -> Self {
        Self { count, rows }
    }

    /// Create an empty page.
    pub fn empty() -> Self {
        Self {
            count: 0,
            rows: Vec::new(),
        }
    }

    /// Number of rows in this slice.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A validated limit/offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

impl PageRequest {
    /// Default page size when the caller sends none.
    pub const DEFAULT_LIMIT: i64 = 20;
    /// Upper bound on page size.
    pub const MAX_LIMIT: i64 = 100;

    /// Create a page request from already-numeric input.
    ///
    /// Negative values are rejected; `limit` is clamped to
    /// `1..=MAX_LIMIT`.
    pub fn new(limit: i64, offset: i64) -> Result<Self, CommerceError> {
        if limit < 0 {
            return Err(CommerceError::InvalidPagination(format!(
                "limit must not be negative, got {limit}"
            )));
        }
        if offset < 0 {
            return Err(CommerceError::InvalidPagination(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        Ok(Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            offset,
        })
    }

    /// Coerce raw query-string values into a page request.
    ///
    /// Absent or non-numeric strings fall back to the defaults
    /// (`limit = 20`, `offset = 0`); numeric but negative values are
    /// rejected with [`CommerceError::InvalidPagination`].
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Result<Self, CommerceError> {
        let limit = coerce(limit, Self::DEFAULT_LIMIT)?;
        let offset = coerce(offset, 0)?;
        Self::new(limit, offset)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

fn coerce(raw: Option<&str>, default: i64) -> Result<i64, CommerceError> {
    match raw {
        None => Ok(default),
        Some(s) => match s.trim().parse::<i64>() {
            Ok(n) => Ok(n),
            // Non-numeric input coerces to the default, as the observed
            // endpoint did.
            Err(_) => Ok(default),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.limit, 20);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_from_raw_absent() {
        let page = PageRequest::from_raw(None, None).unwrap();
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_from_raw_numeric() {
        let page = PageRequest::from_raw(Some("5"), Some("10")).unwrap();
        assert_eq!(page.limit, 5);
        assert_eq!(page.offset, 10);
    }

    #[test]
    fn test_from_raw_non_numeric_falls_back() {
        let page = PageRequest::from_raw(Some("abc"), Some("1.5")).unwrap();
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_from_raw_negative_rejected() {
        assert!(PageRequest::from_raw(Some("-1"), None).is_err());
        assert!(PageRequest::from_raw(None, Some("-3")).is_err());
    }

    #[test]
    fn test_limit_clamped() {
        let page = PageRequest::from_raw(Some("500"), None).unwrap();
        assert_eq!(page.limit, PageRequest::MAX_LIMIT);

        let page = PageRequest::from_raw(Some("0"), None).unwrap();
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn test_page_wire_shape() {
        let page = Page::new(10, vec![1, 2, 3]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["count"], 10);
        assert_eq!(json["rows"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i64> = Page::empty();
        assert!(page.is_empty());
        assert_eq!(page.count, 0);
    }
}
