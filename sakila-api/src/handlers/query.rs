//! Query parameters for list operations
//!
//! `page` and `limit` are read leniently: the leading integer of the raw
//! value is used (`"5abc"` is 5) and a missing, non-numeric or zero value
//! falls back to the default. Whatever remains must then be in bounds.

use serde::Deserialize;

use super::error::ApiError;
use crate::repository::Pagination;

/// Page used when none is given
pub const DEFAULT_PAGE: i64 = 1;

/// Items per page used when none is given
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum allowed items per page
pub const MAX_LIMIT: i64 = 100;

const INVALID_PAGINATION: &str =
    "Invalid pagination parameters. Page must be >= 1 and limit must be between 1 and 100";

/// Raw `?page=&limit=` parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    #[must_use]
    pub fn new(page: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            limit: Some(limit.into()),
        }
    }

    /// Apply defaults and check bounds
    pub fn resolve(&self) -> Result<PageRequest, ApiError> {
        let page = lenient(self.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = lenient(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);

        if page < 1 || !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ApiError::bad_request(INVALID_PAGINATION));
        }

        // Both are positive here
        Ok(PageRequest {
            page: page.unsigned_abs(),
            limit: limit.unsigned_abs(),
        })
    }
}

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn pagination(&self) -> Pagination {
        Pagination::page(self.page, self.limit)
    }
}

/// Leading integer of `raw`, `None` when absent, non-numeric or zero
fn lenient(raw: Option<&str>) -> Option<i64> {
    parse_leading_int(raw?).filter(|value| *value != 0)
}

/// Parse an optionally signed run of digits at the start of `raw`
///
/// Leading whitespace is skipped and parsing stops at the first non-digit.
/// Values beyond `i64` saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().fold(0_i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -value } else { value })
}
