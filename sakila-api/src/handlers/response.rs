//! Response types for list operations

use serde::ser::{Serialize, SerializeMap, Serializer};
use utoipa::ToSchema;

use super::query::PageRequest;

/// Pagination metadata for list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub page: u64,
    /// Items per page
    pub limit: u64,
    /// Total number of items across all pages
    pub total: u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: calculate_total_pages(total, limit),
        }
    }

    #[must_use]
    pub fn for_request(request: PageRequest, total: u64) -> Self {
        Self::new(request.page, request.limit, total)
    }
}

/// Ceiling division, zero pages for a zero limit
fn calculate_total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}

/// One page of a collection
///
/// Serializes as `{ "<key>": [...], "pagination": {...} }` where the key
/// names the collection, e.g. `actors`.
#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    key: &'static str,
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn new(key: &'static str, items: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            key,
            items,
            pagination,
        }
    }
}

impl<T: Serialize> Serialize for ListResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("pagination", &self.pagination)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(calculate_total_pages(0, 10), 0);
        assert_eq!(calculate_total_pages(1, 10), 1);
        assert_eq!(calculate_total_pages(10, 10), 1);
        assert_eq!(calculate_total_pages(11, 10), 2);
        assert_eq!(calculate_total_pages(200, 10), 20);
        assert_eq!(calculate_total_pages(5, 0), 0);
    }

    #[test]
    fn test_list_response_uses_collection_key() {
        let response = ListResponse::new("actors", vec![1, 2], PaginationMeta::new(1, 2, 3));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "actors": [1, 2],
                "pagination": { "page": 1, "limit": 2, "total": 3, "totalPages": 2 }
            })
        );
    }
}
