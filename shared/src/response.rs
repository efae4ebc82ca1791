//! API Response types
//!
//! The backend is not consistent about list responses: some endpoints return
//! a bare JSON array, others wrap the rows in `{ data, pagination }`. Both are
//! accepted here and normalized into a single [`Page`].

use crate::query::PageRequest;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};

/// Pagination metadata sent by enveloped endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    #[serde(alias = "limit")]
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages: total_pages(total, per_page),
        }
    }
}

/// Number of pages needed for `total` items
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page as u64) as u32
}

/// Raw list response as it comes off the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paged { data: Vec<T>, pagination: Pagination },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    /// Normalize into a [`Page`].
    ///
    /// Bare arrays carry every matching row, so the requested page is cut out
    /// locally.
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        match self {
            ListEnvelope::Paged { data, pagination } => Page {
                items: data,
                total_count: pagination.total,
                current_page: pagination.page,
                total_pages: pagination.total_pages,
            },
            ListEnvelope::Bare(rows) => Page::slice(rows, request),
        }
    }
}

impl<T: Resource> ListEnvelope<T> {
    /// Let the row type arrange the rows of this response
    ///
    /// Bare arrays are arranged whole, before any page is cut out of them.
    pub fn arrange(&mut self) {
        match self {
            ListEnvelope::Paged { data, pagination } => {
                let first = pagination
                    .page
                    .saturating_sub(1)
                    .saturating_mul(pagination.per_page)
                    .saturating_add(1);
                T::arrange(data, first);
            }
            ListEnvelope::Bare(rows) => T::arrange(rows, 1),
        }
    }
}

/// One page of a list, the only shape the list components deal with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            current_page: 1,
            total_pages: 0,
        }
    }

    /// Cut `request` out of the full row set
    pub fn slice(rows: Vec<T>, request: PageRequest) -> Self {
        let total_count = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(request.offset())
            .take(request.page_size as usize)
            .collect();
        Self {
            items,
            total_count,
            current_page: request.page,
            total_pages: total_pages(total_count, request.page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Delete acknowledgement: `true`/`false` or `{ "success": bool }`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeleteAck {
    Bare(bool),
    Envelope { success: bool },
}

impl DeleteAck {
    pub fn succeeded(&self) -> bool {
        match *self {
            DeleteAck::Bare(ok) | DeleteAck::Envelope { success: ok } => ok,
        }
    }
}

/// Error body returned by the backend on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enveloped_list() {
        let raw = json!({
            "data": [1, 2, 3],
            "pagination": { "page": 2, "perPage": 3, "total": 9, "totalPages": 3 }
        });
        let envelope: ListEnvelope<i32> = serde_json::from_value(raw).unwrap();
        let page = envelope.into_page(PageRequest::new(2, 3));

        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_count, 9);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_bare_list_is_sliced_locally() {
        let envelope: ListEnvelope<i32> = serde_json::from_value(json!([1, 2, 3, 4, 5])).unwrap();
        let page = envelope.into_page(PageRequest::new(2, 2));

        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_delete_ack() {
        let bare: DeleteAck = serde_json::from_value(json!(true)).unwrap();
        let wrapped: DeleteAck = serde_json::from_value(json!({ "success": false })).unwrap();
        assert!(bare.succeeded());
        assert!(!wrapped.succeeded());
    }
}
