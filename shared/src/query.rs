//! List query types
//!
//! A page request plus the entity filter, serialized as the query string of
//! `GET /{resource}`.

use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page cursor (1-based page number + page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    #[serde(rename = "limit")]
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// Page numbers below 1 are treated as 1
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.page_size)
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.page_size as usize
    }
}

/// Query string of a list call: filter fields followed by `page` and `limit`
#[derive(Debug, Clone, Serialize)]
pub struct ListQuery<'a, F: Serialize> {
    #[serde(flatten)]
    pub filter: &'a F,
    #[serde(flatten)]
    pub page: PageRequest,
}

impl<'a, F: Serialize> ListQuery<'a, F> {
    pub fn new(filter: &'a F, page: PageRequest) -> Self {
        Self { filter, page }
    }
}
