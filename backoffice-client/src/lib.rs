//! Back-office client library
//!
//! Typed REST access to the back-office API plus the generic list machinery
//! (debounced filters, stale-safe fetching, inline flag toggles, pagination)
//! shared by every business list.

pub mod api;
pub mod columns;
pub mod config;
pub mod error;
pub mod http;
pub mod list;
pub mod logger;

pub use api::{ListSource, RecordWriter, ResourceApi, StatusWriter};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use list::{
    CellValue, FilterHolder, ListController, ListSnapshot, PageToken, PendingDelete, RowView,
    SortSpec, TableColumns, ToggleOutcome, page_window,
};

// Re-export shared types for convenience
pub use shared::models::Role;
pub use shared::{Page, PageRequest, ValidationErrors};
