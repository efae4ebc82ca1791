//! Generic list management
//!
//! The building blocks every back-office list is made of:
//!
//! - [`filter`]: local filter state with debounced text propagation
//! - [`fetcher`]: page fetching that only applies the newest response
//! - [`table`]: row rendering, sorting and inline toggle cells
//! - [`toggle`]: in-flight tracking of single-flag updates
//! - [`paginator`]: page window with ellipses
//! - [`controller`]: ties them together per entity

pub mod controller;
pub mod fetcher;
pub mod filter;
pub mod paginator;
pub mod table;
pub mod toggle;

pub use controller::{ListController, PendingDelete};
pub use fetcher::{FetchOutcome, ListFetcher, ListSnapshot};
pub use filter::{FilterCallback, FilterHolder};
pub use paginator::{PageToken, page_window};
pub use table::{CellValue, Column, RowView, SortDirection, SortSpec, TableColumns, ToggleCell};
pub use toggle::{ToggleOutcome, ToggleSet};
