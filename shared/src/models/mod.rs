//! Data models
//!
//! Shared between the backend and the back-office client (via API).
//! Wire field names are camelCase; all ids are `i64`.

pub mod campaign;
pub mod customer_ranking;
pub mod exchange;
pub mod marketplace_return;
pub mod product_return;
pub mod role;
pub mod sales_report;
pub mod vendor_sale;

// Re-exports
pub use campaign::*;
pub use customer_ranking::*;
pub use exchange::*;
pub use marketplace_return::*;
pub use product_return::*;
pub use role::*;
pub use sales_report::*;
pub use vendor_sale::*;
