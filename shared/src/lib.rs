//! Shared types for the back office
//!
//! Entity models, list envelopes, validation and the money rules used by
//! both the backend API and the back-office client.

pub mod commission;
pub mod date;
pub mod error;
pub mod models;
pub mod money;
pub mod query;
pub mod resource;
pub mod response;
pub mod types;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{FieldError, ValidationErrors};
pub use query::{ListQuery, PageRequest};
pub use resource::{
    Editable, FlagField, ListFilter, Resource, StatusBadge, StatusColor, StatusFlags,
};
pub use response::{DeleteAck, ListEnvelope, Page, Pagination};
pub use types::{Module, Permission};
pub use validation::Validate;
