//! Resource traits
//!
//! Every business list (exchanges, returns, campaigns, ...) is described by
//! the same handful of traits so the client can drive all of them with one
//! generic list implementation:
//!
//! - [`Resource`]: a row that can be listed from `GET /{PATH}` with a filter
//! - [`Editable`]: rows with a server id that can be created, edited and deleted
//! - [`StatusFlags`]: rows with independent boolean flags toggled through
//!   `PUT /{PATH}/{id}/estado` and a display status derived from them

use crate::types::Module;
use crate::validation::Validate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;

/// Filter object of a list
///
/// Serialized into the list query string; `None` fields are skipped.
pub trait ListFilter:
    Clone + Default + PartialEq + Debug + Serialize + Send + Sync + 'static
{
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A row type served by a list endpoint
pub trait Resource: Clone + Debug + DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Path relative to the API base URL (e.g. `cambios`)
    const PATH: &'static str;
    /// Module used for permission checks
    const MODULE: Module;
    type Filter: ListFilter;

    /// Order or annotate the rows of one response before they are displayed
    ///
    /// `first_position` is the 1-based position of `rows[0]` in the whole
    /// result set.
    fn arrange(_rows: &mut [Self], _first_position: u32) {}
}

/// Rows with a server-assigned id and a full CRUD lifecycle
pub trait Editable: Resource {
    type Create: Serialize + Validate + Debug + Send + Sync;
    type Update: Serialize + Validate + Debug + Send + Sync;

    fn id(&self) -> i64;
}

/// Color of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Gray,
    Blue,
    Orange,
    Green,
    Red,
    Purple,
}

/// Display status derived from a row's flags
pub trait StatusBadge: Copy + Debug + PartialEq + Send + Sync {
    fn label(&self) -> &'static str;
    fn color(&self) -> StatusColor;
}

/// One boolean flag of an entity
pub trait FlagField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Wire name (camelCase)
    fn name(&self) -> &'static str;
    /// Column header
    fn label(&self) -> &'static str;
}

/// Rows with independent boolean status flags
///
/// Flags do not constrain each other: every combination is a legal state and
/// [`StatusFlags::status`] is a pure lookup over them.
pub trait StatusFlags: Editable {
    type Field: FlagField;
    /// Body of the single-field update call
    type Patch: Serialize + Debug + Send + Sync;
    type Status: StatusBadge;

    /// All flags, in column order
    const FIELDS: &'static [Self::Field];

    fn flag(&self, field: Self::Field) -> bool;
    fn set_flag(&mut self, field: Self::Field, value: bool);
    /// Patch carrying only `field`
    fn patch(field: Self::Field, value: bool) -> Self::Patch;
    fn status(&self) -> Self::Status;
}
