//! Table rendering
//!
//! Rows are rendered from per-entity column descriptors into plain values a
//! front end can draw. Boolean flags become independent toggle cells.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::date::format_date;
use shared::models::Role;
use shared::money::format_optional_money;
use shared::{Editable, FlagField, Resource, StatusBadge, StatusColor, StatusFlags};

/// Value of one table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    Text(String),
    Date(NaiveDate),
    Money(Option<Decimal>),
    Number(Decimal),
    Count(u64),
    Percent(Option<Decimal>),
    Badge { label: &'static str, color: StatusColor },
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn badge<B: StatusBadge>(badge: B) -> Self {
        CellValue::Badge {
            label: badge.label(),
            color: badge.color(),
        }
    }

    /// Display text
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => format_date(*d),
            CellValue::Money(m) => format_optional_money(*m),
            CellValue::Number(n) => n.normalize().to_string(),
            CellValue::Count(n) => n.to_string(),
            CellValue::Percent(Some(p)) => format!("{}%", p.round_dp(2).normalize()),
            CellValue::Percent(None) => "-".to_string(),
            CellValue::Badge { label, .. } => (*label).to_string(),
            CellValue::Empty => String::new(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Text(_) => 1,
            CellValue::Date(_) => 2,
            CellValue::Money(_) | CellValue::Number(_) | CellValue::Percent(_) => 3,
            CellValue::Count(_) => 4,
            CellValue::Badge { .. } => 5,
        }
    }

    fn numeric(&self) -> Option<Decimal> {
        match self {
            CellValue::Money(v) | CellValue::Percent(v) => *v,
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Order used for client-side sorting; missing amounts sort first
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Count(a), CellValue::Count(b)) => a.cmp(b),
            (CellValue::Badge { label: a, .. }, CellValue::Badge { label: b, .. }) => a.cmp(b),
            (a, b) if a.rank() == 3 && b.rank() == 3 => a.numeric().cmp(&b.numeric()),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

/// One column of an entity table
pub struct Column<R> {
    pub key: &'static str,
    pub header: &'static str,
    pub cell: fn(&R) -> CellValue,
}

impl<R> Column<R> {
    pub const fn new(key: &'static str, header: &'static str, cell: fn(&R) -> CellValue) -> Self {
        Self { key, header, cell }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

/// Column layout of an entity
pub trait TableColumns: Resource {
    fn columns() -> Vec<Column<Self>>;

    /// Server id, for rows that have one
    fn row_id(&self) -> Option<i64> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Client-side sort by column key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: &'static str) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: &'static str) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Flip direction when sorting the same column again
    pub fn toggled(self, key: &'static str) -> Self {
        if self.key == key && self.direction == SortDirection::Asc {
            Self::desc(key)
        } else {
            Self::asc(key)
        }
    }
}

/// Inline toggle of one flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleCell {
    /// Wire name of the flag
    pub field: &'static str,
    pub label: &'static str,
    pub value: bool,
    /// False while an update of this flag is in flight, or when the role
    /// cannot edit
    pub enabled: bool,
}

/// Rendered row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub id: Option<i64>,
    pub cells: Vec<CellValue>,
    pub toggles: Vec<ToggleCell>,
    /// Edit action available
    pub can_edit: bool,
    /// Delete action available
    pub can_delete: bool,
}

impl RowView {
    pub fn toggle(&self, field: &str) -> Option<&ToggleCell> {
        self.toggles.iter().find(|t| t.field == field)
    }
}

/// Column headers in display order
pub fn headers<R: TableColumns>() -> Vec<&'static str> {
    R::columns().iter().map(|c| c.header).collect()
}

/// Sort `items` in place by the column named in `sort`
///
/// Unknown keys leave the order untouched. The sort is stable.
pub fn sort_items<R: TableColumns>(items: &mut [R], sort: SortSpec) {
    let Some(column) = R::columns().into_iter().find(|c| c.key == sort.key) else {
        tracing::debug!(key = sort.key, "unknown sort column");
        return;
    };
    items.sort_by(|a, b| {
        let ord = (column.cell)(a).compare(&(column.cell)(b));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Render rows without toggles
///
/// Row actions are offered only for rows with a server id, and only when
/// `role` can edit the module.
pub fn render_rows<R: TableColumns>(items: &[R], role: &Role) -> Vec<RowView> {
    let columns = R::columns();
    let writable = role.can_edit(R::MODULE);
    items
        .iter()
        .map(|item| {
            let id = item.row_id();
            RowView {
                id,
                cells: columns.iter().map(|c| (c.cell)(item)).collect(),
                toggles: Vec::new(),
                can_edit: writable && id.is_some(),
                can_delete: writable && id.is_some(),
            }
        })
        .collect()
}

/// Render rows with one toggle cell per flag
pub fn render_flag_rows<R>(
    items: &[R],
    role: &Role,
    is_pending: impl Fn(i64, R::Field) -> bool,
) -> Vec<RowView>
where
    R: TableColumns + StatusFlags,
{
    let writable = role.can_edit(R::MODULE);
    let mut rows = render_rows(items, role);
    for (row, item) in rows.iter_mut().zip(items) {
        row.toggles = R::FIELDS
            .iter()
            .map(|&field| ToggleCell {
                field: field.name(),
                label: field.label(),
                value: item.flag(field),
                enabled: writable && !is_pending(item.id(), field),
            })
            .collect();
    }
    rows
}

/// Look a flag up by wire name
pub fn flag_field<R: StatusFlags>(name: &str) -> Option<R::Field> {
    R::FIELDS.iter().copied().find(|f| f.name() == name)
}

/// Money cell helper for required amounts
pub fn money(value: Decimal) -> CellValue {
    CellValue::Money(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Money(Some(Decimal::new(15005, 1))).display(), "$ 1500.50");
        assert_eq!(CellValue::Percent(Some(Decimal::new(12346, 3))).display(), "12.35%");
        assert_eq!(CellValue::Percent(None).display(), "-");
        assert_eq!(
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).display(),
            "2024-01-01"
        );
    }

    #[test]
    fn test_compare() {
        assert_eq!(CellValue::text("ana").compare(&CellValue::text("Bruno")), Ordering::Less);
        assert_eq!(
            CellValue::Money(None).compare(&CellValue::Money(Some(Decimal::ONE))),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Number(Decimal::TEN).compare(&CellValue::Money(Some(Decimal::ONE))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sort_spec_toggles_direction() {
        let sort = SortSpec::asc("fecha");
        assert_eq!(sort.toggled("fecha"), SortSpec::desc("fecha"));
        assert_eq!(sort.toggled("fecha").toggled("fecha"), SortSpec::asc("fecha"));
        assert_eq!(SortSpec::desc("fecha").toggled("nombre"), SortSpec::asc("nombre"));
    }
}
