//! In-flight toggle tracking
//!
//! A `(row id, field)` pair is in flight from the moment its update is sent
//! until it settles. While in flight the toggle is disabled and a second
//! toggle of the same pair is refused; other pairs are unaffected.

use std::hash::Hash;

use dashmap::DashSet;

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Update accepted; the row now holds this value
    Applied(bool),
    /// The same toggle is still in flight
    AlreadyPending,
}

/// Set of in-flight toggles
#[derive(Debug)]
pub struct ToggleSet<F: Eq + Hash> {
    in_flight: DashSet<(i64, F)>,
}

impl<F: Eq + Hash + Copy> ToggleSet<F> {
    pub fn new() -> Self {
        Self {
            in_flight: DashSet::new(),
        }
    }

    /// Mark `(id, field)` in flight; `None` if it already is
    ///
    /// The pair is released when the guard drops, whichever way the update
    /// ends.
    pub fn begin(&self, id: i64, field: F) -> Option<ToggleGuard<'_, F>> {
        if self.in_flight.insert((id, field)) {
            Some(ToggleGuard {
                set: self,
                key: (id, field),
            })
        } else {
            None
        }
    }

    pub fn is_pending(&self, id: i64, field: F) -> bool {
        self.in_flight.contains(&(id, field))
    }

    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

impl<F: Eq + Hash + Copy> Default for ToggleSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases an in-flight toggle on drop
pub struct ToggleGuard<'a, F: Eq + Hash + Copy> {
    set: &'a ToggleSet<F>,
    key: (i64, F),
}

impl<F: Eq + Hash + Copy> Drop for ToggleGuard<'_, F> {
    fn drop(&mut self) {
        self.set.in_flight.remove(&self.key);
    }
}
