//! Debounced filter state
//!
//! [`FilterHolder`] keeps the filter being edited. Text edits land locally at
//! once but are only propagated after a quiet period, so a burst of
//! keystrokes becomes one upstream change. Choice edits propagate right away.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::ListFilter;
use tokio_util::sync::CancellationToken;

/// Receives every propagated filter value
pub type FilterCallback<F> = Arc<dyn Fn(F) + Send + Sync>;

/// Local filter state with debounced propagation
///
/// Debounced edits spawn a timer task, so text edits must be made from inside
/// a tokio runtime.
pub struct FilterHolder<F: ListFilter> {
    local: Arc<Mutex<F>>,
    debounce: Duration,
    on_change: FilterCallback<F>,
    /// Timer of the pending debounced propagation
    pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl<F: ListFilter> FilterHolder<F> {
    pub fn new(initial: F, debounce: Duration, on_change: FilterCallback<F>) -> Self {
        Self {
            local: Arc::new(Mutex::new(initial)),
            debounce,
            on_change,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Current local value, including edits not yet propagated
    pub fn local(&self) -> F {
        self.local.lock().clone()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Apply a text edit and (re)start the debounce timer
    pub fn edit_text(&self, edit: impl FnOnce(&mut F)) {
        edit(&mut *self.local.lock());

        if self.debounce.is_zero() {
            self.cancel_pending();
            self.propagate();
            return;
        }

        let token = CancellationToken::new();
        if let Some(previous) = self.pending.lock().replace(token.clone()) {
            previous.cancel();
        }

        let local = Arc::clone(&self.local);
        let pending = Arc::clone(&self.pending);
        let on_change = Arc::clone(&self.on_change);
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(debounce) => {
                    {
                        // Cancellation happens under this lock
                        let mut slot = pending.lock();
                        if token.is_cancelled() {
                            return;
                        }
                        *slot = None;
                    }
                    let value = local.lock().clone();
                    tracing::trace!(filter = ?value, "debounced filter change");
                    on_change(value);
                }
            }
        });
    }

    /// Apply a choice edit and propagate the whole local value immediately
    ///
    /// Any pending debounced text edit travels with this propagation.
    pub fn set_now(&self, edit: impl FnOnce(&mut F)) {
        edit(&mut *self.local.lock());
        self.cancel_pending();
        self.propagate();
    }

    /// Reset to the empty filter and propagate it
    pub fn clear(&self) {
        *self.local.lock() = F::default();
        self.cancel_pending();
        self.propagate();
    }

    fn cancel_pending(&self) {
        if let Some(token) = self.pending.lock().take() {
            token.cancel();
        }
    }

    fn propagate(&self) {
        let value = self.local();
        tracing::trace!(filter = ?value, "filter change");
        (self.on_change)(value);
    }
}

impl<F: ListFilter> Drop for FilterHolder<F> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
