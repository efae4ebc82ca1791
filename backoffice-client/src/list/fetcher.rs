//! List fetching with stale-response rejection
//!
//! Every request takes a sequence number from a monotonically increasing
//! counter. A response is applied only if it belongs to the most recently
//! issued request, so a slow answer to an old filter can never overwrite the
//! rows of a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use shared::{Editable, Page, PageRequest, Resource};

use crate::ClientError;
use crate::api::ListSource;

/// What happened to one fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// Response applied to the list
    Applied { current_page: u32, total_pages: u32 },
    /// A newer request was issued meanwhile; response dropped
    Stale,
    /// The latest request failed; previous rows kept
    Failed(ClientError),
}

/// Point-in-time view of a list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot<R> {
    pub items: Vec<R>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub loading: bool,
    /// Message of the last failed read, cleared by the next success
    pub error: Option<String>,
}

struct FetchState<R> {
    page: Page<R>,
    /// Sequence of the response currently displayed
    applied_seq: u64,
    /// Sequence of the newest request that has settled either way
    settled_seq: u64,
    error: Option<String>,
}

/// Fetches pages of `R` and keeps the latest one
pub struct ListFetcher<R: Resource, S> {
    source: Arc<S>,
    issued: AtomicU64,
    state: RwLock<FetchState<R>>,
}

impl<R: Resource, S: ListSource<R>> ListFetcher<R, S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            issued: AtomicU64::new(0),
            state: RwLock::new(FetchState {
                page: Page::empty(),
                applied_seq: 0,
                settled_seq: 0,
                error: None,
            }),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Issue one list call and apply its response if it is still current
    pub async fn fetch(&self, filter: &R::Filter, request: PageRequest) -> FetchOutcome {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.source.list(filter, request).await;

        let mut state = self.state.write();
        if seq != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(resource = R::PATH, seq, "dropping stale list response");
            return FetchOutcome::Stale;
        }
        state.settled_seq = seq;

        match result {
            Ok(page) => {
                let outcome = FetchOutcome::Applied {
                    current_page: page.current_page,
                    total_pages: page.total_pages,
                };
                state.page = page;
                state.applied_seq = seq;
                state.error = None;
                outcome
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, seq, error = %e, "list request failed");
                state.error = Some(e.to_string());
                FetchOutcome::Failed(e)
            }
        }
    }

    /// True while the newest request has not settled
    pub fn is_loading(&self) -> bool {
        self.issued.load(Ordering::SeqCst) > self.state.read().settled_seq
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn total_pages(&self) -> u32 {
        self.state.read().page.total_pages
    }

    /// Sequence number of the displayed response (0 before the first one)
    pub fn applied_seq(&self) -> u64 {
        self.state.read().applied_seq
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        let loading = self.is_loading();
        let state = self.state.read();
        ListSnapshot {
            items: state.page.items.clone(),
            total_count: state.page.total_count,
            current_page: state.page.current_page,
            total_pages: state.page.total_pages,
            loading,
            error: state.error.clone(),
        }
    }

    /// Run `f` over the displayed items
    pub fn with_items<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(&self.state.read().page.items)
    }
}

impl<R: Editable, S: ListSource<R>> ListFetcher<R, S> {
    pub fn find(&self, id: i64) -> Option<R> {
        self.state.read().page.items.iter().find(|r| r.id() == id).cloned()
    }

    /// Mutate the displayed row `id` in place; false if it is not on the page
    pub fn update_item(&self, id: i64, f: impl FnOnce(&mut R)) -> bool {
        let mut state = self.state.write();
        match state.page.items.iter_mut().find(|r| r.id() == id) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }
}
