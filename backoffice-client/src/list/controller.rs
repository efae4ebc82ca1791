//! List controller
//!
//! One controller per entity list. It owns the current query (filter, page,
//! page size), the fetcher holding the displayed page and the in-flight
//! toggles, and checks the caller's role before every operation.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::models::Role;
use shared::{Editable, FlagField, PageRequest, Resource, StatusFlags, Validate};

use super::fetcher::{FetchOutcome, ListFetcher, ListSnapshot};
use super::filter::{FilterCallback, FilterHolder};
use super::paginator::{PageToken, clamp_page, page_window};
use super::table::{RowView, SortSpec, TableColumns, render_flag_rows, render_rows, sort_items};
use super::toggle::{ToggleOutcome, ToggleSet};
use crate::api::{ListSource, RecordWriter, StatusWriter};
use crate::{ClientConfig, ClientError, ClientResult};

/// Fetch attempts per load (the second one after snapping to page 1)
const MAX_LOAD_ATTEMPTS: usize = 2;

#[derive(Debug, Clone)]
struct QueryState<F> {
    filter: F,
    page: u32,
    page_size: u32,
}

impl<F> QueryState<F> {
    fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Row chosen for deletion, waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: i64,
    resource: &'static str,
}

impl PendingDelete {
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Controller of one entity list
pub struct ListController<R: Resource, B> {
    backend: Arc<B>,
    fetcher: ListFetcher<R, B>,
    role: Role,
    query: Mutex<QueryState<R::Filter>>,
    toggles: ToggleSet<&'static str>,
}

impl<R: Resource, B: ListSource<R>> ListController<R, B> {
    pub fn new(backend: Arc<B>, role: Role, page_size: u32) -> Self {
        Self {
            fetcher: ListFetcher::new(Arc::clone(&backend)),
            backend,
            role,
            query: Mutex::new(QueryState {
                filter: R::Filter::default(),
                page: 1,
                page_size: page_size.max(1),
            }),
            toggles: ToggleSet::new(),
        }
    }

    pub fn from_config(backend: Arc<B>, role: Role, config: &ClientConfig) -> Self {
        Self::new(backend, role, config.page_size)
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn filter(&self) -> R::Filter {
        self.query.lock().filter.clone()
    }

    /// Page of the current query
    pub fn page(&self) -> u32 {
        self.query.lock().page
    }

    pub fn page_size(&self) -> u32 {
        self.query.lock().page_size
    }

    fn ensure_view(&self) -> ClientResult<()> {
        if self.role.can_view(R::MODULE) {
            Ok(())
        } else {
            Err(ClientError::PermissionDenied {
                module: R::MODULE,
                action: "view",
            })
        }
    }

    fn ensure_edit(&self) -> ClientResult<()> {
        if self.role.can_edit(R::MODULE) {
            Ok(())
        } else {
            tracing::warn!(resource = R::PATH, role = %self.role.name, "edit refused");
            Err(ClientError::PermissionDenied {
                module: R::MODULE,
                action: "edit",
            })
        }
    }

    /// Replace the filter, go back to page 1 and fetch
    pub async fn apply_filters(&self, filter: R::Filter) -> ClientResult<()> {
        self.ensure_view()?;
        {
            let mut query = self.query.lock();
            query.filter = filter;
            query.page = 1;
        }
        self.load().await
    }

    /// Fetch page `page`, clamped to the known page range
    ///
    /// Before the first page is displayed the range is unknown and only the
    /// lower bound applies.
    pub async fn go_to_page(&self, page: u32) -> ClientResult<()> {
        self.ensure_view()?;
        let page = if self.fetcher.applied_seq() > 0 {
            clamp_page(page, self.fetcher.total_pages())
        } else {
            page.max(1)
        };
        self.query.lock().page = page;
        self.load().await
    }

    /// Change the page size and fetch page 1
    pub async fn set_page_size(&self, page_size: u32) -> ClientResult<()> {
        self.ensure_view()?;
        {
            let mut query = self.query.lock();
            query.page_size = page_size.max(1);
            query.page = 1;
        }
        self.load().await
    }

    /// Fetch the current query again
    pub async fn refresh(&self) -> ClientResult<()> {
        self.ensure_view()?;
        self.load().await
    }

    /// Fetch the current query
    ///
    /// If the response shows fewer pages than the page requested (rows were
    /// removed meanwhile) the query snaps back to page 1 and is fetched again.
    async fn load(&self) -> ClientResult<()> {
        for _ in 0..MAX_LOAD_ATTEMPTS {
            let (filter, request) = {
                let query = self.query.lock();
                (query.filter.clone(), query.request())
            };

            match self.fetcher.fetch(&filter, request).await {
                FetchOutcome::Applied { total_pages, .. } => {
                    if total_pages == 0 || request.page <= total_pages {
                        return Ok(());
                    }
                    let mut query = self.query.lock();
                    // A newer query owns the page now
                    if query.page != request.page || query.filter != filter {
                        return Ok(());
                    }
                    tracing::debug!(
                        resource = R::PATH,
                        requested = request.page,
                        total_pages,
                        "page out of range, back to page 1"
                    );
                    query.page = 1;
                }
                FetchOutcome::Stale => return Ok(()),
                FetchOutcome::Failed(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        self.fetcher.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    /// Error banner of the last failed read
    pub fn error(&self) -> Option<String> {
        self.fetcher.error()
    }

    /// Paginator tokens for the displayed page
    pub fn page_tokens(&self, max_visible: usize) -> Vec<PageToken> {
        let snapshot = self.fetcher.snapshot();
        page_window(snapshot.total_pages, snapshot.current_page, max_visible)
    }

    /// Callback feeding filter changes into [`Self::apply_filters`]
    ///
    /// Each change is fetched on a spawned task; stale responses are dropped
    /// by the fetcher.
    pub fn filter_listener(self: &Arc<Self>) -> FilterCallback<R::Filter>
    where
        B: 'static,
    {
        let controller = Arc::clone(self);
        Arc::new(move |filter: R::Filter| {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                if let Err(e) = controller.apply_filters(filter).await {
                    tracing::debug!(resource = R::PATH, error = %e, "filter change not applied");
                }
            });
        })
    }

    /// Filter holder wired to this controller, starting from the current filter
    pub fn filter_holder(self: &Arc<Self>, debounce: Duration) -> FilterHolder<R::Filter>
    where
        B: 'static,
    {
        FilterHolder::new(self.filter(), debounce, self.filter_listener())
    }
}

impl<R: TableColumns, B: ListSource<R>> ListController<R, B> {
    /// Displayed rows, optionally sorted client-side
    pub fn rows(&self, sort: Option<SortSpec>) -> Vec<RowView> {
        let mut items = self.fetcher.snapshot().items;
        if let Some(sort) = sort {
            sort_items(&mut items, sort);
        }
        render_rows(&items, &self.role)
    }
}

impl<R, B> ListController<R, B>
where
    R: Editable,
    B: ListSource<R> + RecordWriter<R>,
{
    /// Validate, create and refresh
    ///
    /// Validation errors are returned without calling the backend.
    pub async fn create(&self, payload: &R::Create) -> ClientResult<R> {
        self.ensure_edit()?;
        payload.validate()?;
        let created = self.backend.create(payload).await.inspect_err(|e| {
            tracing::warn!(resource = R::PATH, error = %e, "create failed");
        })?;
        tracing::info!(resource = R::PATH, id = created.id(), "created");
        self.reload_after_write().await;
        Ok(created)
    }

    /// Validate, update and refresh
    pub async fn update(&self, id: i64, payload: &R::Update) -> ClientResult<R> {
        self.ensure_edit()?;
        payload.validate()?;
        let updated = self.backend.update(id, payload).await.inspect_err(|e| {
            tracing::warn!(resource = R::PATH, id, error = %e, "update failed");
        })?;
        tracing::info!(resource = R::PATH, id, "updated");
        self.reload_after_write().await;
        Ok(updated)
    }

    /// First step of a delete; nothing is sent yet
    pub fn prepare_delete(&self, id: i64) -> ClientResult<PendingDelete> {
        self.ensure_edit()?;
        Ok(PendingDelete {
            id,
            resource: R::PATH,
        })
    }

    /// Confirmed delete, followed by a full re-fetch
    pub async fn confirm_delete(&self, pending: PendingDelete) -> ClientResult<()> {
        self.ensure_edit()?;
        if pending.resource != R::PATH {
            return Err(ClientError::Internal(format!(
                "delete prepared for {} confirmed on {}",
                pending.resource,
                R::PATH
            )));
        }
        self.backend.delete(pending.id).await.inspect_err(|e| {
            tracing::warn!(resource = R::PATH, id = pending.id, error = %e, "delete failed");
        })?;
        tracing::info!(resource = R::PATH, id = pending.id, "deleted");
        self.reload_after_write().await;
        Ok(())
    }

    /// Displayed row with id `id`
    pub fn find(&self, id: i64) -> Option<R> {
        self.fetcher.find(id)
    }

    async fn reload_after_write(&self) {
        // The write went through; a failed re-fetch only sets the banner
        if let Err(e) = self.load().await {
            tracing::debug!(resource = R::PATH, error = %e, "reload after write failed");
        }
    }
}

impl<R, B> ListController<R, B>
where
    R: StatusFlags,
    B: ListSource<R> + StatusWriter<R>,
{
    /// Flip one flag of row `id`
    ///
    /// The flag is disabled while the update is in flight. On success the new
    /// value is merged into the displayed row; on failure the row keeps its
    /// value and the error is returned.
    pub async fn toggle(&self, id: i64, field: R::Field) -> ClientResult<ToggleOutcome> {
        self.ensure_edit()?;
        let current = self
            .fetcher
            .find(id)
            .map(|row| row.flag(field))
            .ok_or_else(|| ClientError::NotFound(format!("{} {}", R::PATH, id)))?;

        let Some(_guard) = self.toggles.begin(id, field.name()) else {
            tracing::debug!(resource = R::PATH, id, ?field, "toggle already in flight");
            return Ok(ToggleOutcome::AlreadyPending);
        };

        let value = !current;
        match self.backend.update_status(id, field, value).await {
            Ok(()) => {
                self.fetcher.update_item(id, |row| row.set_flag(field, value));
                tracing::info!(resource = R::PATH, id, field = field.name(), value, "flag updated");
                Ok(ToggleOutcome::Applied(value))
            }
            Err(e) => {
                tracing::warn!(
                    resource = R::PATH,
                    id,
                    field = field.name(),
                    error = %e,
                    "flag update failed"
                );
                Err(e)
            }
        }
    }

    pub fn is_toggle_pending(&self, id: i64, field: R::Field) -> bool {
        self.toggles.is_pending(id, field.name())
    }

    /// Displayed rows with their toggle cells
    pub fn rows_with_toggles(&self, sort: Option<SortSpec>) -> Vec<RowView>
    where
        R: TableColumns,
    {
        let mut items = self.fetcher.snapshot().items;
        if let Some(sort) = sort {
            sort_items(&mut items, sort);
        }
        render_flag_rows(&items, &self.role, |id, field| {
            self.is_toggle_pending(id, field)
        })
    }
}
