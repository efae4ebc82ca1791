// backoffice-client/tests/list_fetching.rs
// Debounce, stale responses, pagination and read failures

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backoffice_client::list::paginator::PageToken;
use backoffice_client::{ClientError, ClientResult, ListController, ListSource, ResourceApi, Role};
use common::{MockBackend, exchange_row};
use parking_lot::Mutex;
use serde_json::json;
use shared::models::{Exchange, ExchangeFilter};
use shared::{Page, PageRequest};

/// List source answering each search term after a scripted delay
struct ScriptedSource {
    script: HashMap<&'static str, (Duration, bool)>,
    calls: Mutex<Vec<(String, PageRequest)>>,
}

impl ScriptedSource {
    fn new(script: impl IntoIterator<Item = (&'static str, Duration, bool)>) -> Self {
        Self {
            script: script.into_iter().map(|(k, d, fail)| (k, (d, fail))).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ListSource<Exchange> for ScriptedSource {
    async fn list(
        &self,
        filter: &ExchangeFilter,
        page: PageRequest,
    ) -> ClientResult<Page<Exchange>> {
        let term = filter.busqueda.clone().unwrap_or_default();
        self.calls.lock().push((term.clone(), page));
        let (delay, fail) = self
            .script
            .get(term.as_str())
            .copied()
            .unwrap_or((Duration::ZERO, false));
        tokio::time::sleep(delay).await;
        if fail {
            return Err(ClientError::Internal(format!("{term} failed")));
        }
        let mut row = exchange_row(&term);
        row["id"] = json!(1);
        let exchange: Exchange = serde_json::from_value(row)?;
        Ok(Page::slice(vec![exchange], page))
    }
}

fn search(term: &str) -> ExchangeFilter {
    ExchangeFilter {
        busqueda: Some(term.to_string()),
        ..Default::default()
    }
}

type ExchangeList = ListController<Exchange, ResourceApi<Exchange, MockBackend>>;

fn rest_list(backend: MockBackend, page_size: u32) -> (Arc<MockBackend>, Arc<ExchangeList>) {
    let backend = Arc::new(backend);
    let api = Arc::new(ResourceApi::new(Arc::clone(&backend)));
    (backend, Arc::new(ListController::new(api, Role::admin(), page_size)))
}

fn named_rows(prefix: &str, n: usize) -> Vec<serde_json::Value> {
    (0..n).map(|i| exchange_row(&format!("{prefix} {i}"))).collect()
}

fn requested_pages(backend: &MockBackend) -> Vec<u64> {
    backend
        .requests_with("GET")
        .iter()
        .map(|r| r.query["page"].as_u64().unwrap())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_late_response_of_older_filter_is_dropped() {
    let source = Arc::new(ScriptedSource::new([
        ("a", Duration::from_millis(200), false),
        ("b", Duration::from_millis(50), false),
    ]));
    let list = Arc::new(ListController::new(Arc::clone(&source), Role::admin(), 20));

    let first = {
        let list = Arc::clone(&list);
        tokio::spawn(async move { list.apply_filters(search("a")).await })
    };
    while source.call_count() < 1 {
        tokio::task::yield_now().await;
    }
    list.apply_filters(search("b")).await.unwrap();
    assert!(!list.is_loading());
    assert_eq!(list.snapshot().items[0].nombre, "b");

    first.await.unwrap().unwrap();
    let snapshot = list.snapshot();
    assert_eq!(snapshot.items[0].nombre, "b");
    assert!(snapshot.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_late_failure_of_older_filter_is_ignored() {
    let source = Arc::new(ScriptedSource::new([
        ("a", Duration::from_millis(200), true),
        ("b", Duration::from_millis(50), false),
    ]));
    let list = Arc::new(ListController::new(Arc::clone(&source), Role::admin(), 20));

    let first = {
        let list = Arc::clone(&list);
        tokio::spawn(async move { list.apply_filters(search("a")).await })
    };
    while source.call_count() < 1 {
        tokio::task::yield_now().await;
    }
    list.apply_filters(search("b")).await.unwrap();

    // superseded, so not an error for the caller either
    assert!(first.await.unwrap().is_ok());
    assert!(list.error().is_none());
    assert_eq!(list.snapshot().items[0].nombre, "b");
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_fetches_once() {
    let backend = MockBackend::new("cambios").with_rows(named_rows("Ana", 3));
    let (backend, list) = rest_list(backend, 20);
    let holder = list.filter_holder(Duration::from_millis(300));

    for text in ["a", "an", "ana"] {
        holder.edit_text(|f| f.busqueda = Some(text.to_string()));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(backend.requests_with("GET").is_empty());

    tokio::time::sleep(Duration::from_millis(400)).await;
    let gets = backend.requests_with("GET");
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].query, json!({ "busqueda": "ana", "page": 1, "limit": 20 }));
    assert_eq!(list.snapshot().items.len(), 3);
}

#[tokio::test]
async fn test_filter_change_resets_to_first_page() {
    let mut rows = named_rows("Bruno", 60);
    rows.extend(named_rows("Ana", 40));
    let (backend, list) = rest_list(MockBackend::new("cambios").enveloped().with_rows(rows), 20);

    list.refresh().await.unwrap();
    list.go_to_page(5).await.unwrap();
    assert_eq!(list.snapshot().current_page, 5);

    list.apply_filters(search("ana")).await.unwrap();
    assert_eq!(requested_pages(&backend), vec![1, 5, 1]);
    let snapshot = list.snapshot();
    assert_eq!(snapshot.total_pages, 2);
    assert_eq!(snapshot.current_page, 1);
}

#[tokio::test]
async fn test_shrinking_list_snaps_back_to_first_page() {
    let backend = MockBackend::new("cambios").enveloped().with_rows(named_rows("Ana", 100));
    let (backend, list) = rest_list(backend, 20);

    list.refresh().await.unwrap();
    list.go_to_page(5).await.unwrap();
    backend.truncate(50);

    list.refresh().await.unwrap();
    assert_eq!(requested_pages(&backend), vec![1, 5, 5, 1]);
    assert_eq!(list.page(), 1);
    assert_eq!(list.snapshot().items.len(), 20);
    assert_eq!(list.snapshot().total_pages, 3);
}

#[tokio::test]
async fn test_go_to_page_is_clamped() {
    let backend = MockBackend::new("cambios").enveloped().with_rows(named_rows("Ana", 45));
    let (backend, list) = rest_list(backend, 20);

    list.refresh().await.unwrap();
    list.go_to_page(99).await.unwrap();
    list.go_to_page(0).await.unwrap();
    assert_eq!(requested_pages(&backend), vec![1, 3, 1]);
}

#[tokio::test]
async fn test_go_to_page_before_first_load_is_not_clamped() {
    let backend = MockBackend::new("cambios").enveloped().with_rows(named_rows("Ana", 45));
    let (backend, list) = rest_list(backend, 20);

    list.go_to_page(2).await.unwrap();
    assert_eq!(requested_pages(&backend), vec![2]);
    assert_eq!(list.snapshot().current_page, 2);
    assert_eq!(list.snapshot().items[0].nombre, "Ana 20");
}

#[tokio::test]
async fn test_bare_array_is_paginated_locally() {
    let backend = MockBackend::new("cambios").with_rows(named_rows("Ana", 45));
    let (_backend, list) = rest_list(backend, 20);

    list.refresh().await.unwrap();
    list.go_to_page(3).await.unwrap();
    let snapshot = list.snapshot();
    assert_eq!(snapshot.items.len(), 5);
    assert_eq!(snapshot.total_count, 45);
    assert_eq!(snapshot.total_pages, 3);
    assert_eq!(snapshot.items[0].nombre, "Ana 40");
    assert_eq!(
        list.page_tokens(7),
        vec![PageToken::Page(1), PageToken::Page(2), PageToken::Page(3)]
    );
}

#[tokio::test]
async fn test_read_failure_keeps_previous_page() {
    let backend = MockBackend::new("cambios").with_rows(named_rows("Ana", 2));
    let (backend, list) = rest_list(backend, 20);
    list.refresh().await.unwrap();

    backend.fail_lists(true);
    assert!(list.refresh().await.is_err());
    let snapshot = list.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert!(snapshot.error.is_some());
    assert!(!snapshot.loading);

    backend.fail_lists(false);
    list.refresh().await.unwrap();
    assert!(list.error().is_none());
}
