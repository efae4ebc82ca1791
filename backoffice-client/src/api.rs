//! Typed resource API
//!
//! One generic [`ResourceApi`] serves every entity through the conventional
//! REST endpoints:
//!
//! | Call | Endpoint |
//! |------|----------|
//! | list | `GET /{resource}?{filter}&page=&limit=` |
//! | create | `POST /{resource}` |
//! | update | `PUT /{resource}/{id}` |
//! | status | `PUT /{resource}/{id}/estado` |
//! | delete | `DELETE /{resource}/{id}` |
//!
//! The list components only see the service traits ([`ListSource`],
//! [`RecordWriter`], [`StatusWriter`]) so they can be driven by any backend.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::IgnoredAny;
use shared::{
    DeleteAck, Editable, ListEnvelope, ListQuery, Page, PageRequest, Resource, StatusFlags,
};

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Source of list pages
#[async_trait]
pub trait ListSource<R: Resource>: Send + Sync {
    async fn list(&self, filter: &R::Filter, page: PageRequest) -> ClientResult<Page<R>>;
}

/// Create, edit and delete
#[async_trait]
pub trait RecordWriter<R: Editable>: Send + Sync {
    async fn create(&self, payload: &R::Create) -> ClientResult<R>;
    async fn update(&self, id: i64, payload: &R::Update) -> ClientResult<R>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// Single-field status updates
#[async_trait]
pub trait StatusWriter<R: StatusFlags>: Send + Sync {
    /// Send only `field` for row `id`
    async fn update_status(&self, id: i64, field: R::Field, value: bool) -> ClientResult<()>;
}

/// REST API of one resource type
pub struct ResourceApi<R, C> {
    http: Arc<C>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, C> Clone for ResourceApi<R, C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource, C: HttpClient> ResourceApi<R, C> {
    pub fn new(http: Arc<C>) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    fn record_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

#[async_trait]
impl<R: Resource, C: HttpClient> ListSource<R> for ResourceApi<R, C> {
    async fn list(&self, filter: &R::Filter, page: PageRequest) -> ClientResult<Page<R>> {
        tracing::debug!(resource = R::PATH, ?filter, page = page.page, "list");
        let query = ListQuery::new(filter, page);
        let mut envelope: ListEnvelope<R> = self.http.get(R::PATH, &query).await?;
        envelope.arrange();
        Ok(envelope.into_page(page))
    }
}

#[async_trait]
impl<R: Editable, C: HttpClient> RecordWriter<R> for ResourceApi<R, C> {
    async fn create(&self, payload: &R::Create) -> ClientResult<R> {
        tracing::debug!(resource = R::PATH, "create");
        self.http.post(R::PATH, payload).await
    }

    async fn update(&self, id: i64, payload: &R::Update) -> ClientResult<R> {
        tracing::debug!(resource = R::PATH, id, "update");
        self.http.put(&Self::record_path(id), payload).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        tracing::debug!(resource = R::PATH, id, "delete");
        let ack: DeleteAck = self.http.delete(&Self::record_path(id)).await?;
        if ack.succeeded() {
            Ok(())
        } else {
            Err(ClientError::Internal(format!("{} {} was not deleted", R::PATH, id)))
        }
    }
}

#[async_trait]
impl<R: StatusFlags, C: HttpClient> StatusWriter<R> for ResourceApi<R, C> {
    async fn update_status(&self, id: i64, field: R::Field, value: bool) -> ClientResult<()> {
        tracing::debug!(resource = R::PATH, id, ?field, value, "update status");
        let patch = R::patch(field, value);
        let path = format!("{}/estado", Self::record_path(id));
        // Response body is whatever the backend echoes; the flag is merged locally
        let _: IgnoredAny = self.http.put(&path, &patch).await?;
        Ok(())
    }
}
