// backoffice-client/tests/common/mod.rs
// In-memory backend shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use backoffice_client::{ClientError, ClientResult, HttpClient};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// One request as the backend saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub query: Value,
    pub body: Value,
}

/// Serves one resource path from memory, the way the REST API does
pub struct MockBackend {
    resource: &'static str,
    rows: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    requests: Mutex<Vec<Recorded>>,
    /// Answer lists with `{ data, pagination }` instead of a bare array
    enveloped: bool,
    fail_lists: AtomicBool,
    fail_status_updates: AtomicBool,
    status_delay: Mutex<Duration>,
}

impl MockBackend {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            requests: Mutex::new(Vec::new()),
            enveloped: false,
            fail_lists: AtomicBool::new(false),
            fail_status_updates: AtomicBool::new(false),
            status_delay: Mutex::new(Duration::ZERO),
        }
    }

    pub fn enveloped(mut self) -> Self {
        self.enveloped = true;
        self
    }

    /// Seed rows; ids are assigned in order
    pub fn with_rows(self, rows: impl IntoIterator<Item = Value>) -> Self {
        for mut row in rows {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            row["id"] = json!(id);
            self.rows.lock().push(row);
        }
        self
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }

    pub fn delay_status_updates(&self, delay: Duration) {
        *self.status_delay.lock() = delay;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn requests_with(&self, method: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().len()
    }

    /// Drop every row after the first `keep`
    pub fn truncate(&self, keep: usize) {
        self.rows.lock().truncate(keep);
    }

    fn record(&self, method: &'static str, path: &str, query: Value, body: Value) {
        self.requests.lock().push(Recorded {
            method,
            path: path.to_string(),
            query,
            body,
        });
    }

    fn record_id(&self, path: &str) -> Option<i64> {
        path.strip_prefix(self.resource)?
            .trim_start_matches('/')
            .split('/')
            .next()?
            .parse()
            .ok()
    }

    fn list(&self, query: &Value) -> Value {
        let busqueda = query.get("busqueda").and_then(Value::as_str).map(str::to_lowercase);
        let page = query.get("page").and_then(Value::as_u64).unwrap_or(1);
        let limit = query.get("limit").and_then(Value::as_u64).unwrap_or(20);

        let matching: Vec<Value> = self
            .rows
            .lock()
            .iter()
            .filter(|row| match &busqueda {
                Some(needle) => row["nombre"]
                    .as_str()
                    .is_some_and(|n| n.to_lowercase().contains(needle.as_str())),
                None => true,
            })
            .cloned()
            .collect();

        if !self.enveloped {
            return Value::Array(matching);
        }
        let total = matching.len() as u64;
        let data: Vec<Value> = matching
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();
        json!({
            "data": data,
            "pagination": {
                "page": page,
                "perPage": limit,
                "total": total,
                "totalPages": total.div_ceil(limit),
            }
        })
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    Ok(serde_json::from_value(value)?)
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

#[async_trait]
impl HttpClient for MockBackend {
    async fn get<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let query = serde_json::to_value(query)?;
        self.record("GET", path, query.clone(), Value::Null);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("list unavailable".into()));
        }
        decode(self.list(&query))
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.record("POST", path, Value::Null, body.clone());

        let mut row = Value::Object(Map::new());
        merge(&mut row, &body);
        row["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
        for flag in ["llegoAlDeposito", "enviado"] {
            if row.get(flag).is_none() {
                row[flag] = json!(false);
            }
        }
        self.rows.lock().push(row.clone());
        decode(row)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.record("PUT", path, Value::Null, body.clone());

        let is_status = path.ends_with("/estado");
        if is_status {
            let delay = *self.status_delay.lock();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if self.fail_status_updates.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    code: 500,
                    message: "status update failed".into(),
                    details: None,
                });
            }
        }

        let id = self
            .record_id(path)
            .ok_or_else(|| ClientError::NotFound(path.to_string()))?;
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|r| r["id"] == json!(id))
            .ok_or_else(|| ClientError::NotFound(path.to_string()))?;
        merge(row, &body);
        let updated = row.clone();
        drop(rows);
        decode(updated)
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.record("DELETE", path, Value::Null, Value::Null);
        let id = self
            .record_id(path)
            .ok_or_else(|| ClientError::NotFound(path.to_string()))?;
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| r["id"] != json!(id));
        let removed = rows.len() < before;
        drop(rows);
        decode(json!({ "success": removed }))
    }

    fn token(&self) -> Option<&str> {
        None
    }
}

/// Exchange row as the backend stores it
pub fn exchange_row(nombre: &str) -> Value {
    json!({
        "nombre": nombre,
        "celular": "111",
        "pedido": format!("p-{nombre}"),
        "modeloOriginal": "A",
        "modeloCambio": "B",
        "motivo": "Talle",
        "fecha": "2024-01-01",
        "llegoAlDeposito": false,
        "enviado": false
    })
}
