//! Resource handler: one implementation of the CRUD contract for every
//! collection. Hosting adapters translate their request shape into an
//! [`ApiRequest`] and an [`ApiResponse`] back into their response shape.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use models::record::{parse_patch, parse_record, Record};
use models::Collection;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::resources;
use crate::storage::RecordStore;

/// CORS and content-type headers attached to every API response.
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Content-Type", "application/json"),
];

/// Platform-neutral request: method, resource name, optional id, query
/// parameters in arrival order and the raw body.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub resource: String,
    pub id: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self { method, resource: resource.into(), id: None, query: Vec::new(), body: None }
    }

    /// Empty ids count as absent.
    pub fn with_id(mut self, id: Option<impl Into<String>>) -> Self {
        self.id = id.map(Into::into).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Status plus JSON body. `body == None` means an empty body (preflight).
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: Some(body) }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::json(status, json!({ "error": message.into() }))
    }

    /// Serialized body; empty string when there is none.
    pub fn body_string(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

impl From<ServiceError> for ApiResponse {
    fn from(err: ServiceError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            warn!(error = %err, "request failed");
        }
        Self::error(status, err.to_string())
    }
}

fn records(list: Vec<Record>) -> Value {
    Value::Array(list.into_iter().map(Value::Object).collect())
}

fn body_record(req: &ApiRequest) -> Result<Record, ServiceError> {
    Ok(parse_record(req.body.as_deref().unwrap_or_default())?)
}

/// Stateless dispatcher over a shared [`RecordStore`].
#[derive(Clone)]
pub struct ResourceHandler {
    store: Arc<dyn RecordStore>,
}

impl ResourceHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Handle one request. Never fails: every error becomes a response.
    pub async fn handle(&self, req: ApiRequest) -> ApiResponse {
        if req.method == Method::OPTIONS {
            return ApiResponse::empty(StatusCode::OK);
        }
        match self.dispatch(&req).await {
            Ok(resp) => resp,
            Err(e) => e.into(),
        }
    }

    async fn dispatch(&self, req: &ApiRequest) -> Result<ApiResponse, ServiceError> {
        let collection = req
            .resource
            .parse::<Collection>()
            .map_err(|_| ServiceError::UnknownResource(req.resource.clone()))?;
        let label = collection.label();
        debug!(method = %req.method, %collection, id = ?req.id, "dispatch");

        match req.method {
            Method::GET => match &req.id {
                Some(id) => {
                    let rec = self
                        .store
                        .find_by_id(collection, id)
                        .await
                        .ok_or_else(|| ServiceError::not_found(label))?;
                    Ok(ApiResponse::json(StatusCode::OK, Value::Object(rec)))
                }
                None => {
                    let filter = resources::list_filter(collection, req.query_pairs());
                    let list = self.store.list(collection, filter.as_ref()).await;
                    Ok(ApiResponse::json(StatusCode::OK, records(list)))
                }
            },
            Method::POST => {
                let partial = body_record(req)?;
                let created = self.store.insert(collection, partial).await;
                Ok(ApiResponse::json(StatusCode::CREATED, Value::Object(created)))
            }
            Method::PUT => {
                let id = req.id.as_deref().ok_or_else(|| ServiceError::id_required(label))?;
                self.store
                    .find_by_id(collection, id)
                    .await
                    .ok_or_else(|| ServiceError::not_found(label))?;
                let patch = parse_patch(req.body.as_deref().unwrap_or_default())?;
                let updated = self.store.update(collection, id, patch).await?;
                Ok(ApiResponse::json(StatusCode::OK, Value::Object(updated)))
            }
            Method::DELETE => {
                let id = req.id.as_deref().ok_or_else(|| ServiceError::id_required(label))?;
                self.store.delete(collection, id).await?;
                Ok(ApiResponse::json(StatusCode::OK, json!({ "success": true })))
            }
            _ => Err(ServiceError::MethodNotAllowed),
        }
    }
}
