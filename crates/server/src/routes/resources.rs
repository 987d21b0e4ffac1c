use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::Method,
};
use service::{ApiRequest, MemoryStore, RecordStore, ResourceHandler};

use crate::errors::{ApiReply, StartupError};

#[derive(Clone)]
pub struct ServerState {
    pub handler: ResourceHandler,
}

impl ServerState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { handler: ResourceHandler::new(store) }
    }

    /// Fresh process state: seeded collections, or empty ones when `seed` is off.
    pub fn in_memory(seed: bool) -> Result<Self, StartupError> {
        let store: Arc<dyn RecordStore> = if seed { MemoryStore::seeded()? } else { MemoryStore::new() };
        Ok(Self::new(store))
    }
}

fn to_request(method: Method, resource: String, id: Option<String>, query: Vec<(String, String)>, body: Bytes) -> ApiRequest {
    // 路径中没有 id 时，兼容 `?id=` 形式
    let id = id.or_else(|| query.iter().find(|(k, _)| k == "id").map(|(_, v)| v.clone()));
    let mut req = ApiRequest::new(method, resource).with_id(id);
    req.query = query;
    if !body.is_empty() {
        req = req.with_body(body.to_vec());
    }
    req
}

/// `/{prefix}/:resource`
pub async fn collection(
    State(state): State<ServerState>,
    method: Method,
    Path(resource): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> ApiReply {
    let req = to_request(method, resource, None, query, body);
    ApiReply(state.handler.handle(req).await)
}

/// `/{prefix}/:resource/:id`
pub async fn item(
    State(state): State<ServerState>,
    method: Method,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> ApiReply {
    let req = to_request(method, resource, Some(id), query, body);
    ApiReply(state.handler.handle(req).await)
}
