//! Serverless function adapter.
//!
//! Accepts the event shape function platforms hand to a handler
//! (`httpMethod`, `path`, `body`, `queryStringParameters`) and produces the
//! `{statusCode, headers, body}` result they expect, with the body already
//! serialized to a string.

use std::collections::BTreeMap;

use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::handler::{ApiRequest, ApiResponse, ResourceHandler, RESPONSE_HEADERS};

/// Path prefixes stripped before the resource segment, longest first.
const PATH_PREFIXES: [&str; 2] = ["/.netlify/functions/api", "/api"];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<ApiResponse> for FunctionResponse {
    fn from(resp: ApiResponse) -> Self {
        let headers = RESPONSE_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { status_code: resp.status.as_u16(), headers, body: resp.body_string() }
    }
}

/// Split a request path into `(resource, id)` after removing a known prefix.
/// Empty segments are ignored, so `/api//tickets/` yields `tickets`.
pub fn split_path(path: &str) -> (Option<&str>, Option<&str>) {
    let rest = PATH_PREFIXES
        .iter()
        .find_map(|p| path.strip_prefix(p))
        .unwrap_or(path);
    let mut parts = rest.split('/').filter(|p| !p.is_empty());
    (parts.next(), parts.next())
}

/// Translate one event into a handler call.
pub async fn invoke(handler: &ResourceHandler, event: FunctionEvent) -> FunctionResponse {
    let method = match Method::from_bytes(event.http_method.to_ascii_uppercase().as_bytes()) {
        Ok(m) => m,
        Err(_) => return ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into(),
    };
    let (resource, id) = split_path(&event.path);
    let mut req = ApiRequest::new(method, resource.unwrap_or_default()).with_id(id);
    if let Some(params) = event.query_string_parameters {
        for (k, v) in params {
            req = req.with_query(k, v);
        }
    }
    if let Some(body) = event.body {
        req = req.with_body(body);
    }
    handler.handle(req).await.into()
}
