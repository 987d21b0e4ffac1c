pub mod resources;

use axum::{
    http::{header, Method},
    routing::{any, get},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::ApiError;
pub use resources::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn fallback() -> ApiError {
    ApiError::resource_not_found()
}

/// 跨域：任意来源，方法与请求头与资源响应中声明的一致
pub fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the full application router: health check plus the resource API
/// nested under `prefix` (e.g. `/api`).
pub fn build_router(state: ServerState, prefix: &str, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/:resource", any(resources::collection))
        .route("/:resource/:id", any(resources::item))
        // 末尾斜杠与无斜杠等价
        .route("/:resource/", any(resources::collection))
        .route("/:resource/:id/", any(resources::item))
        .fallback(fallback);

    Router::new()
        .route("/health", get(health))
        .nest(prefix, api)
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
