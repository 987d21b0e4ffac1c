use axum::Router;
use configs::AppConfig;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Build the application router for a config: fresh in-memory state plus
/// the resource API under `api.prefix`.
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = ServerState::in_memory(cfg.api.seed)?;
    Ok(routes::build_router(state, &cfg.api.prefix, routes::build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg)?;

    // 直接按字符串绑定，允许 host 为主机名（如 localhost）
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr())
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {}: {e}", cfg.bind_addr())))?;
    let addr = listener.local_addr()?;
    info!(%addr, prefix = %cfg.api.prefix, seed = cfg.api.seed, "starting ticket api server");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_app_accepts_default_and_unseeded_configs() {
        let cfg = AppConfig::default();
        assert!(build_app(&cfg).is_ok());

        let mut cfg = AppConfig::default();
        cfg.api.seed = false;
        cfg.api.prefix = "/v1".into();
        assert!(build_app(&cfg).is_ok());
    }
}
