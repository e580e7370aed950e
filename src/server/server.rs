use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing::info;

use crate::config::settings::SettingsConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::token_route::TokenState;
use crate::token::GoogleTokenFetcher;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub token_state: TokenState,
}

impl AppState {
    pub fn new(metrics: &Metrics, fetcher: GoogleTokenFetcher) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            token_state: TokenState::new(fetcher),
        }
    }
}

/// Router serving `/token` and, when enabled, the metrics path.
pub async fn router(settings: &SettingsConfig, fetcher: GoogleTokenFetcher) -> Router {
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, fetcher);

    Router::new()
        .merge(state.metrics_state.router(&settings.metrics))
        .merge(state.token_state.router())
        .with_state(state)
}

/// Start the Axum server on `settings.server` and serve until it fails.
pub async fn start(settings: Arc<SettingsConfig>, fetcher: GoogleTokenFetcher) -> Result<()> {
    let app = router(&settings, fetcher).await;

    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "server listening");

    get_metrics().await.up.set(1);
    axum::serve(listener, app).await?;

    Ok(())
}
