use crate::backend::BackendClient;
use crate::config::Config;
use crate::gateway::locale_gate;
use crate::i18n::{LocaleSettings, Messages};
use crate::pages;
use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, read-only state handed to every page handler.
#[derive(Clone)]
pub struct AppState {
    pub locales: Arc<LocaleSettings>,
    pub messages: Arc<Messages>,
    /// `None` when no backend URL is configured; pages that need it fail
    /// individually.
    pub backend: Option<BackendClient>,
}

impl AppState {
    pub fn new(locales: LocaleSettings, messages: Messages, backend: Option<BackendClient>) -> Self {
        Self {
            locales: Arc::new(locales),
            messages: Arc::new(messages),
            backend,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = match config.api_url.as_deref() {
            Some(url) => Some(BackendClient::new(url).context("Invalid API_URL")?),
            None => {
                warn!("API_URL is not set; pages that need the backend will fail");
                None
            }
        };
        Ok(Self::new(config.locales.clone(), Messages::load(), backend))
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Build the storefront router with the locale gateway in front of every
/// route, including the fallback.
pub fn router(state: AppState) -> Router {
    let gate = middleware::from_fn_with_state(Arc::clone(&state.locales), locale_gate);

    Router::new()
        .route("/api/health", get(health))
        .route("/:locale", get(pages::home))
        .route("/:locale/menu", get(pages::menu))
        .route(
            "/:locale/checkout",
            get(pages::checkout).post(pages::place_order),
        )
        .fallback(not_found)
        .layer(gate)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "✓ Storefront listening on {} (locales: {})",
        addr,
        config
            .locales
            .supported()
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>()
            .join(", ")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
