use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use serde_json::json;
use tower::buffer::BufferLayer;
use tower::limit::RateLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::appstate::AppState;
use crate::config::{AppConfig, CargoEnv};
use crate::handler::{balance as balance_handlers, health as health_handlers};
use crate::state::common::CommonState;

pub struct ApplicationServer;

impl ApplicationServer {
    pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
        let router = Self::router(&config);

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        tracing::info!(env = %config.cargo_env, "🚀 Server has launched on http://{addr}");

        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }

    /// Balance routes are served at the root and under `/api/v1`.
    pub fn router(config: &AppConfig) -> Router {
        let app_state = AppState::new(config.ledger_path.clone());

        let routes = {
            let common_state = CommonState::new(app_state);

            Router::new()
                .route(
                    "/balance/:user_id",
                    get(balance_handlers::get_balance)
                        .delete(balance_handlers::clear_balances),
                )
                .route("/balance/:user_id/set", post(balance_handlers::set_balance))
                .route(
                    "/balance/:user_id/increment",
                    post(balance_handlers::increment_balance),
                )
                .route(
                    "/balance/:user_id/decrement",
                    post(balance_handlers::decrement_balance),
                )
                .route(
                    "/balance/:user_id/history",
                    get(balance_handlers::get_balance_history),
                )
                .with_state(common_state)
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let http_timeout = config.http_timeout;
        let req_per_sec = config.rps.unwrap_or(u64::MAX);
        let include_headers = config.cargo_env == CargoEnv::Development;

        Router::new()
            .merge(routes.clone())
            .nest("/api/v1", routes)
            .route("/health", get(health_handlers::health))
            .fallback(Self::handle_404)
            .layer(
                ServiceBuilder::new()
                    .layer(
                        TraceLayer::new_for_http().make_span_with(
                            DefaultMakeSpan::new()
                                .include_headers(include_headers),
                        ),
                    )
                    .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                        Self::handle_timeout_error(err, http_timeout)
                    }))
                    .timeout(Duration::from_secs(http_timeout))
                    .layer(cors)
                    .layer(BufferLayer::new(4096))
                    .layer(RateLimitLayer::new(
                        req_per_sec,
                        Duration::from_secs(1),
                    )),
            )
    }

    fn handle_timeout_error(
        err: BoxError,
        http_timeout: u64,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if err.is::<tower::timeout::error::Elapsed>() {
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({
                    "error":
                        format!(
                            "request took longer than the configured {} second timeout",
                            http_timeout
                        )
                })),
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("unhandled internal error: {}", err)
                })),
            )
        }
    }

    /// Resolves on CTRL+C, used for `with_graceful_shutdown`.
    async fn shutdown_signal() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
        tracing::warn!("signal shutdown");
    }

    async fn handle_404() -> impl IntoResponse {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errors": {
                    "message": vec!(String::from("The requested resource does not exist on this server!")),
                }
            })),
        )
    }
}
