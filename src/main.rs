mod route;
mod middleware;
mod error;
mod handler;
mod model;
mod response;
mod config;
mod service;

use std::sync::Arc;

use anyhow::Context;
use sentry::{ClientOptions, IntoDsn};
use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::route::create_app;
use crate::service::CorrectionHistory;

pub struct AppState {
    pub config: Config,
    pub history: CorrectionHistory,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let history = CorrectionHistory::new(config.history_size);
        Self { config, history }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .parse_lossy(&config.log_filter)
        )
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_ansi(false)
        .init();

    let _guard = sentry::init((
        config.sentry_dsn.as_str().into_dsn().context("invalid SENTRY_DSN")?,
        ClientOptions {
            release: sentry::release_name!(),
            traces_sample_rate: 0.2,
            ..Default::default()
        },
    ));

    let bind = config.server_bind_addr.clone();
    let app_state = Arc::new(AppState::new(config));
    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    tracing::info!(bind = %bind, "server started");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");

    Ok(())
}
