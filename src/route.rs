use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::{ACCEPT, CONTENT_TYPE}, Method},
    routing::{get, post},
    Router,
};
use sentry_tower::NewSentryLayer;
use tower::{limit::GlobalConcurrencyLimitLayer, ServiceBuilder};
use tower_http::{
    classify::ServerErrorsFailureClass,
    compression::{CompressionLayer, DefaultPredicate},
    cors::CorsLayer,
    trace::TraceLayer,
};

use crate::{
    handler::{
        handler_404,
        hello_handler,
        polish_handler_post,
        polish_history_handler_get,
    },
    middleware::{process_time_middleware, request_id_middleware},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/api/hello", get(hello_handler))
        // class-level /api/hello plus method-level /hello of the former controller
        .route("/api/hello/hello", get(hello_handler));

    let polish_routes = Router::new()
        .route("/api/polish", post(polish_handler_post))
        .route("/api/polish/history", get(polish_history_handler_get));

    Router::new()
        .merge(public_routes)
        .merge(polish_routes)
        .fallback(handler_404)
        .with_state(app_state)
}

/// Router wrapped in the full middleware stack, as served by `main`.
pub fn create_app(app_state: Arc<AppState>) -> Router {
    let config = &app_state.config;

    let cors = CorsLayer::new()
        .allow_origin(config.cors_host.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers([ACCEPT, CONTENT_TYPE]);

    let compression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true)
        .compress_when(DefaultPredicate::new());

    let trace_layer = TraceLayer::new_for_http()
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                tracing::error!(
                    "Error request processing (latency: {:?}): {:?}",
                    latency,
                    error
                );
            },
        );

    // one semaphore shared by every route the stack is cloned onto
    let middleware_stack = ServiceBuilder::new()
        .layer(NewSentryLayer::new_from_top())
        .layer(trace_layer)
        .layer(cors)
        .layer(GlobalConcurrencyLimitLayer::new(config.concurrency_limit))
        .layer(axum::middleware::from_fn(process_time_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware));

    create_router(app_state.clone())
        .layer(middleware_stack)
        .layer(compression_layer)
}
