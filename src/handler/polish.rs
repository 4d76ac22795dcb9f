use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;

use crate::{
    api_error,
    error::{ApiError, RequestCtx},
    model::PolishRequest,
    response::ApiResponse,
    service::polish,
    AppState,
};

/// Handles POST requests carrying text to correct
pub async fn polish_handler_post(
    State(state): State<Arc<AppState>>,
    ctx: Option<Extension<RequestCtx>>,
    payload: Result<Json<PolishRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let ctx = ctx.map(|Extension(ctx)| ctx);

    let Json(request) = payload.map_err(|e| ApiError::from(e).with_ctx(ctx.clone()))?;

    if request.text.trim().is_empty() {
        return Err(api_error!(BadRequest, "text must not be empty").with_ctx(ctx));
    }

    let correction = polish(&request.text);
    info!(
        original_len = correction.original.chars().count(),
        corrected_len = correction.corrected.chars().count(),
        "text polished"
    );
    state.history.record(correction.clone()).await;

    Ok((StatusCode::OK, Json(ApiResponse::success(correction))))
}

/// Handles GET requests for the latest corrections, newest first
pub async fn polish_history_handler_get(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let corrections = state.history.recent().await;
    Json(ApiResponse::success(corrections))
}
