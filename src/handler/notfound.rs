use axum::{http::Uri, Extension};

use crate::{
    api_error,
    error::{ApiError, RequestCtx},
};

pub async fn handler_404(uri: Uri, ctx: Option<Extension<RequestCtx>>) -> ApiError {
    api_error!(NotFound, format!("no route for {}", uri.path()))
        .with_ctx(ctx.map(|Extension(ctx)| ctx))
}
