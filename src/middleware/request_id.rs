use axum::{
    middleware::Next,
    response::Response,
    http::{Request, HeaderValue},
    body::Body,
};
use sentry::Scope;
use tracing::{debug_span, Instrument};
use uuid::Uuid;

use crate::error::RequestCtx;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const INSTANCE_HEADER: &str = "x-instance";

fn instance_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn request_id_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let uri = request.uri().to_string();
    let instance = instance_name();

    request.extensions_mut().insert(RequestCtx {
        id: request_id.clone(),
        method: method.to_string(),
        path: path.clone(),
        uri,
        instance: instance.clone(),
    });

    sentry::configure_scope(|scope: &mut Scope| {
        scope.set_tag("request_id", &request_id);
        scope.set_tag("http.method", method.as_str());
        scope.set_tag("http.url", &path);
        scope.set_tag("instance", &instance);
    });

    let span = debug_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        instance = %instance
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&instance) {
        response.headers_mut().insert(INSTANCE_HEADER, value);
    }

    response
}
