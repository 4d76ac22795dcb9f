use std::fmt;
use std::panic::Location;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use tracing::{event, Level};

use crate::response::ApiResponse;

#[derive(Debug, Clone)]
pub struct RequestCtx {
    pub id: String,
    pub method: String,
    pub path: String,
    pub uri: String,
    pub instance: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub inner: ApiErrorType,
    pub ctx: Option<RequestCtx>,
}

#[derive(Debug)]
pub enum ApiErrorType {
    BadRequest {
        message: String,
        location: &'static Location<'static>,
        module: String,
    },
    NotFound {
        message: String,
        location: &'static Location<'static>,
        module: String,
    },
    Custom {
        status: StatusCode,
        message: String,
        location: &'static Location<'static>,
        module: String,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.inner {
            ApiErrorType::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiErrorType::Custom { status, .. } => *status,
        }
    }

    pub fn message(&self) -> String {
        match &self.inner {
            ApiErrorType::BadRequest { message, .. } => message.clone(),
            ApiErrorType::NotFound { message, .. } => message.clone(),
            ApiErrorType::Custom { message, .. } => message.clone(),
        }
    }

    pub fn location(&self) -> &'static Location<'static> {
        match &self.inner {
            ApiErrorType::BadRequest { location, .. } => location,
            ApiErrorType::NotFound { location, .. } => location,
            ApiErrorType::Custom { location, .. } => location,
        }
    }

    pub fn module(&self) -> &str {
        match &self.inner {
            ApiErrorType::BadRequest { module, .. } => module,
            ApiErrorType::NotFound { module, .. } => module,
            ApiErrorType::Custom { module, .. } => module,
        }
    }

    pub fn with_ctx(mut self, ctx: Option<RequestCtx>) -> Self {
        self.ctx = ctx;
        self
    }

    fn log_error(&self) {
        let status = self.status_code();
        let message = self.message();
        let location = self.location();
        let module = self.module();

        // 4xx are the client's problem, keep them out of the error stream
        let server_side = status.is_server_error();

        if let Some(ctx) = &self.ctx {
            if server_side {
                event!(
                    Level::ERROR,
                    status = status.as_u16(),
                    message = %message,
                    module = %module,
                    file = %location.file(),
                    line = %location.line(),
                    request_id = %ctx.id,
                    method = %ctx.method,
                    path = %ctx.path,
                    uri = %ctx.uri,
                    instance = %ctx.instance,
                    "API Error occurred"
                );
            } else {
                event!(
                    Level::WARN,
                    status = status.as_u16(),
                    message = %message,
                    module = %module,
                    request_id = %ctx.id,
                    method = %ctx.method,
                    path = %ctx.path,
                    "API Error occurred"
                );
            }
        } else if server_side {
            event!(
                Level::ERROR,
                status = status.as_u16(),
                message = %message,
                module = %module,
                file = %location.file(),
                line = %location.line(),
                "API Error occurred"
            );
        } else {
            event!(
                Level::WARN,
                status = status.as_u16(),
                message = %message,
                module = %module,
                "API Error occurred"
            );
        }
    }
}

#[macro_export]
macro_rules! api_error {
    ($error_type:ident) => {
        $crate::error::ApiError {
            inner: $crate::error::ApiErrorType::$error_type {
                message: stringify!($error_type).to_string(),
                location: std::panic::Location::caller(),
                module: module_path!().to_string(),
            },
            ctx: None,
        }
    };
    ($error_type:ident, $msg:expr) => {
        $crate::error::ApiError {
            inner: $crate::error::ApiErrorType::$error_type {
                message: $msg.to_string(),
                location: std::panic::Location::caller(),
                module: module_path!().to_string(),
            },
            ctx: None,
        }
    };
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(error: JsonRejection) -> Self {
        ApiError {
            inner: ApiErrorType::Custom {
                status: error.status(),
                message: error.body_text(),
                location: Location::caller(),
                module: module_path!().to_string(),
            },
            ctx: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_error();

        let status = self.status_code();
        let message = self.message();
        let response = ApiResponse::<()>::error(Some(&message), status);
        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[test]
    fn test_macro_records_call_site() {
        let err = api_error!(BadRequest, "text must not be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "text must not be empty");
        assert_eq!(err.module(), module_path!());
        assert!(err.location().file().ends_with("error.rs"));
    }

    #[test]
    fn test_macro_default_message() {
        let err = api_error!(NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "NotFound");
    }

    #[tokio::test]
    async fn test_into_response_uses_envelope() {
        let response = api_error!(NotFound, "boom").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
        assert_eq!(json["code"], 404);
        assert!(json.get("data").is_none());
    }
}
