use axum::http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
#[serde(untagged)]
pub enum ApiData<T> {
    Data(T)
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ApiData<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(ApiData::Data(data)),
            code: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<&str>, code: StatusCode) -> Self {
        Self {
            status: "error".to_string(),
            message: message.map(|m| m.to_string()),
            data: None,
            code: Some(code.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_skips_empty_fields() {
        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "success", "data": [1, 2] }));
    }

    #[test]
    fn test_error_carries_code() {
        let response = ApiResponse::<()>::error(Some("nope"), StatusCode::BAD_REQUEST);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "error", "message": "nope", "code": 400 })
        );
    }
}
