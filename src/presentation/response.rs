use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

/// `{code, message, data}` body shared by every JSON endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: "success".to_string(),
            data,
        }
    }
}

impl ApiResponse<Value> {
    /// Client errors carry an empty list; internal errors a short diagnostic.
    pub fn from_error(err: &DomainError) -> Self {
        if err.is_client_error() {
            Self {
                code: StatusCode::BAD_REQUEST.as_u16(),
                message: err.to_string(),
                data: Value::Array(Vec::new()),
            }
        } else {
            tracing::error!(error = %err, "request failed");
            Self {
                code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                message: "internalServerError".to_string(),
                data: Value::String(err.diagnostic().to_string()),
            }
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        ApiResponse::<Value>::from_error(&self).into_response()
    }
}
