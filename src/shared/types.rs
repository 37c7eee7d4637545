use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Value of the `status` field on every successful response
pub const STATUS_SUCCESS: &str = "success";

/// Success envelope: `{"status":"success","data":...,"count"?:n}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure envelope: `{"error":...,"details":...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable message chosen by the handler
    pub error: String,
    /// Full error chain, including the underlying cause
    pub details: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: Some(data),
            count: None,
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: None,
            count: None,
            message: Some(message.into()),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List envelope carrying the item count alongside the data
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            status: STATUS_SUCCESS.to_string(),
            data: Some(items),
            count: Some(count),
            message: None,
        }
    }
}
