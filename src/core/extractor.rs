use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, Layer};
use crate::shared::types::ErrorResponse;

/// Rejection body in the `{error, details}` envelope, keeping axum's status
fn rejection_response(status: StatusCode, message: String, details: String) -> Response {
    if status == StatusCode::BAD_REQUEST {
        return AppError::BadRequest(message).into_response();
    }

    tracing::warn!(layer = %Layer::Handler, status = %status, "{}", message);
    (
        status,
        Json(ErrorResponse {
            error: message,
            details,
        }),
    )
        .into_response()
}

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let details = self.0.body_text();
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ if status == StatusCode::PAYLOAD_TOO_LARGE => "Request body too large".to_string(),
            _ => "Failed to read request body".to_string(),
        };

        rejection_response(status, message, details)
    }
}

/// Path extractor whose rejections use the JSON error envelope
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppPathRejection(rejection)),
        }
    }
}

pub struct AppPathRejection(PathRejection);

impl IntoResponse for AppPathRejection {
    fn into_response(self) -> Response {
        let details = self.0.body_text();
        rejection_response(
            self.0.status(),
            format!("Invalid path parameter: {}", details),
            details,
        )
    }
}

/// Parse a numeric `{id}` path segment, rejecting anything else as a bad request
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|e| AppError::BadRequest(format!("Invalid category ID '{}': {}", raw, e)))
}
