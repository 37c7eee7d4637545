use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

/// Closed set of error kinds used to pick the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidData,
    Storage,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidData => StatusCode::BAD_REQUEST,
            ErrorKind::Storage | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caused by the request rather than the server; logged at `warn`
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorKind::NotFound | ErrorKind::InvalidData)
    }
}

/// Layer that attached a piece of context to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Repository,
    Service,
    Handler,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Repository => "repository",
            Layer::Service => "service",
            Layer::Handler => "handler",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("{message}: {source}")]
    Context {
        layer: Layer,
        message: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wrap this error with a message from `layer`, keeping its kind
    pub fn context(self, layer: Layer, message: impl Into<String>) -> Self {
        AppError::Context {
            layer,
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// Kind of the innermost error; context layers never change it
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Database(_) => ErrorKind::Storage,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) | AppError::BadRequest(_) => ErrorKind::InvalidData,
            AppError::Internal(_) => ErrorKind::Internal,
            AppError::Context { source, .. } => source.kind(),
        }
    }

    /// Layer that attached the outermost context, if any
    pub fn layer(&self) -> Option<Layer> {
        match self {
            AppError::Context { layer, .. } => Some(*layer),
            _ => None,
        }
    }

    /// Innermost error of a context chain
    pub fn root(&self) -> &AppError {
        let mut current = self;
        while let AppError::Context { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Message shown as the primary `error` field.
    ///
    /// Client errors surface their own root message. Server errors surface the
    /// outermost context message so driver text stays in `details`.
    fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::NotFound | ErrorKind::InvalidData => match self.root() {
                AppError::NotFound(msg) | AppError::Validation(msg) | AppError::BadRequest(msg) => {
                    msg.clone()
                }
                other => other.to_string(),
            },
            ErrorKind::Storage | ErrorKind::Internal => match self {
                AppError::Context { message, .. } => message.clone(),
                AppError::Database(_) => "Database error occurred".to_string(),
                _ => "Internal server error".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status_code();
        let origin = self.layer().unwrap_or(Layer::Handler);

        if kind.is_client_error() {
            tracing::warn!(layer = %Layer::Handler, origin = %origin, kind = ?kind, "{}", self);
        } else {
            tracing::error!(layer = %Layer::Handler, origin = %origin, kind = ?kind, "{}", self);
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
            details: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
