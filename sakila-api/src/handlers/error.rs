//! API error type for handler operations
//!
//! Every failure a handler can produce ends up as an [`ApiError`], which
//! renders the JSON error envelope:
//!
//! ```json
//! { "status": "fail", "code": "NOT_FOUND", "message": "Actor not found" }
//! ```
//!
//! `status` is `fail` for client errors and `error` for server errors.
//! Validation failures add an `errors` array of `{ field, message }`.
//! Internal detail is attached to the response as an [`ErrorReport`]
//! extension and only reaches the body in development, see
//! [`crate::middleware::expose_error_detail`].

use std::fmt;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{FieldError, Invalid};
use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Handler operation that produced the error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Link,
    Unlink,
    /// Routing itself failed (unknown path or method)
    Route,
    /// Rejected by a transport layer before reaching a handler
    Transport,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Link => write!(f, "link"),
            Self::Unlink => write!(f, "unlink"),
            Self::Route => write!(f, "route"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    NotFound,
    MethodNotAllowed,
    AlreadyExists,
    ValidationFailed,
    BadRequest,
    PayloadTooLarge,
    RequestTimeout,
    InternalError,
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::MethodNotAllowed => write!(f, "method_not_allowed"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::PayloadTooLarge => write!(f, "payload_too_large"),
            Self::RequestTimeout => write!(f, "request_timeout"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable code, e.g. `NOT_FOUND`
    #[must_use]
    pub fn error_code(&self) -> String {
        format!("{}", self).to_uppercase()
    }
}

/// Structured handler error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub operation: ApiOperation,
    pub kind: ApiErrorKind,
    /// Message shown to clients
    pub message: String,
    /// Field-level validation failures
    pub errors: Vec<FieldError>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    /// Internal description, never shown outside development
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            errors: Vec::new(),
            entity_type: None,
            entity_id: None,
            detail: None,
        }
    }

    /// `<Entity> not found`
    pub fn not_found(entity_type: &str, entity_id: impl fmt::Display) -> Self {
        Self::new(
            ApiOperation::Get,
            ApiErrorKind::NotFound,
            format!("{} not found", entity_type),
        )
        .with_entity(entity_type, entity_id.to_string())
    }

    /// No route matches the path
    pub fn route_not_found(method: &Method, path: &str) -> Self {
        Self::new(
            ApiOperation::Route,
            ApiErrorKind::NotFound,
            format!("Cannot {} {}", method, path),
        )
    }

    /// The path exists but not for this method
    pub fn method_not_allowed(method: &Method, path: &str) -> Self {
        Self::new(
            ApiOperation::Route,
            ApiErrorKind::MethodNotAllowed,
            format!("Cannot {} {}", method, path),
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::BadRequest, message)
    }

    /// 422 with the given field errors
    pub fn validation_failed(errors: Vec<FieldError>) -> Self {
        let mut error = Self::new(
            ApiOperation::Create,
            ApiErrorKind::ValidationFailed,
            "Validation failed",
        );
        error.errors = errors;
        error
    }

    /// 413 `Request body too large`
    pub fn payload_too_large() -> Self {
        Self::new(
            ApiOperation::Transport,
            ApiErrorKind::PayloadTooLarge,
            "Request body too large",
        )
    }

    /// 408 `Request timed out`
    pub fn request_timeout() -> Self {
        Self::new(
            ApiOperation::Transport,
            ApiErrorKind::RequestTimeout,
            "Request timed out",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::InternalError, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::ServiceUnavailable, message)
    }

    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// The JSON error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    /// `fail` for 4xx, `error` for 5xx
    #[schema(value_type = String, example = "fail")]
    pub status: &'static str,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Response extension carrying the envelope with internal detail filled in
#[derive(Debug, Clone)]
pub struct ErrorReport(pub ErrorBody);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                detail = ?self.detail,
                retriable = self.is_retriable(),
                "API error: {}", self.message
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                detail = ?self.detail,
                "API error: {}", self.message
            );
        }

        let body = ErrorBody {
            status: if status.is_server_error() { "error" } else { "fail" },
            code: self.kind.error_code(),
            message: self.message,
            errors: self.errors,
            detail: None,
        };
        let report = self.detail.map(|detail| {
            ErrorReport(ErrorBody {
                detail: Some(detail),
                ..body.clone()
            })
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(report) = report {
            response.extensions_mut().insert(report);
        }
        response
    }
}

fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::FindById | RepositoryOperation::Exists => ApiOperation::Get,
        RepositoryOperation::FindAll
        | RepositoryOperation::Count
        | RepositoryOperation::LoadRelated => ApiOperation::List,
        RepositoryOperation::Create => ApiOperation::Create,
        RepositoryOperation::Update => ApiOperation::Update,
        RepositoryOperation::Delete => ApiOperation::Delete,
        RepositoryOperation::Link => ApiOperation::Link,
        RepositoryOperation::Unlink => ApiOperation::Unlink,
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = repository_operation_to_api_operation(err.operation);
        let detail = err.to_string();

        // Client-facing messages never carry database text
        let (kind, message, errors) = match err.kind {
            RepositoryErrorKind::NotFound => (
                ApiErrorKind::NotFound,
                format!(
                    "{} not found",
                    err.entity_type.as_deref().unwrap_or("Resource")
                ),
                Vec::new(),
            ),
            RepositoryErrorKind::AlreadyExists => (
                ApiErrorKind::AlreadyExists,
                format!("{} already exists", err.field.as_deref().unwrap_or("Resource")),
                Vec::new(),
            ),
            RepositoryErrorKind::ForeignKeyViolation => (
                ApiErrorKind::BadRequest,
                "Invalid reference to related resource".to_string(),
                Vec::new(),
            ),
            RepositoryErrorKind::ValidationFailed => (
                ApiErrorKind::ValidationFailed,
                "Validation failed".to_string(),
                err.field
                    .iter()
                    .map(|field| FieldError::new(field.as_str(), format!("{} is invalid", field)))
                    .collect(),
            ),
            RepositoryErrorKind::InvalidInput => (
                ApiErrorKind::BadRequest,
                "Invalid data format".to_string(),
                Vec::new(),
            ),
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => (
                ApiErrorKind::ServiceUnavailable,
                "Service temporarily unavailable".to_string(),
                Vec::new(),
            ),
            RepositoryErrorKind::DatabaseError | RepositoryErrorKind::Other => (
                ApiErrorKind::InternalError,
                "Database error occurred".to_string(),
                Vec::new(),
            ),
        };

        Self {
            operation,
            kind,
            message,
            errors,
            entity_type: err.entity_type,
            entity_id: err.entity_id,
            detail: Some(detail),
        }
    }
}

impl From<Invalid> for ApiError {
    fn from(invalid: Invalid) -> Self {
        match invalid {
            Invalid::Missing(message) => {
                Self::new(ApiOperation::Create, ApiErrorKind::BadRequest, message)
            }
            Invalid::Fields(errors) => Self::validation_failed(errors),
        }
    }
}
