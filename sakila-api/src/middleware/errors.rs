//! Error envelope middleware
//!
//! [`handle_panic`] turns a panicking handler into the standard 500 envelope
//! for `CatchPanicLayer`. [`expose_error_detail`] is installed only in
//! development and rewrites error bodies to include the internal detail
//! carried in the [`ErrorReport`] extension. [`envelope_transport_errors`]
//! wraps the bare 408 and 413 replies of the timeout and body limit layers.

use std::any::Any;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::handlers::{ApiError, ErrorReport};

/// Render a caught panic as `500 Something went wrong`
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "Unknown panic payload".to_string()
    };

    ApiError::internal("Something went wrong")
        .with_detail(detail)
        .into_response()
}

/// Give transport-layer rejections the JSON envelope
///
/// Responses that already carry a JSON body came from [`ApiError`] and pass
/// through unchanged.
pub async fn envelope_transport_errors(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large().into_response(),
        StatusCode::REQUEST_TIMEOUT => ApiError::request_timeout().into_response(),
        _ => response,
    }
}

/// Replace an error body with its detailed report, if one is attached
pub async fn expose_error_detail(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    let Some(ErrorReport(report)) = parts.extensions.remove::<ErrorReport>() else {
        return Response::from_parts(parts, body);
    };

    match serde_json::to_vec(&report) {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!("Failed to serialize error report: {}", e);
            Response::from_parts(parts, body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_handle_panic_envelope() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["message"], "Something went wrong");
        assert!(json.get("detail").is_none());
    }

    #[tokio::test]
    async fn test_expose_error_detail_adds_detail() {
        let response = handle_panic(Box::new(String::from("index out of bounds")));
        let response = expose_error_detail(response).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Something went wrong");
        assert_eq!(json["detail"], "index out of bounds");
    }

    #[tokio::test]
    async fn test_transport_errors_get_envelope() {
        let response = (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();
        let response = envelope_transport_errors(response).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["status"], "fail");
        assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(json["message"], "Request body too large");

        let response = envelope_transport_errors(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body_json(response).await["code"], "REQUEST_TIMEOUT");
    }

    #[tokio::test]
    async fn test_transport_errors_keep_envelopes() {
        let response = ApiError::payload_too_large()
            .with_detail("length limit exceeded")
            .into_response();
        let response = envelope_transport_errors(response).await;
        let response = expose_error_detail(response).await;
        assert_eq!(body_json(response).await["detail"], "length limit exceeded");

        let response = (StatusCode::BAD_REQUEST, "plain").into_response();
        let response = envelope_transport_errors(response).await;
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"plain");
    }

    #[tokio::test]
    async fn test_expose_error_detail_leaves_other_responses() {
        let response = (StatusCode::OK, "fine").into_response();
        let response = expose_error_detail(response).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
