//! Request tracking middleware
//!
//! Request ID generation and propagation, tracing header propagation and
//! masking of sensitive headers in logs. Which of these run is decided by
//! [`RequestTrackingConfig`].

use axum::Router;
use http::HeaderName;
use tower_http::{
    propagate_header::PropagateHeaderLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::config::RequestTrackingConfig;

/// Default request ID header
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Tracing headers copied from the request onto the response
pub const PROPAGATE_HEADERS: &[&str] = &["x-trace-id", "x-span-id", "x-correlation-id"];

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Header carrying the request ID, falling back to `x-request-id` when the
/// configured name is not a valid header name
pub fn request_id_header(config: &RequestTrackingConfig) -> HeaderName {
    match HeaderName::try_from(config.request_id_header.as_str()) {
        Ok(name) => name,
        Err(_) => {
            tracing::warn!(
                "Invalid request ID header '{}', using {}",
                config.request_id_header,
                REQUEST_ID_HEADER
            );
            REQUEST_ID_HEADER
        }
    }
}

/// Sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .copied()
        .map(HeaderName::from_static)
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}

/// Apply the configured request tracking layers
///
/// Must run after the trace layer has been added so the masking and the
/// request ID are in place before the request span is created.
pub fn apply_request_tracking(router: Router, config: &RequestTrackingConfig) -> Router {
    let mut router = router;

    if config.mask_sensitive_headers {
        router = router.layer(sensitive_headers_layer());
    }

    if config.propagate_headers {
        for header in PROPAGATE_HEADERS.iter().copied() {
            router = router.layer(PropagateHeaderLayer::new(HeaderName::from_static(header)));
        }
    }

    if config.request_id_enabled {
        let header = request_id_header(config);
        router = router
            .layer(PropagateRequestIdLayer::new(header.clone()))
            .layer(SetRequestIdLayer::new(header, MakeRequestUuid));
    }

    router
}
