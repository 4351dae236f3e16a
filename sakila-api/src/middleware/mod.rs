//! Middleware for the HTTP stack

mod errors;
pub mod request_tracking;

pub use errors::{envelope_transport_errors, expose_error_detail, handle_panic};
pub use request_tracking::{
    apply_request_tracking, request_id_header, sensitive_headers_layer, PROPAGATE_HEADERS,
    SENSITIVE_HEADERS,
};
