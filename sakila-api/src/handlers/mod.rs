//! HTTP handlers for the catalog resources
//!
//! Every handler is generic over [`Catalog`](crate::store::Catalog) and
//! returns `Result<_, ApiError>`, so repository failures, validation
//! failures and extractor rejections all render the same JSON envelope.
//!
//! - [`ApiError`]: error type with HTTP status mapping
//! - [`PageQuery`] / [`ListResponse`]: paginated collections
//! - [`ApiJson`], [`ApiPath`], [`ApiQuery`]: extractors rejecting into [`ApiError`]

pub mod actors;
pub mod categories;
mod error;
mod extract;
pub mod films;
pub mod index;
pub mod languages;
pub mod links;
mod query;
mod response;

pub use error::{ApiError, ApiErrorKind, ApiOperation, ErrorBody, ErrorReport};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use query::{PageQuery, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use response::{ListResponse, PaginationMeta};
