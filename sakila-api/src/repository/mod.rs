//! Repository traits for catalog CRUD abstractions
//!
//! Handlers never talk to the database directly. They go through the traits
//! defined here, which have a PostgreSQL implementation for the running
//! service and an in-memory implementation for router tests.
//!
//! - [`Repository`]: create, read, update, delete and paginated listing
//! - [`RelationLoader`]: eager loading of the other side of a many-to-many link
//! - [`LinkRepository`]: adding and removing rows of a join table
//!
//! # Example
//!
//! ```rust,ignore
//! use sakila_api::repository::{OrderDirection, Pagination, Repository};
//!
//! let actors = repo
//!     .find_all(OrderDirection::Ascending, Pagination::page(2, 10))
//!     .await?;
//! let total = repo.count().await?;
//! ```

mod error;
mod pagination;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use pagination::{OrderDirection, Pagination};
pub use traits::{LinkRepository, RelationLoader, Repository, RepositoryResult};
