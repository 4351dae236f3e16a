//! # sakila-api
//!
//! REST API over the Sakila movie-catalog schema: actors, films, categories,
//! languages and the joins between films and their cast and categories.
//!
//! ## Features
//!
//! - **CRUD**: list (paginated), get, create, update and delete per resource
//! - **Error envelope**: every failure renders `{ status, code, message, errors? }`
//! - **Persistence**: PostgreSQL through sqlx, with migrations and seed data
//! - **Middleware stack**: request tracking, panic recovery, body size limits, CORS
//! - **Health checks**: liveness and readiness checks
//! - **API docs**: OpenAPI document with Swagger UI at `/api-docs`
//! - **Graceful shutdown**: Proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use sakila_api::{
//!     config::Config, database, observability::init_tracing, routes::router,
//!     server::Server, state::AppState, store::PgCatalog,
//! };
//!
//! #[tokio::main]
//! async fn main() -> sakila_api::error::Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = database::create_pool(&config.database).await?;
//!     let app = router(AppState::new(config.clone(), PgCatalog::new(pool)));
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod openapi;
pub mod repository;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use error::{Error, Result};
