//! Route table
//!
//! Builds the application router over any [`Catalog`]. Transport concerns
//! (CORS, compression, timeouts, body limits, request tracking) are added by
//! [`Server`](crate::server::Server); everything that shapes the JSON
//! envelope lives here so it applies to every response, fallbacks included.

use axum::{
    http::{Method, Uri},
    middleware,
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handlers::{actors, categories, films, index, languages, links, ApiError};
use crate::health::{health, readiness};
use crate::middleware::{expose_error_detail, handle_panic};
use crate::openapi::swagger_ui;
use crate::state::AppState;
use crate::store::Catalog;

/// Build the router with every endpoint
pub fn router<C: Catalog>(state: AppState<C>) -> Router {
    let expose_detail = state.config().exposes_error_detail();

    let router = Router::new()
        .route("/", get(index::root::<C>))
        .route("/api", get(index::api_index))
        .route("/health", get(health::<C>))
        .route("/ready", get(readiness::<C>))
        .route("/api/actors", get(actors::list::<C>).post(actors::create::<C>))
        .route(
            "/api/actors/{id}",
            get(actors::get::<C>)
                .put(actors::update::<C>)
                .delete(actors::delete::<C>),
        )
        .route("/api/films", get(films::list::<C>).post(films::create::<C>))
        .route(
            "/api/films/{id}",
            get(films::get::<C>)
                .put(films::update::<C>)
                .delete(films::delete::<C>),
        )
        .route(
            "/api/films/{id}/actors",
            get(links::list_actors::<C>).post(links::add_actor::<C>),
        )
        .route(
            "/api/films/{id}/actors/{actor_id}",
            axum::routing::delete(links::remove_actor::<C>),
        )
        .route(
            "/api/films/{id}/categories",
            get(links::list_categories::<C>).post(links::add_category::<C>),
        )
        .route(
            "/api/films/{id}/categories/{category_id}",
            axum::routing::delete(links::remove_category::<C>),
        )
        .route(
            "/api/categories",
            get(categories::list::<C>).post(categories::create::<C>),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get::<C>)
                .put(categories::update::<C>)
                .delete(categories::delete::<C>),
        )
        .route(
            "/api/languages",
            get(languages::list::<C>).post(languages::create::<C>),
        )
        .route(
            "/api/languages/{id}",
            get(languages::get::<C>)
                .put(languages::update::<C>)
                .delete(languages::delete::<C>),
        )
        .merge(swagger_ui())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic));

    let router = if expose_detail {
        router.layer(middleware::map_response(expose_error_detail))
    } else {
        router
    };

    router.with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::route_not_found(&method, request_target(&uri))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(&method, request_target(&uri))
}

/// Path plus query string, as the client sent it
fn request_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|target| target.as_str())
        .unwrap_or_else(|| uri.path())
}
