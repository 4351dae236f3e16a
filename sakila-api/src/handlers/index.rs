//! `/` and `/api`

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::store::Catalog;

/// Plain-text greeting naming the running environment
///
/// The environment is always known because it defaults to `production`, so
/// the suffix is always present.
pub async fn root<C: Catalog>(State(state): State<AppState<C>>) -> String {
    format!(
        "Hello World! - Environment: {}",
        state.config().service.environment
    )
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiIndex {
    #[schema(value_type = String)]
    pub message: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
    #[schema(value_type = BTreeMap<String, String>)]
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Directory of the resource collections
#[utoipa::path(
    get,
    path = "/api",
    tag = "index",
    operation_id = "apiIndex",
    responses((status = 200, description = "Resource directory", body = ApiIndex))
)]
pub async fn api_index() -> Json<ApiIndex> {
    let endpoints = BTreeMap::from([
        ("actors", "/api/actors"),
        ("films", "/api/films"),
        ("categories", "/api/categories"),
        ("languages", "/api/languages"),
        ("swagger", "/api-docs"),
        ("health", "/health"),
        ("ready", "/ready"),
    ]);

    Json(ApiIndex {
        message: "Sakila API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}
