//! OpenAPI document and Swagger UI
//!
//! The document is assembled from the `#[utoipa::path]` annotations on the
//! handlers. Swagger UI is served at [`SWAGGER_UI_PATH`] and the raw JSON at
//! [`OPENAPI_JSON_PATH`].

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, ErrorBody, PaginationMeta};
use crate::health;
use crate::models::{
    Actor, ActorWithFilms, AddActorRequest, AddCategoryRequest, Category, CategoryRequest,
    CategoryWithFilms, CreateActorRequest, CreateFilmRequest, FieldError, Film, FilmActor,
    FilmCategory, FilmDetails, Language, LanguageRequest, Rating, UpdateActorRequest,
    UpdateFilmRequest,
};
use crate::responses::Message;

/// Where the Swagger UI is mounted
pub const SWAGGER_UI_PATH: &str = "/api-docs";

/// Where the generated document is served
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// `GET /api/actors` page
#[derive(Debug, Serialize, ToSchema)]
pub struct ActorPage {
    pub actors: Vec<Actor>,
    pub pagination: PaginationMeta,
}

/// `GET /api/films` page
#[derive(Debug, Serialize, ToSchema)]
pub struct FilmPage {
    pub films: Vec<Film>,
    pub pagination: PaginationMeta,
}

/// `GET /api/categories` page
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage {
    pub categories: Vec<Category>,
    pub pagination: PaginationMeta,
}

/// `GET /api/languages` page
#[derive(Debug, Serialize, ToSchema)]
pub struct LanguagePage {
    pub languages: Vec<Language>,
    pub pagination: PaginationMeta,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sakila API",
        description = "REST API over the Sakila movie-catalog schema"
    ),
    paths(
        handlers::index::api_index,
        health::health,
        health::readiness,
        handlers::actors::list,
        handlers::actors::get,
        handlers::actors::create,
        handlers::actors::update,
        handlers::actors::delete,
        handlers::films::list,
        handlers::films::get,
        handlers::films::create,
        handlers::films::update,
        handlers::films::delete,
        handlers::links::list_actors,
        handlers::links::add_actor,
        handlers::links::remove_actor,
        handlers::links::list_categories,
        handlers::links::add_category,
        handlers::links::remove_category,
        handlers::categories::list,
        handlers::categories::get,
        handlers::categories::create,
        handlers::categories::update,
        handlers::categories::delete,
        handlers::languages::list,
        handlers::languages::get,
        handlers::languages::create,
        handlers::languages::update,
        handlers::languages::delete,
    ),
    components(schemas(
        Actor,
        ActorWithFilms,
        ActorPage,
        CreateActorRequest,
        UpdateActorRequest,
        Film,
        FilmDetails,
        FilmPage,
        CreateFilmRequest,
        UpdateFilmRequest,
        Rating,
        Category,
        CategoryWithFilms,
        CategoryPage,
        CategoryRequest,
        Language,
        LanguagePage,
        LanguageRequest,
        FilmActor,
        FilmCategory,
        AddActorRequest,
        AddCategoryRequest,
        ErrorBody,
        FieldError,
        PaginationMeta,
        Message,
    )),
    tags(
        (name = "index", description = "Service index and health checks"),
        (name = "actors", description = "Actors and their films"),
        (name = "films", description = "Films, their cast and categories"),
        (name = "categories", description = "Film categories"),
        (name = "languages", description = "Film languages"),
    )
)]
pub struct ApiDoc;

/// The generated document, versioned like the crate
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

/// Swagger UI over [`api_doc`], ready to merge into the router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api_doc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = api_doc();
        assert_eq!(doc.info.title, "Sakila API");
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));

        for path in [
            "/api",
            "/health",
            "/ready",
            "/api/actors",
            "/api/actors/{id}",
            "/api/films",
            "/api/films/{id}",
            "/api/films/{id}/actors",
            "/api/films/{id}/actors/{actorId}",
            "/api/films/{id}/categories",
            "/api/films/{id}/categories/{categoryId}",
            "/api/categories",
            "/api/categories/{id}",
            "/api/languages",
            "/api/languages/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_document_has_envelope_schema() {
        let doc = api_doc();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("ErrorBody"));
        assert!(schemas.contains_key("ActorPage"));
        assert!(schemas.contains_key("Rating"));
    }
}
