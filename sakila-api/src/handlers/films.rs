//! `/api/films`

use axum::{extract::State, Json};

use super::error::{ApiError, ApiOperation, ErrorBody};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::query::PageQuery;
use super::response::{ListResponse, PaginationMeta};
use crate::models::{
    Actor, Category, CreateFilmRequest, Film, FilmDetails, FilmId, UpdateFilmRequest,
};
use crate::repository::{OrderDirection, RelationLoader, Repository};
use crate::responses::{Created, Message};
use crate::state::AppState;
use crate::store::Catalog;

#[utoipa::path(
    get,
    path = "/api/films",
    tag = "films",
    operation_id = "listFilms",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, at most 100"),
    ),
    responses(
        (status = 200, description = "One page of films", body = crate::openapi::FilmPage),
        (status = 400, description = "Invalid pagination parameters", body = ErrorBody),
    )
)]
pub async fn list<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<Film>>, ApiError> {
    let request = query.resolve()?;
    let films = state.catalog().films();

    let total = films.count().await?;
    let items = films
        .find_all(OrderDirection::Ascending, request.pagination())
        .await?;

    Ok(Json(ListResponse::new(
        "films",
        items,
        PaginationMeta::for_request(request, total),
    )))
}

/// The film with its languages, cast and categories
#[utoipa::path(
    get,
    path = "/api/films/{id}",
    tag = "films",
    operation_id = "getFilm",
    params(("id" = i32, Path, description = "Film id")),
    responses(
        (status = 200, description = "The film", body = FilmDetails),
        (status = 404, description = "Film not found", body = ErrorBody),
    )
)]
pub async fn get<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<FilmId>,
) -> Result<Json<FilmDetails>, ApiError> {
    let catalog = state.catalog();
    let film = catalog
        .films()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Film", id))?;

    let language = catalog.languages().find_by_id(&film.language_id).await?;
    let original_language = match film.original_language_id {
        Some(ref language_id) => catalog.languages().find_by_id(language_id).await?,
        None => None,
    };
    let actors = RelationLoader::<FilmId, Actor>::load_related(catalog.film_actors(), &id).await?;
    let categories =
        RelationLoader::<FilmId, Category>::load_related(catalog.film_categories(), &id).await?;

    Ok(Json(FilmDetails {
        film,
        language,
        original_language,
        actors,
        categories,
    }))
}

#[utoipa::path(
    post,
    path = "/api/films",
    tag = "films",
    operation_id = "createFilm",
    request_body = CreateFilmRequest,
    responses(
        (status = 201, description = "Film created", body = Film),
        (status = 400, description = "Missing fields or unknown language", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn create<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiJson(body): ApiJson<CreateFilmRequest>,
) -> Result<Created<Film>, ApiError> {
    let new_film = body.validate()?;
    let film = state.catalog().films().create(new_film).await?;

    tracing::info!(film_id = %film.id, language_id = %film.language_id, "Film created");
    let location = format!("/api/films/{}", film.id);
    Ok(Created::new(film).with_location(location))
}

#[utoipa::path(
    put,
    path = "/api/films/{id}",
    tag = "films",
    operation_id = "updateFilm",
    params(("id" = i32, Path, description = "Film id")),
    request_body = UpdateFilmRequest,
    responses(
        (status = 200, description = "Film updated", body = Film),
        (status = 404, description = "Film not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn update<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<FilmId>,
    ApiJson(body): ApiJson<UpdateFilmRequest>,
) -> Result<Json<Film>, ApiError> {
    let films = state.catalog().films();
    if !films.exists(&id).await? {
        return Err(ApiError::not_found("Film", id).with_operation(ApiOperation::Update));
    }

    let changes = body.validate()?;
    let film = films.update(&id, changes).await?;
    Ok(Json(film))
}

/// Cast and category links are removed with the film
#[utoipa::path(
    delete,
    path = "/api/films/{id}",
    tag = "films",
    operation_id = "deleteFilm",
    params(("id" = i32, Path, description = "Film id")),
    responses(
        (status = 200, description = "Film deleted", body = crate::responses::Message),
        (status = 404, description = "Film not found", body = ErrorBody),
    )
)]
pub async fn delete<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<FilmId>,
) -> Result<Message, ApiError> {
    if !state.catalog().films().delete(&id).await? {
        return Err(ApiError::not_found("Film", id).with_operation(ApiOperation::Delete));
    }

    tracing::info!(film_id = %id, "Film deleted");
    Ok(Message::new("Film deleted successfully"))
}
