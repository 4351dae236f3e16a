//! `/api/films/{id}/actors` and `/api/films/{id}/categories`
//!
//! The parent film must exist (404 otherwise). Linking an unknown actor or
//! category fails on the foreign key and linking a pair twice fails on the
//! primary key; both surface through the repository error mapping.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::error::{ApiError, ApiOperation, ErrorBody};
use super::extract::{ApiJson, ApiPath};
use crate::models::{
    Actor, ActorId, AddActorRequest, AddCategoryRequest, Category, CategoryId, FilmActor,
    FilmCategory, FilmId,
};
use crate::repository::{LinkRepository, RelationLoader, Repository};
use crate::responses::{Created, Message};
use crate::state::AppState;
use crate::store::Catalog;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmCast {
    pub film_id: FilmId,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmGenres {
    pub film_id: FilmId,
    pub categories: Vec<Category>,
}

async fn require_film<C: Catalog>(
    catalog: &C,
    id: FilmId,
    operation: ApiOperation,
) -> Result<(), ApiError> {
    if catalog.films().exists(&id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("Film", id).with_operation(operation))
    }
}

#[utoipa::path(
    get,
    path = "/api/films/{id}/actors",
    tag = "films",
    operation_id = "listFilmActors",
    params(("id" = i32, Path, description = "Film id")),
    responses(
        (status = 200, description = "The film's cast", body = FilmCast),
        (status = 404, description = "Film not found", body = ErrorBody),
    )
)]
pub async fn list_actors<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(film_id): ApiPath<FilmId>,
) -> Result<Json<FilmCast>, ApiError> {
    let catalog = state.catalog();
    require_film(catalog, film_id, ApiOperation::List).await?;

    let actors =
        RelationLoader::<FilmId, Actor>::load_related(catalog.film_actors(), &film_id).await?;
    Ok(Json(FilmCast { film_id, actors }))
}

#[utoipa::path(
    post,
    path = "/api/films/{id}/actors",
    tag = "films",
    operation_id = "addFilmActor",
    params(("id" = i32, Path, description = "Film id")),
    request_body = AddActorRequest,
    responses(
        (status = 201, description = "Actor added to film", body = FilmActor),
        (status = 400, description = "Missing or unknown actorId", body = ErrorBody),
        (status = 404, description = "Film not found", body = ErrorBody),
        (status = 409, description = "Actor already in film", body = ErrorBody),
    )
)]
pub async fn add_actor<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(film_id): ApiPath<FilmId>,
    ApiJson(body): ApiJson<AddActorRequest>,
) -> Result<Created<FilmActor>, ApiError> {
    let catalog = state.catalog();
    require_film(catalog, film_id, ApiOperation::Link).await?;

    let actor_id = body.validate()?;
    let link = catalog.film_actors().link(&film_id, &actor_id).await?;

    tracing::info!(film_id = %film_id, actor_id = %actor_id, "Actor added to film");
    let location = format!("/api/films/{}/actors/{}", film_id, actor_id);
    Ok(Created::new(link).with_location(location))
}

#[utoipa::path(
    delete,
    path = "/api/films/{id}/actors/{actorId}",
    tag = "films",
    operation_id = "removeFilmActor",
    params(
        ("id" = i32, Path, description = "Film id"),
        ("actorId" = i32, Path, description = "Actor id"),
    ),
    responses(
        (status = 200, description = "Actor removed from film", body = Message),
        (status = 404, description = "Film or link not found", body = ErrorBody),
    )
)]
pub async fn remove_actor<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath((film_id, actor_id)): ApiPath<(FilmId, ActorId)>,
) -> Result<Message, ApiError> {
    let catalog = state.catalog();
    require_film(catalog, film_id, ApiOperation::Unlink).await?;

    if !catalog.film_actors().unlink(&film_id, &actor_id).await? {
        return Err(
            ApiError::not_found("Film actor link", format!("{}/{}", film_id, actor_id))
                .with_operation(ApiOperation::Unlink),
        );
    }

    tracing::info!(film_id = %film_id, actor_id = %actor_id, "Actor removed from film");
    Ok(Message::new("Actor removed from film"))
}

#[utoipa::path(
    get,
    path = "/api/films/{id}/categories",
    tag = "films",
    operation_id = "listFilmCategories",
    params(("id" = i32, Path, description = "Film id")),
    responses(
        (status = 200, description = "The film's categories", body = FilmGenres),
        (status = 404, description = "Film not found", body = ErrorBody),
    )
)]
pub async fn list_categories<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(film_id): ApiPath<FilmId>,
) -> Result<Json<FilmGenres>, ApiError> {
    let catalog = state.catalog();
    require_film(catalog, film_id, ApiOperation::List).await?;

    let categories =
        RelationLoader::<FilmId, Category>::load_related(catalog.film_categories(), &film_id)
            .await?;
    Ok(Json(FilmGenres {
        film_id,
        categories,
    }))
}

#[utoipa::path(
    post,
    path = "/api/films/{id}/categories",
    tag = "films",
    operation_id = "addFilmCategory",
    params(("id" = i32, Path, description = "Film id")),
    request_body = AddCategoryRequest,
    responses(
        (status = 201, description = "Category added to film", body = FilmCategory),
        (status = 400, description = "Missing or unknown categoryId", body = ErrorBody),
        (status = 404, description = "Film not found", body = ErrorBody),
        (status = 409, description = "Category already on film", body = ErrorBody),
    )
)]
pub async fn add_category<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(film_id): ApiPath<FilmId>,
    ApiJson(body): ApiJson<AddCategoryRequest>,
) -> Result<Created<FilmCategory>, ApiError> {
    let catalog = state.catalog();
    require_film(catalog, film_id, ApiOperation::Link).await?;

    let category_id = body.validate()?;
    let link = catalog
        .film_categories()
        .link(&film_id, &category_id)
        .await?;

    tracing::info!(film_id = %film_id, category_id = %category_id, "Category added to film");
    let location = format!("/api/films/{}/categories/{}", film_id, category_id);
    Ok(Created::new(link).with_location(location))
}

#[utoipa::path(
    delete,
    path = "/api/films/{id}/categories/{categoryId}",
    tag = "films",
    operation_id = "removeFilmCategory",
    params(
        ("id" = i32, Path, description = "Film id"),
        ("categoryId" = i32, Path, description = "Category id"),
    ),
    responses(
        (status = 200, description = "Category removed from film", body = Message),
        (status = 404, description = "Film or link not found", body = ErrorBody),
    )
)]
pub async fn remove_category<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath((film_id, category_id)): ApiPath<(FilmId, CategoryId)>,
) -> Result<Message, ApiError> {
    let catalog = state.catalog();
    require_film(catalog, film_id, ApiOperation::Unlink).await?;

    if !catalog
        .film_categories()
        .unlink(&film_id, &category_id)
        .await?
    {
        return Err(ApiError::not_found(
            "Film category link",
            format!("{}/{}", film_id, category_id),
        )
        .with_operation(ApiOperation::Unlink));
    }

    tracing::info!(film_id = %film_id, category_id = %category_id, "Category removed from film");
    Ok(Message::new("Category removed from film"))
}
