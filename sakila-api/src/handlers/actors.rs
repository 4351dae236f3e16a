//! `/api/actors`

use axum::{extract::State, Json};

use super::error::{ApiError, ApiOperation, ErrorBody};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::query::PageQuery;
use super::response::{ListResponse, PaginationMeta};
use crate::models::{Actor, ActorId, ActorWithFilms, CreateActorRequest, Film, UpdateActorRequest};
use crate::repository::{OrderDirection, RelationLoader, Repository};
use crate::responses::{Created, Message};
use crate::state::AppState;
use crate::store::Catalog;

#[utoipa::path(
    get,
    path = "/api/actors",
    tag = "actors",
    operation_id = "listActors",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, at most 100"),
    ),
    responses(
        (status = 200, description = "One page of actors", body = crate::openapi::ActorPage),
        (status = 400, description = "Invalid pagination parameters", body = ErrorBody),
    )
)]
pub async fn list<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<Actor>>, ApiError> {
    let request = query.resolve()?;
    let actors = state.catalog().actors();

    let total = actors.count().await?;
    let items = actors
        .find_all(OrderDirection::Ascending, request.pagination())
        .await?;

    Ok(Json(ListResponse::new(
        "actors",
        items,
        PaginationMeta::for_request(request, total),
    )))
}

/// The actor and every film they appear in
#[utoipa::path(
    get,
    path = "/api/actors/{id}",
    tag = "actors",
    operation_id = "getActor",
    params(("id" = i32, Path, description = "Actor id")),
    responses(
        (status = 200, description = "The actor", body = ActorWithFilms),
        (status = 404, description = "Actor not found", body = ErrorBody),
    )
)]
pub async fn get<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<ActorId>,
) -> Result<Json<ActorWithFilms>, ApiError> {
    let actor = state
        .catalog()
        .actors()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Actor", id))?;

    let films =
        RelationLoader::<ActorId, Film>::load_related(state.catalog().film_actors(), &id).await?;

    Ok(Json(ActorWithFilms { actor, films }))
}

#[utoipa::path(
    post,
    path = "/api/actors",
    tag = "actors",
    operation_id = "createActor",
    request_body = CreateActorRequest,
    responses(
        (status = 201, description = "Actor created", body = Actor),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn create<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiJson(body): ApiJson<CreateActorRequest>,
) -> Result<Created<Actor>, ApiError> {
    let new_actor = body.validate()?;
    let actor = state.catalog().actors().create(new_actor).await?;

    tracing::info!(actor_id = %actor.id, "Actor created");
    let location = format!("/api/actors/{}", actor.id);
    Ok(Created::new(actor).with_location(location))
}

#[utoipa::path(
    put,
    path = "/api/actors/{id}",
    tag = "actors",
    operation_id = "updateActor",
    params(("id" = i32, Path, description = "Actor id")),
    request_body = UpdateActorRequest,
    responses(
        (status = 200, description = "Actor updated", body = Actor),
        (status = 404, description = "Actor not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn update<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<ActorId>,
    ApiJson(body): ApiJson<UpdateActorRequest>,
) -> Result<Json<Actor>, ApiError> {
    let actors = state.catalog().actors();
    if !actors.exists(&id).await? {
        return Err(ApiError::not_found("Actor", id).with_operation(ApiOperation::Update));
    }

    let changes = body.validate()?;
    let actor = actors.update(&id, changes).await?;
    Ok(Json(actor))
}

#[utoipa::path(
    delete,
    path = "/api/actors/{id}",
    tag = "actors",
    operation_id = "deleteActor",
    params(("id" = i32, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor deleted", body = crate::responses::Message),
        (status = 404, description = "Actor not found", body = ErrorBody),
    )
)]
pub async fn delete<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<ActorId>,
) -> Result<Message, ApiError> {
    if !state.catalog().actors().delete(&id).await? {
        return Err(ApiError::not_found("Actor", id).with_operation(ApiOperation::Delete));
    }

    tracing::info!(actor_id = %id, "Actor deleted");
    Ok(Message::new("Actor deleted successfully"))
}
