//! `/api/languages`

use axum::{extract::State, Json};

use super::error::{ApiError, ApiOperation, ErrorBody};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::query::PageQuery;
use super::response::{ListResponse, PaginationMeta};
use crate::models::{Language, LanguageId, LanguageRequest};
use crate::repository::{OrderDirection, Repository};
use crate::responses::{Created, Message};
use crate::state::AppState;
use crate::store::Catalog;

#[utoipa::path(
    get,
    path = "/api/languages",
    tag = "languages",
    operation_id = "listLanguages",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, at most 100"),
    ),
    responses(
        (status = 200, description = "One page of languages", body = crate::openapi::LanguagePage),
        (status = 400, description = "Invalid pagination parameters", body = ErrorBody),
    )
)]
pub async fn list<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<Language>>, ApiError> {
    let request = query.resolve()?;
    let languages = state.catalog().languages();

    let total = languages.count().await?;
    let items = languages
        .find_all(OrderDirection::Ascending, request.pagination())
        .await?;

    Ok(Json(ListResponse::new(
        "languages",
        items,
        PaginationMeta::for_request(request, total),
    )))
}

#[utoipa::path(
    get,
    path = "/api/languages/{id}",
    tag = "languages",
    operation_id = "getLanguage",
    params(("id" = i32, Path, description = "Language id")),
    responses(
        (status = 200, description = "The language", body = Language),
        (status = 404, description = "Language not found", body = ErrorBody),
    )
)]
pub async fn get<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<LanguageId>,
) -> Result<Json<Language>, ApiError> {
    state
        .catalog()
        .languages()
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Language", id))
}

#[utoipa::path(
    post,
    path = "/api/languages",
    tag = "languages",
    operation_id = "createLanguage",
    request_body = LanguageRequest,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn create<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiJson(body): ApiJson<LanguageRequest>,
) -> Result<Created<Language>, ApiError> {
    let new_language = body.validate_new()?;
    let language = state.catalog().languages().create(new_language).await?;

    tracing::info!(language_id = %language.id, "Language created");
    let location = format!("/api/languages/{}", language.id);
    Ok(Created::new(language).with_location(location))
}

#[utoipa::path(
    put,
    path = "/api/languages/{id}",
    tag = "languages",
    operation_id = "updateLanguage",
    params(("id" = i32, Path, description = "Language id")),
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn update<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<LanguageId>,
    ApiJson(body): ApiJson<LanguageRequest>,
) -> Result<Json<Language>, ApiError> {
    let languages = state.catalog().languages();
    if !languages.exists(&id).await? {
        return Err(ApiError::not_found("Language", id).with_operation(ApiOperation::Update));
    }

    let changes = body.validate_changes()?;
    let language = languages.update(&id, changes).await?;
    Ok(Json(language))
}

/// Fails with 400 while a film still uses the language as its primary one
#[utoipa::path(
    delete,
    path = "/api/languages/{id}",
    tag = "languages",
    operation_id = "deleteLanguage",
    params(("id" = i32, Path, description = "Language id")),
    responses(
        (status = 200, description = "Language deleted", body = crate::responses::Message),
        (status = 400, description = "Language still used by a film", body = ErrorBody),
        (status = 404, description = "Language not found", body = ErrorBody),
    )
)]
pub async fn delete<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<LanguageId>,
) -> Result<Message, ApiError> {
    if !state.catalog().languages().delete(&id).await? {
        return Err(ApiError::not_found("Language", id).with_operation(ApiOperation::Delete));
    }

    tracing::info!(language_id = %id, "Language deleted");
    Ok(Message::new("Language deleted successfully"))
}
