//! `/api/categories`

use axum::{extract::State, Json};

use super::error::{ApiError, ApiOperation, ErrorBody};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::query::PageQuery;
use super::response::{ListResponse, PaginationMeta};
use crate::models::{Category, CategoryId, CategoryRequest, CategoryWithFilms, Film};
use crate::repository::{OrderDirection, RelationLoader, Repository};
use crate::responses::{Created, Message};
use crate::state::AppState;
use crate::store::Catalog;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    operation_id = "listCategories",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, at most 100"),
    ),
    responses(
        (status = 200, description = "One page of categories", body = crate::openapi::CategoryPage),
        (status = 400, description = "Invalid pagination parameters", body = ErrorBody),
    )
)]
pub async fn list<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ListResponse<Category>>, ApiError> {
    let request = query.resolve()?;
    let categories = state.catalog().categories();

    let total = categories.count().await?;
    let items = categories
        .find_all(OrderDirection::Ascending, request.pagination())
        .await?;

    Ok(Json(ListResponse::new(
        "categories",
        items,
        PaginationMeta::for_request(request, total),
    )))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    operation_id = "getCategory",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = CategoryWithFilms),
        (status = 404, description = "Category not found", body = ErrorBody),
    )
)]
pub async fn get<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Json<CategoryWithFilms>, ApiError> {
    let category = state
        .catalog()
        .categories()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;

    let films =
        RelationLoader::<CategoryId, Film>::load_related(state.catalog().film_categories(), &id)
            .await?;

    Ok(Json(CategoryWithFilms { category, films }))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    operation_id = "createCategory",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn create<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiJson(body): ApiJson<CategoryRequest>,
) -> Result<Created<Category>, ApiError> {
    let new_category = body.validate_new()?;
    let category = state.catalog().categories().create(new_category).await?;

    tracing::info!(category_id = %category.id, "Category created");
    let location = format!("/api/categories/{}", category.id);
    Ok(Created::new(category).with_location(location))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    operation_id = "updateCategory",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
    )
)]
pub async fn update<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(body): ApiJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let categories = state.catalog().categories();
    if !categories.exists(&id).await? {
        return Err(ApiError::not_found("Category", id).with_operation(ApiOperation::Update));
    }

    let changes = body.validate_changes()?;
    let category = categories.update(&id, changes).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    operation_id = "deleteCategory",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = crate::responses::Message),
        (status = 404, description = "Category not found", body = ErrorBody),
    )
)]
pub async fn delete<C: Catalog>(
    State(state): State<AppState<C>>,
    ApiPath(id): ApiPath<CategoryId>,
) -> Result<Message, ApiError> {
    if !state.catalog().categories().delete(&id).await? {
        return Err(ApiError::not_found("Category", id).with_operation(ApiOperation::Delete));
    }

    tracing::info!(category_id = %id, "Category deleted");
    Ok(Message::new("Category deleted successfully"))
}
