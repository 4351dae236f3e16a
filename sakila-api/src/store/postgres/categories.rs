use sqlx::PgPool;

use super::{db_error, to_count};
use crate::models::{Category, CategoryChanges, CategoryId, NewCategory};
use crate::repository::{
    OrderDirection, Pagination, Repository, RepositoryError, RepositoryOperation,
    RepositoryResult,
};

const ENTITY: &str = "Category";
const COLUMNS: &str = "category_id AS id, name, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<CategoryId, Category, NewCategory, CategoryChanges> for PgCategoryRepository {
    async fn find_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM categories WHERE category_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::FindById, ENTITY))
    }

    async fn find_all(
        &self,
        order: OrderDirection,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {COLUMNS} FROM categories ORDER BY category_id {} LIMIT $1 OFFSET $2",
            order.as_sql()
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::FindAll, ENTITY))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error(RepositoryOperation::Count, ENTITY))
    }

    async fn exists(&self, id: &CategoryId) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE category_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Exists, ENTITY))
    }

    async fn create(&self, data: NewCategory) -> RepositoryResult<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}"
        ))
        .bind(data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Create, ENTITY))
    }

    async fn update(&self, id: &CategoryId, data: CategoryChanges) -> RepositoryResult<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                updated_at = NOW() \
             WHERE category_id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Update, ENTITY))?
        .ok_or_else(|| {
            RepositoryError::not_found(ENTITY, id.to_string())
                .with_operation(RepositoryOperation::Update)
        })
    }

    async fn delete(&self, id: &CategoryId) -> RepositoryResult<bool> {
        sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(db_error(RepositoryOperation::Delete, ENTITY))
    }
}
