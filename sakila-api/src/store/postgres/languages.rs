use sqlx::PgPool;

use super::{db_error, to_count};
use crate::models::{Language, LanguageChanges, LanguageId, NewLanguage};
use crate::repository::{
    OrderDirection, Pagination, Repository, RepositoryError, RepositoryOperation,
    RepositoryResult,
};

const ENTITY: &str = "Language";
const COLUMNS: &str = "language_id AS id, name, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgLanguageRepository {
    pool: PgPool,
}

impl PgLanguageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<LanguageId, Language, NewLanguage, LanguageChanges> for PgLanguageRepository {
    async fn find_by_id(&self, id: &LanguageId) -> RepositoryResult<Option<Language>> {
        sqlx::query_as::<_, Language>(&format!(
            "SELECT {COLUMNS} FROM languages WHERE language_id = $1"
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
    ) -> RepositoryResult<Vec<Language>> {
        sqlx::query_as::<_, Language>(&format!(
            "SELECT {COLUMNS} FROM languages ORDER BY language_id {} LIMIT $1 OFFSET $2",
            order.as_sql()
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::FindAll, ENTITY))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM languages")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error(RepositoryOperation::Count, ENTITY))
    }

    async fn exists(&self, id: &LanguageId) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM languages WHERE language_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Exists, ENTITY))
    }

    async fn create(&self, data: NewLanguage) -> RepositoryResult<Language> {
        sqlx::query_as::<_, Language>(&format!(
            "INSERT INTO languages (name) VALUES ($1) RETURNING {COLUMNS}"
        ))
        .bind(data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Create, ENTITY))
    }

    async fn update(&self, id: &LanguageId, data: LanguageChanges) -> RepositoryResult<Language> {
        sqlx::query_as::<_, Language>(&format!(
            "UPDATE languages SET \
                name = COALESCE($2, name), \
                updated_at = NOW() \
             WHERE language_id = $1 RETURNING {COLUMNS}"
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

    async fn delete(&self, id: &LanguageId) -> RepositoryResult<bool> {
        sqlx::query("DELETE FROM languages WHERE language_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(db_error(RepositoryOperation::Delete, ENTITY))
    }
}
