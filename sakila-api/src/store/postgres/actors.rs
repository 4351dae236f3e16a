use sqlx::PgPool;

use super::{db_error, to_count};
use crate::models::{Actor, ActorChanges, ActorId, NewActor};
use crate::repository::{
    OrderDirection, Pagination, Repository, RepositoryError, RepositoryOperation,
    RepositoryResult,
};

const ENTITY: &str = "Actor";
const COLUMNS: &str = "actor_id AS id, first_name, last_name, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgActorRepository {
    pool: PgPool,
}

impl PgActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<ActorId, Actor, NewActor, ActorChanges> for PgActorRepository {
    async fn find_by_id(&self, id: &ActorId) -> RepositoryResult<Option<Actor>> {
        sqlx::query_as::<_, Actor>(&format!(
            "SELECT {COLUMNS} FROM actors WHERE actor_id = $1"
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
    ) -> RepositoryResult<Vec<Actor>> {
        sqlx::query_as::<_, Actor>(&format!(
            "SELECT {COLUMNS} FROM actors ORDER BY actor_id {} LIMIT $1 OFFSET $2",
            order.as_sql()
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::FindAll, ENTITY))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error(RepositoryOperation::Count, ENTITY))
    }

    async fn exists(&self, id: &ActorId) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM actors WHERE actor_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Exists, ENTITY))
    }

    async fn create(&self, data: NewActor) -> RepositoryResult<Actor> {
        sqlx::query_as::<_, Actor>(&format!(
            "INSERT INTO actors (first_name, last_name) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(data.first_name)
        .bind(data.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Create, ENTITY))
    }

    async fn update(&self, id: &ActorId, data: ActorChanges) -> RepositoryResult<Actor> {
        sqlx::query_as::<_, Actor>(&format!(
            "UPDATE actors SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                updated_at = NOW() \
             WHERE actor_id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(data.first_name)
        .bind(data.last_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Update, ENTITY))?
        .ok_or_else(|| {
            RepositoryError::not_found(ENTITY, id.to_string())
                .with_operation(RepositoryOperation::Update)
        })
    }

    async fn delete(&self, id: &ActorId) -> RepositoryResult<bool> {
        sqlx::query("DELETE FROM actors WHERE actor_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(db_error(RepositoryOperation::Delete, ENTITY))
    }
}
