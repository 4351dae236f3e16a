use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{db_error, to_count};
use crate::models::{Film, FilmChanges, FilmId, NewFilm};
use crate::repository::{
    OrderDirection, Pagination, Repository, RepositoryError, RepositoryOperation,
    RepositoryResult,
};

const ENTITY: &str = "Film";

/// Film columns, qualified with the `f` alias so they can be reused in joins
pub(super) const FILM_COLUMNS: &str = "f.film_id AS id, f.title, f.description, f.release_year, \
     f.language_id, f.original_language_id, f.rental_duration, f.rental_rate, f.length, \
     f.replacement_cost, f.rating, f.special_features, f.created_at, f.updated_at";

#[derive(Debug, Clone)]
pub struct PgFilmRepository {
    pool: PgPool,
}

impl PgFilmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the `UPDATE` for the columns present in `changes`
fn update_query(id: FilmId, changes: FilmChanges) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("UPDATE films AS f SET updated_at = NOW()");

    if let Some(title) = changes.title {
        query.push(", title = ").push_bind(title);
    }
    if let Some(description) = changes.description {
        query.push(", description = ").push_bind(description);
    }
    if let Some(release_year) = changes.release_year {
        query.push(", release_year = ").push_bind(release_year);
    }
    if let Some(language_id) = changes.language_id {
        query.push(", language_id = ").push_bind(language_id);
    }
    if let Some(original_language_id) = changes.original_language_id {
        query
            .push(", original_language_id = ")
            .push_bind(original_language_id);
    }
    if let Some(rental_duration) = changes.rental_duration {
        query.push(", rental_duration = ").push_bind(rental_duration);
    }
    if let Some(rental_rate) = changes.rental_rate {
        query.push(", rental_rate = ").push_bind(rental_rate);
    }
    if let Some(length) = changes.length {
        query.push(", length = ").push_bind(length);
    }
    if let Some(replacement_cost) = changes.replacement_cost {
        query.push(", replacement_cost = ").push_bind(replacement_cost);
    }
    if let Some(rating) = changes.rating {
        query.push(", rating = ").push_bind(rating);
    }
    if let Some(special_features) = changes.special_features {
        query.push(", special_features = ").push_bind(special_features);
    }

    query
        .push(" WHERE f.film_id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(FILM_COLUMNS);
    query
}

impl Repository<FilmId, Film, NewFilm, FilmChanges> for PgFilmRepository {
    async fn find_by_id(&self, id: &FilmId) -> RepositoryResult<Option<Film>> {
        sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films f WHERE f.film_id = $1"
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
    ) -> RepositoryResult<Vec<Film>> {
        sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films f ORDER BY f.film_id {} LIMIT $1 OFFSET $2",
            order.as_sql()
        ))
        .bind(pagination.limit_i64())
        .bind(pagination.offset_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::FindAll, ENTITY))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM films")
            .fetch_one(&self.pool)
            .await
            .map(to_count)
            .map_err(db_error(RepositoryOperation::Count, ENTITY))
    }

    async fn exists(&self, id: &FilmId) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM films WHERE film_id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Exists, ENTITY))
    }

    async fn create(&self, data: NewFilm) -> RepositoryResult<Film> {
        sqlx::query_as::<_, Film>(&format!(
            "INSERT INTO films AS f (title, description, release_year, language_id, \
                original_language_id, rental_duration, rental_rate, length, replacement_cost, \
                rating, special_features) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {FILM_COLUMNS}"
        ))
        .bind(data.title)
        .bind(data.description)
        .bind(data.release_year)
        .bind(data.language_id)
        .bind(data.original_language_id)
        .bind(data.rental_duration)
        .bind(data.rental_rate)
        .bind(data.length)
        .bind(data.replacement_cost)
        .bind(data.rating)
        .bind(data.special_features)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Create, ENTITY))
    }

    async fn update(&self, id: &FilmId, data: FilmChanges) -> RepositoryResult<Film> {
        let mut query = update_query(*id, data);
        query
            .build_query_as::<Film>()
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error(RepositoryOperation::Update, ENTITY))?
            .ok_or_else(|| {
                RepositoryError::not_found(ENTITY, id.to_string())
                    .with_operation(RepositoryOperation::Update)
            })
    }

    async fn delete(&self, id: &FilmId) -> RepositoryResult<bool> {
        sqlx::query("DELETE FROM films WHERE film_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(db_error(RepositoryOperation::Delete, ENTITY))
    }
}
