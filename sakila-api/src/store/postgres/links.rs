use sqlx::PgPool;

use super::db_error;
use super::films::FILM_COLUMNS;
use crate::models::{Actor, ActorId, Category, CategoryId, Film, FilmActor, FilmCategory, FilmId};
use crate::repository::{LinkRepository, RelationLoader, RepositoryOperation, RepositoryResult};

/// The `film_actors` join table
#[derive(Debug, Clone)]
pub struct PgFilmActorRepository {
    pool: PgPool,
}

impl PgFilmActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LinkRepository<FilmId, ActorId, FilmActor> for PgFilmActorRepository {
    async fn link(&self, film: &FilmId, actor: &ActorId) -> RepositoryResult<FilmActor> {
        sqlx::query_as::<_, FilmActor>(
            "INSERT INTO film_actors (film_id, actor_id) VALUES ($1, $2) \
             RETURNING film_id, actor_id, created_at, updated_at",
        )
        .bind(film)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Link, "FilmActor"))
    }

    async fn unlink(&self, film: &FilmId, actor: &ActorId) -> RepositoryResult<bool> {
        sqlx::query("DELETE FROM film_actors WHERE film_id = $1 AND actor_id = $2")
            .bind(film)
            .bind(actor)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(db_error(RepositoryOperation::Unlink, "FilmActor"))
    }
}

impl RelationLoader<FilmId, Actor> for PgFilmActorRepository {
    async fn load_related(&self, film: &FilmId) -> RepositoryResult<Vec<Actor>> {
        sqlx::query_as::<_, Actor>(
            "SELECT a.actor_id AS id, a.first_name, a.last_name, a.created_at, a.updated_at \
             FROM actors a JOIN film_actors fa ON fa.actor_id = a.actor_id \
             WHERE fa.film_id = $1 ORDER BY a.actor_id",
        )
        .bind(film)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::LoadRelated, "Actor"))
    }
}

impl RelationLoader<ActorId, Film> for PgFilmActorRepository {
    async fn load_related(&self, actor: &ActorId) -> RepositoryResult<Vec<Film>> {
        sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films f JOIN film_actors fa ON fa.film_id = f.film_id \
             WHERE fa.actor_id = $1 ORDER BY f.film_id"
        ))
        .bind(actor)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::LoadRelated, "Film"))
    }
}

/// The `film_categories` join table
#[derive(Debug, Clone)]
pub struct PgFilmCategoryRepository {
    pool: PgPool,
}

impl PgFilmCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LinkRepository<FilmId, CategoryId, FilmCategory> for PgFilmCategoryRepository {
    async fn link(&self, film: &FilmId, category: &CategoryId) -> RepositoryResult<FilmCategory> {
        sqlx::query_as::<_, FilmCategory>(
            "INSERT INTO film_categories (film_id, category_id) VALUES ($1, $2) \
             RETURNING film_id, category_id, created_at, updated_at",
        )
        .bind(film)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::Link, "FilmCategory"))
    }

    async fn unlink(&self, film: &FilmId, category: &CategoryId) -> RepositoryResult<bool> {
        sqlx::query("DELETE FROM film_categories WHERE film_id = $1 AND category_id = $2")
            .bind(film)
            .bind(category)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(db_error(RepositoryOperation::Unlink, "FilmCategory"))
    }
}

impl RelationLoader<FilmId, Category> for PgFilmCategoryRepository {
    async fn load_related(&self, film: &FilmId) -> RepositoryResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT c.category_id AS id, c.name, c.created_at, c.updated_at \
             FROM categories c JOIN film_categories fc ON fc.category_id = c.category_id \
             WHERE fc.film_id = $1 ORDER BY c.category_id",
        )
        .bind(film)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::LoadRelated, "Category"))
    }
}

impl RelationLoader<CategoryId, Film> for PgFilmCategoryRepository {
    async fn load_related(&self, category: &CategoryId) -> RepositoryResult<Vec<Film>> {
        sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films f \
             JOIN film_categories fc ON fc.film_id = f.film_id \
             WHERE fc.category_id = $1 ORDER BY f.film_id"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error(RepositoryOperation::LoadRelated, "Film"))
    }
}
