//! PostgreSQL repositories built on a shared `PgPool`

mod actors;
mod categories;
mod films;
mod languages;
mod links;

use sqlx::PgPool;

pub use actors::PgActorRepository;
pub use categories::PgCategoryRepository;
pub use films::PgFilmRepository;
pub use languages::PgLanguageRepository;
pub use links::{PgFilmActorRepository, PgFilmCategoryRepository};

use super::Catalog;
use crate::error::DatabaseError;
use crate::repository::{RepositoryError, RepositoryOperation, RepositoryResult};

/// Catalog backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
    actors: PgActorRepository,
    films: PgFilmRepository,
    categories: PgCategoryRepository,
    languages: PgLanguageRepository,
    film_actors: PgFilmActorRepository,
    film_categories: PgFilmCategoryRepository,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            actors: PgActorRepository::new(pool.clone()),
            films: PgFilmRepository::new(pool.clone()),
            categories: PgCategoryRepository::new(pool.clone()),
            languages: PgLanguageRepository::new(pool.clone()),
            film_actors: PgFilmActorRepository::new(pool.clone()),
            film_categories: PgFilmCategoryRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Catalog for PgCatalog {
    type Actors = PgActorRepository;
    type Films = PgFilmRepository;
    type Categories = PgCategoryRepository;
    type Languages = PgLanguageRepository;
    type FilmActors = PgFilmActorRepository;
    type FilmCategories = PgFilmCategoryRepository;

    fn actors(&self) -> &Self::Actors {
        &self.actors
    }

    fn films(&self) -> &Self::Films {
        &self.films
    }

    fn categories(&self) -> &Self::Categories {
        &self.categories
    }

    fn languages(&self) -> &Self::Languages {
        &self.languages
    }

    fn film_actors(&self) -> &Self::FilmActors {
        &self.film_actors
    }

    fn film_categories(&self) -> &Self::FilmCategories {
        &self.film_categories
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(db_error(RepositoryOperation::FindById, "Database"))
    }
}

/// Request field guarded by a named constraint
fn constraint_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "film_actors_pkey" | "film_actors_actor_id_fkey" => Some("actorId"),
        "film_categories_pkey" | "film_categories_category_id_fkey" => Some("categoryId"),
        "film_actors_film_id_fkey" | "film_categories_film_id_fkey" => Some("filmId"),
        "films_language_id_fkey" => Some("languageId"),
        "films_original_language_id_fkey" => Some("originalLanguageId"),
        "films_release_year_check" => Some("releaseYear"),
        "films_rental_duration_check" => Some("rentalDuration"),
        "films_rental_rate_check" => Some("rentalRate"),
        "films_length_check" => Some("length"),
        "films_replacement_cost_check" => Some("replacementCost"),
        _ => None,
    }
}

/// Translate a driver error into a repository error for `entity`
pub(crate) fn db_error(
    operation: RepositoryOperation,
    entity: &'static str,
) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |err| {
        let db = DatabaseError::from(err);
        let field = db.constraint.as_deref().and_then(constraint_field);
        let mut error = RepositoryError::from(db)
            .with_operation(operation)
            .with_entity_type(entity);
        if let Some(field) = field {
            error = error.with_field(field);
        }
        error
    }
}

/// Convert a `COUNT(*)` result, which Postgres reports as `BIGINT`
fn to_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
