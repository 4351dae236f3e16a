//! Storage backends for the catalog
//!
//! Handlers are generic over [`Catalog`], the bundle of repositories for
//! every table. [`PgCatalog`] backs the running service; an in-memory
//! catalog with the same integrity rules backs the router tests.

use std::future::Future;

use crate::models::{
    Actor, ActorChanges, ActorId, Category, CategoryChanges, CategoryId, Film, FilmActor,
    FilmCategory, FilmChanges, FilmId, Language, LanguageChanges, LanguageId, NewActor,
    NewCategory, NewFilm, NewLanguage,
};
use crate::repository::{LinkRepository, RelationLoader, Repository, RepositoryResult};

#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;

pub use postgres::PgCatalog;

/// Every repository the HTTP layer needs
pub trait Catalog: Clone + Send + Sync + 'static {
    type Actors: Repository<ActorId, Actor, NewActor, ActorChanges>;
    type Films: Repository<FilmId, Film, NewFilm, FilmChanges>;
    type Categories: Repository<CategoryId, Category, NewCategory, CategoryChanges>;
    type Languages: Repository<LanguageId, Language, NewLanguage, LanguageChanges>;
    type FilmActors: LinkRepository<FilmId, ActorId, FilmActor>
        + RelationLoader<FilmId, Actor>
        + RelationLoader<ActorId, Film>;
    type FilmCategories: LinkRepository<FilmId, CategoryId, FilmCategory>
        + RelationLoader<FilmId, Category>
        + RelationLoader<CategoryId, Film>;

    fn actors(&self) -> &Self::Actors;
    fn films(&self) -> &Self::Films;
    fn categories(&self) -> &Self::Categories;
    fn languages(&self) -> &Self::Languages;
    fn film_actors(&self) -> &Self::FilmActors;
    fn film_categories(&self) -> &Self::FilmCategories;

    /// Round-trip to the backing store, used by the readiness check
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
