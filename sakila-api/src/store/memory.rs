//! In-memory catalog for router tests
//!
//! Mirrors the integrity rules of the schema: foreign keys on films and
//! join tables, unique join pairs, cascading join-row deletes and
//! `SET NULL` / `NO ACTION` on language deletes.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::Catalog;
use crate::models::{
    Actor, ActorChanges, ActorId, Category, CategoryChanges, CategoryId, Film, FilmActor,
    FilmCategory, FilmChanges, FilmId, Language, LanguageChanges, LanguageId, NewActor,
    NewCategory, NewFilm, NewLanguage, DEFAULT_LANGUAGES,
};
use crate::repository::{
    LinkRepository, OrderDirection, Pagination, RelationLoader, Repository, RepositoryError,
    RepositoryOperation, RepositoryResult,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    actors: BTreeMap<ActorId, Actor>,
    films: BTreeMap<FilmId, Film>,
    categories: BTreeMap<CategoryId, Category>,
    languages: BTreeMap<LanguageId, Language>,
    film_actors: BTreeMap<(FilmId, ActorId), FilmActor>,
    film_categories: BTreeMap<(FilmId, CategoryId), FilmCategory>,
    offline: bool,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<Tables>>;

fn lock(tables: &Shared) -> RepositoryResult<MutexGuard<'_, Tables>> {
    let guard = tables
        .lock()
        .map_err(|_| RepositoryError::database_error(RepositoryOperation::FindAll, "poisoned"))?;
    if guard.offline {
        return Err(RepositoryError::connection_failed("connection refused"));
    }
    Ok(guard)
}

fn page<T>(
    rows: impl DoubleEndedIterator<Item = T>,
    order: OrderDirection,
    pagination: Pagination,
) -> Vec<T> {
    match order {
        OrderDirection::Ascending => pagination.apply(rows).collect(),
        OrderDirection::Descending => pagination.apply(rows.rev()).collect(),
    }
}

fn fk_violation(operation: RepositoryOperation, entity: &str, field: &str) -> RepositoryError {
    RepositoryError::foreign_key_violation(
        operation,
        format!("{} references a missing row", field),
    )
    .with_entity_type(entity)
    .with_field(field)
}

fn check_film_languages(
    tables: &Tables,
    operation: RepositoryOperation,
    language_id: LanguageId,
    original_language_id: Option<LanguageId>,
) -> RepositoryResult<()> {
    if !tables.languages.contains_key(&language_id) {
        return Err(fk_violation(operation, "Film", "languageId"));
    }
    if let Some(original) = original_language_id {
        if !tables.languages.contains_key(&original) {
            return Err(fk_violation(operation, "Film", "originalLanguageId"));
        }
    }
    Ok(())
}

/// Catalog whose tables live in process memory
#[derive(Debug, Clone)]
pub(crate) struct MemoryCatalog {
    actors: MemoryActors,
    films: MemoryFilms,
    categories: MemoryCategories,
    languages: MemoryLanguages,
    film_actors: MemoryFilmActors,
    film_categories: MemoryFilmCategories,
    tables: Shared,
}

impl MemoryCatalog {
    pub(crate) fn new() -> Self {
        let tables = Shared::default();
        Self {
            actors: MemoryActors(tables.clone()),
            films: MemoryFilms(tables.clone()),
            categories: MemoryCategories(tables.clone()),
            languages: MemoryLanguages(tables.clone()),
            film_actors: MemoryFilmActors(tables.clone()),
            film_categories: MemoryFilmCategories(tables.clone()),
            tables,
        }
    }

    /// Catalog pre-populated with the default languages
    pub(crate) fn seeded() -> Self {
        let catalog = Self::new();
        if let Ok(mut tables) = catalog.tables.lock() {
            for name in DEFAULT_LANGUAGES {
                let id = LanguageId(tables.next_id());
                let now = Utc::now();
                tables.languages.insert(
                    id,
                    Language {
                        id,
                        name: name.to_string(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        catalog
    }

    /// Make every subsequent call fail as if the database were unreachable
    pub(crate) fn go_offline(&self) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.offline = true;
        }
    }
}

impl Catalog for MemoryCatalog {
    type Actors = MemoryActors;
    type Films = MemoryFilms;
    type Categories = MemoryCategories;
    type Languages = MemoryLanguages;
    type FilmActors = MemoryFilmActors;
    type FilmCategories = MemoryFilmCategories;

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
        lock(&self.tables).map(|_| ())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryActors(Shared);

impl Repository<ActorId, Actor, NewActor, ActorChanges> for MemoryActors {
    async fn find_by_id(&self, id: &ActorId) -> RepositoryResult<Option<Actor>> {
        Ok(lock(&self.0)?.actors.get(id).cloned())
    }

    async fn find_all(
        &self,
        order: OrderDirection,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Actor>> {
        Ok(page(lock(&self.0)?.actors.values().cloned(), order, pagination))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(lock(&self.0)?.actors.len() as u64)
    }

    async fn exists(&self, id: &ActorId) -> RepositoryResult<bool> {
        Ok(lock(&self.0)?.actors.contains_key(id))
    }

    async fn create(&self, data: NewActor) -> RepositoryResult<Actor> {
        let mut tables = lock(&self.0)?;
        let id = ActorId(tables.next_id());
        let now = Utc::now();
        let actor = Actor {
            id,
            first_name: data.first_name,
            last_name: data.last_name,
            created_at: now,
            updated_at: now,
        };
        tables.actors.insert(id, actor.clone());
        Ok(actor)
    }

    async fn update(&self, id: &ActorId, data: ActorChanges) -> RepositoryResult<Actor> {
        let mut tables = lock(&self.0)?;
        let actor = tables.actors.get_mut(id).ok_or_else(|| {
            RepositoryError::not_found("Actor", id.to_string())
                .with_operation(RepositoryOperation::Update)
        })?;
        if let Some(first_name) = data.first_name {
            actor.first_name = first_name;
        }
        if let Some(last_name) = data.last_name {
            actor.last_name = last_name;
        }
        actor.updated_at = Utc::now();
        Ok(actor.clone())
    }

    async fn delete(&self, id: &ActorId) -> RepositoryResult<bool> {
        let mut tables = lock(&self.0)?;
        let removed = tables.actors.remove(id).is_some();
        tables.film_actors.retain(|(_, actor), _| actor != id);
        Ok(removed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryFilms(Shared);

impl Repository<FilmId, Film, NewFilm, FilmChanges> for MemoryFilms {
    async fn find_by_id(&self, id: &FilmId) -> RepositoryResult<Option<Film>> {
        Ok(lock(&self.0)?.films.get(id).cloned())
    }

    async fn find_all(
        &self,
        order: OrderDirection,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Film>> {
        Ok(page(lock(&self.0)?.films.values().cloned(), order, pagination))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(lock(&self.0)?.films.len() as u64)
    }

    async fn exists(&self, id: &FilmId) -> RepositoryResult<bool> {
        Ok(lock(&self.0)?.films.contains_key(id))
    }

    async fn create(&self, data: NewFilm) -> RepositoryResult<Film> {
        let mut tables = lock(&self.0)?;
        check_film_languages(
            &tables,
            RepositoryOperation::Create,
            data.language_id,
            data.original_language_id,
        )?;
        let id = FilmId(tables.next_id());
        let now = Utc::now();
        let film = Film {
            id,
            title: data.title,
            description: data.description,
            release_year: data.release_year,
            language_id: data.language_id,
            original_language_id: data.original_language_id,
            rental_duration: data.rental_duration,
            rental_rate: data.rental_rate,
            length: data.length,
            replacement_cost: data.replacement_cost,
            rating: data.rating,
            special_features: data.special_features,
            created_at: now,
            updated_at: now,
        };
        tables.films.insert(id, film.clone());
        Ok(film)
    }

    async fn update(&self, id: &FilmId, data: FilmChanges) -> RepositoryResult<Film> {
        let mut tables = lock(&self.0)?;
        let mut film = tables.films.get(id).cloned().ok_or_else(|| {
            RepositoryError::not_found("Film", id.to_string())
                .with_operation(RepositoryOperation::Update)
        })?;

        if let Some(title) = data.title {
            film.title = title;
        }
        if let Some(description) = data.description {
            film.description = description;
        }
        if let Some(release_year) = data.release_year {
            film.release_year = release_year;
        }
        if let Some(language_id) = data.language_id {
            film.language_id = language_id;
        }
        if let Some(original_language_id) = data.original_language_id {
            film.original_language_id = original_language_id;
        }
        if let Some(rental_duration) = data.rental_duration {
            film.rental_duration = rental_duration;
        }
        if let Some(rental_rate) = data.rental_rate {
            film.rental_rate = rental_rate;
        }
        if let Some(length) = data.length {
            film.length = length;
        }
        if let Some(replacement_cost) = data.replacement_cost {
            film.replacement_cost = replacement_cost;
        }
        if let Some(rating) = data.rating {
            film.rating = rating;
        }
        if let Some(special_features) = data.special_features {
            film.special_features = special_features;
        }
        check_film_languages(
            &tables,
            RepositoryOperation::Update,
            film.language_id,
            film.original_language_id,
        )?;

        film.updated_at = Utc::now();
        tables.films.insert(*id, film.clone());
        Ok(film)
    }

    async fn delete(&self, id: &FilmId) -> RepositoryResult<bool> {
        let mut tables = lock(&self.0)?;
        let removed = tables.films.remove(id).is_some();
        tables.film_actors.retain(|(film, _), _| film != id);
        tables.film_categories.retain(|(film, _), _| film != id);
        Ok(removed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryCategories(Shared);

impl Repository<CategoryId, Category, NewCategory, CategoryChanges> for MemoryCategories {
    async fn find_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(lock(&self.0)?.categories.get(id).cloned())
    }

    async fn find_all(
        &self,
        order: OrderDirection,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Category>> {
        Ok(page(lock(&self.0)?.categories.values().cloned(), order, pagination))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(lock(&self.0)?.categories.len() as u64)
    }

    async fn exists(&self, id: &CategoryId) -> RepositoryResult<bool> {
        Ok(lock(&self.0)?.categories.contains_key(id))
    }

    async fn create(&self, data: NewCategory) -> RepositoryResult<Category> {
        let mut tables = lock(&self.0)?;
        let id = CategoryId(tables.next_id());
        let now = Utc::now();
        let category = Category {
            id,
            name: data.name,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: &CategoryId, data: CategoryChanges) -> RepositoryResult<Category> {
        let mut tables = lock(&self.0)?;
        let category = tables.categories.get_mut(id).ok_or_else(|| {
            RepositoryError::not_found("Category", id.to_string())
                .with_operation(RepositoryOperation::Update)
        })?;
        if let Some(name) = data.name {
            category.name = name;
        }
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete(&self, id: &CategoryId) -> RepositoryResult<bool> {
        let mut tables = lock(&self.0)?;
        let removed = tables.categories.remove(id).is_some();
        tables.film_categories.retain(|(_, category), _| category != id);
        Ok(removed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryLanguages(Shared);

impl Repository<LanguageId, Language, NewLanguage, LanguageChanges> for MemoryLanguages {
    async fn find_by_id(&self, id: &LanguageId) -> RepositoryResult<Option<Language>> {
        Ok(lock(&self.0)?.languages.get(id).cloned())
    }

    async fn find_all(
        &self,
        order: OrderDirection,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<Language>> {
        Ok(page(lock(&self.0)?.languages.values().cloned(), order, pagination))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(lock(&self.0)?.languages.len() as u64)
    }

    async fn exists(&self, id: &LanguageId) -> RepositoryResult<bool> {
        Ok(lock(&self.0)?.languages.contains_key(id))
    }

    async fn create(&self, data: NewLanguage) -> RepositoryResult<Language> {
        let mut tables = lock(&self.0)?;
        let id = LanguageId(tables.next_id());
        let now = Utc::now();
        let language = Language {
            id,
            name: data.name,
            created_at: now,
            updated_at: now,
        };
        tables.languages.insert(id, language.clone());
        Ok(language)
    }

    async fn update(&self, id: &LanguageId, data: LanguageChanges) -> RepositoryResult<Language> {
        let mut tables = lock(&self.0)?;
        let language = tables.languages.get_mut(id).ok_or_else(|| {
            RepositoryError::not_found("Language", id.to_string())
                .with_operation(RepositoryOperation::Update)
        })?;
        if let Some(name) = data.name {
            language.name = name;
        }
        language.updated_at = Utc::now();
        Ok(language.clone())
    }

    async fn delete(&self, id: &LanguageId) -> RepositoryResult<bool> {
        let mut tables = lock(&self.0)?;
        if tables.films.values().any(|film| film.language_id == *id) {
            return Err(fk_violation(RepositoryOperation::Delete, "Language", "languageId"));
        }
        let removed = tables.languages.remove(id).is_some();
        for film in tables.films.values_mut() {
            if film.original_language_id == Some(*id) {
                film.original_language_id = None;
            }
        }
        Ok(removed)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryFilmActors(Shared);

impl LinkRepository<FilmId, ActorId, FilmActor> for MemoryFilmActors {
    async fn link(&self, film: &FilmId, actor: &ActorId) -> RepositoryResult<FilmActor> {
        let mut tables = lock(&self.0)?;
        if !tables.films.contains_key(film) {
            return Err(fk_violation(RepositoryOperation::Link, "FilmActor", "filmId"));
        }
        if !tables.actors.contains_key(actor) {
            return Err(fk_violation(RepositoryOperation::Link, "FilmActor", "actorId"));
        }
        if tables.film_actors.contains_key(&(*film, *actor)) {
            return Err(RepositoryError::already_exists("FilmActor", "actorId")
                .with_operation(RepositoryOperation::Link));
        }
        let now = Utc::now();
        let link = FilmActor {
            film_id: *film,
            actor_id: *actor,
            created_at: now,
            updated_at: now,
        };
        tables.film_actors.insert((*film, *actor), link.clone());
        Ok(link)
    }

    async fn unlink(&self, film: &FilmId, actor: &ActorId) -> RepositoryResult<bool> {
        Ok(lock(&self.0)?.film_actors.remove(&(*film, *actor)).is_some())
    }
}

impl RelationLoader<FilmId, Actor> for MemoryFilmActors {
    async fn load_related(&self, film: &FilmId) -> RepositoryResult<Vec<Actor>> {
        let tables = lock(&self.0)?;
        Ok(tables
            .film_actors
            .keys()
            .filter(|(f, _)| f == film)
            .filter_map(|(_, actor)| tables.actors.get(actor).cloned())
            .collect())
    }
}

impl RelationLoader<ActorId, Film> for MemoryFilmActors {
    async fn load_related(&self, actor: &ActorId) -> RepositoryResult<Vec<Film>> {
        let tables = lock(&self.0)?;
        Ok(tables
            .film_actors
            .keys()
            .filter(|(_, a)| a == actor)
            .filter_map(|(film, _)| tables.films.get(film).cloned())
            .collect())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryFilmCategories(Shared);

impl LinkRepository<FilmId, CategoryId, FilmCategory> for MemoryFilmCategories {
    async fn link(&self, film: &FilmId, category: &CategoryId) -> RepositoryResult<FilmCategory> {
        let mut tables = lock(&self.0)?;
        if !tables.films.contains_key(film) {
            return Err(fk_violation(RepositoryOperation::Link, "FilmCategory", "filmId"));
        }
        if !tables.categories.contains_key(category) {
            return Err(fk_violation(RepositoryOperation::Link, "FilmCategory", "categoryId"));
        }
        if tables.film_categories.contains_key(&(*film, *category)) {
            return Err(RepositoryError::already_exists("FilmCategory", "categoryId")
                .with_operation(RepositoryOperation::Link));
        }
        let now = Utc::now();
        let link = FilmCategory {
            film_id: *film,
            category_id: *category,
            created_at: now,
            updated_at: now,
        };
        tables.film_categories.insert((*film, *category), link.clone());
        Ok(link)
    }

    async fn unlink(&self, film: &FilmId, category: &CategoryId) -> RepositoryResult<bool> {
        Ok(lock(&self.0)?
            .film_categories
            .remove(&(*film, *category))
            .is_some())
    }
}

impl RelationLoader<FilmId, Category> for MemoryFilmCategories {
    async fn load_related(&self, film: &FilmId) -> RepositoryResult<Vec<Category>> {
        let tables = lock(&self.0)?;
        Ok(tables
            .film_categories
            .keys()
            .filter(|(f, _)| f == film)
            .filter_map(|(_, category)| tables.categories.get(category).cloned())
            .collect())
    }
}

impl RelationLoader<CategoryId, Film> for MemoryFilmCategories {
    async fn load_related(&self, category: &CategoryId) -> RepositoryResult<Vec<Film>> {
        let tables = lock(&self.0)?;
        Ok(tables
            .film_categories
            .keys()
            .filter(|(_, c)| c == category)
            .filter_map(|(film, _)| tables.films.get(film).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use crate::repository::RepositoryErrorKind;
    use rust_decimal::Decimal;

    fn new_film(language_id: LanguageId) -> NewFilm {
        NewFilm {
            title: Some("ACADEMY DINOSAUR".to_string()),
            description: None,
            release_year: Some(2006),
            language_id,
            original_language_id: None,
            rental_duration: 6,
            rental_rate: Decimal::new(99, 2),
            length: Some(86),
            replacement_cost: Decimal::new(2099, 2),
            rating: Some(Rating::Pg),
            special_features: None,
        }
    }

    #[tokio::test]
    async fn test_film_requires_existing_language() {
        let catalog = MemoryCatalog::seeded();
        let err = catalog.films().create(new_film(LanguageId(999))).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ForeignKeyViolation);
        assert_eq!(err.field.as_deref(), Some("languageId"));
    }

    #[tokio::test]
    async fn test_delete_actor_cascades_links() {
        let catalog = MemoryCatalog::seeded();
        let film = catalog.films().create(new_film(LanguageId(1))).await.unwrap();
        let actor = catalog
            .actors()
            .create(NewActor {
                first_name: "PENELOPE".into(),
                last_name: "GUINESS".into(),
            })
            .await
            .unwrap();
        catalog.film_actors().link(&film.id, &actor.id).await.unwrap();

        let dup = catalog.film_actors().link(&film.id, &actor.id).await.unwrap_err();
        assert_eq!(dup.kind, RepositoryErrorKind::AlreadyExists);

        assert!(catalog.actors().delete(&actor.id).await.unwrap());
        let cast = RelationLoader::<FilmId, Actor>::load_related(catalog.film_actors(), &film.id)
            .await
            .unwrap();
        assert!(cast.is_empty());
    }

    #[tokio::test]
    async fn test_language_delete_rules() {
        let catalog = MemoryCatalog::seeded();
        let mut data = new_film(LanguageId(1));
        data.original_language_id = Some(LanguageId(2));
        let film = catalog.films().create(data).await.unwrap();

        let err = catalog.languages().delete(&LanguageId(1)).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ForeignKeyViolation);

        assert!(catalog.languages().delete(&LanguageId(2)).await.unwrap());
        let film = catalog.films().find_by_id(&film.id).await.unwrap().unwrap();
        assert_eq!(film.original_language_id, None);
    }

    #[tokio::test]
    async fn test_offline_catalog_fails_with_connection_error() {
        let catalog = MemoryCatalog::seeded();
        catalog.go_offline();
        let err = catalog.ping().await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ConnectionFailed);
    }
}
