//! Catalog entities, their identifiers and request bodies
//!
//! Entities mirror database rows and serialize with camelCase keys. Request
//! bodies are validated into `New*` and `*Changes` inputs before reaching a
//! repository.

mod actor;
mod category;
mod film;
mod ids;
mod language;
mod link;
pub mod validation;

pub use actor::{
    Actor, ActorChanges, ActorWithFilms, CreateActorRequest, NewActor, UpdateActorRequest,
};
pub use category::{Category, CategoryChanges, CategoryRequest, CategoryWithFilms, NewCategory};
pub use film::{
    CreateFilmRequest, Film, FilmChanges, FilmDetails, NewFilm, Rating, UpdateFilmRequest,
};
pub use ids::{ActorId, CategoryId, FilmId, LanguageId};
pub use language::{Language, LanguageChanges, LanguageRequest, NewLanguage, DEFAULT_LANGUAGES};
pub use link::{AddActorRequest, AddCategoryRequest, FilmActor, FilmCategory};
pub use validation::{FieldError, Invalid};
