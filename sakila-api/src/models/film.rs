use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::actor::Actor;
use super::category::Category;
use super::ids::{FilmId, LanguageId};
use super::language::Language;
use super::validation::{nullable, Invalid, Validator};

pub const TITLE_MAX_LEN: usize = 255;
pub const RELEASE_YEAR_MIN: i32 = 1901;
pub const RELEASE_YEAR_MAX: i32 = 2155;
pub const DEFAULT_RENTAL_DURATION: i32 = 3;

/// Largest value a `NUMERIC(4,2)` rental rate can hold
pub fn max_rental_rate() -> Decimal {
    Decimal::new(9999, 2)
}

/// Largest value a `NUMERIC(5,2)` replacement cost can hold
pub fn max_replacement_cost() -> Decimal {
    Decimal::new(99999, 2)
}

pub fn default_rental_rate() -> Decimal {
    Decimal::new(499, 2)
}

pub fn default_replacement_cost() -> Decimal {
    Decimal::new(1999, 2)
}

/// MPAA film rating, stored as the `mpaa_rating` enum type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "mpaa_rating")]
pub enum Rating {
    #[serde(rename = "G")]
    #[sqlx(rename = "G")]
    G,
    #[serde(rename = "PG")]
    #[sqlx(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    #[sqlx(rename = "PG-13")]
    Pg13,
    #[serde(rename = "R")]
    #[sqlx(rename = "R")]
    R,
    #[serde(rename = "NC-17")]
    #[sqlx(rename = "NC-17")]
    Nc17,
}

impl Rating {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::Nc17 => "NC-17",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of `films`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: FilmId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: LanguageId,
    pub original_language_id: Option<LanguageId>,
    pub rental_duration: i32,
    pub rental_rate: Decimal,
    pub length: Option<i32>,
    pub replacement_cost: Decimal,
    pub rating: Option<Rating>,
    pub special_features: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A film with its languages, cast and categories
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmDetails {
    #[serde(flatten)]
    pub film: Film,
    pub language: Option<Language>,
    pub original_language: Option<Language>,
    pub actors: Vec<Actor>,
    pub categories: Vec<Category>,
}

/// Validated input for inserting a film, defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewFilm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: LanguageId,
    pub original_language_id: Option<LanguageId>,
    pub rental_duration: i32,
    pub rental_rate: Decimal,
    pub length: Option<i32>,
    pub replacement_cost: Decimal,
    pub rating: Option<Rating>,
    pub special_features: Option<Vec<String>>,
}

/// Validated partial update of a film
///
/// For nullable columns the outer `Option` says whether the column changes
/// and the inner one carries the new value, `None` meaning `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmChanges {
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub release_year: Option<Option<i32>>,
    pub language_id: Option<LanguageId>,
    pub original_language_id: Option<Option<LanguageId>>,
    pub rental_duration: Option<i32>,
    pub rental_rate: Option<Decimal>,
    pub length: Option<Option<i32>>,
    pub replacement_cost: Option<Decimal>,
    pub rating: Option<Option<Rating>>,
    pub special_features: Option<Option<Vec<String>>>,
}

impl FilmChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `POST /api/films`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language_id: Option<LanguageId>,
    pub original_language_id: Option<LanguageId>,
    pub rental_duration: Option<i32>,
    pub rental_rate: Option<Decimal>,
    pub length: Option<i32>,
    pub replacement_cost: Option<Decimal>,
    pub rating: Option<Rating>,
    pub special_features: Option<Vec<String>>,
}

impl CreateFilmRequest {
    pub fn validate(self) -> Result<NewFilm, Invalid> {
        let Some(language_id) = self.language_id else {
            return Err(Invalid::Missing("languageId is required".to_string()));
        };

        let film = NewFilm {
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            language_id,
            original_language_id: self.original_language_id,
            rental_duration: self.rental_duration.unwrap_or(DEFAULT_RENTAL_DURATION),
            rental_rate: self.rental_rate.unwrap_or_else(default_rental_rate),
            length: self.length,
            replacement_cost: self
                .replacement_cost
                .unwrap_or_else(default_replacement_cost),
            rating: self.rating,
            special_features: self.special_features,
        };

        let mut v = Validator::new();
        if let Some(ref title) = film.title {
            check_title(&mut v, title);
        }
        if let Some(year) = film.release_year {
            v.range("releaseYear", year, RELEASE_YEAR_MIN, RELEASE_YEAR_MAX);
        }
        check_positive(&mut v, "rentalDuration", film.rental_duration);
        v.money("rentalRate", film.rental_rate, max_rental_rate());
        if let Some(length) = film.length {
            check_positive(&mut v, "length", length);
        }
        v.money(
            "replacementCost",
            film.replacement_cost,
            max_replacement_cost(),
        );
        if let Some(ref features) = film.special_features {
            check_features(&mut v, features);
        }
        v.finish()?;

        Ok(film)
    }
}

/// Body of `PUT /api/films/{id}`
///
/// Absent fields are left unchanged; an explicit `null` clears a nullable
/// column.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmRequest {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub release_year: Option<Option<i32>>,
    pub language_id: Option<LanguageId>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub original_language_id: Option<Option<LanguageId>>,
    pub rental_duration: Option<i32>,
    pub rental_rate: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub length: Option<Option<i32>>,
    pub replacement_cost: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Rating>)]
    pub rating: Option<Option<Rating>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub special_features: Option<Option<Vec<String>>>,
}

impl UpdateFilmRequest {
    pub fn validate(self) -> Result<FilmChanges, Invalid> {
        let mut v = Validator::new();
        if let Some(Some(ref title)) = self.title {
            check_title(&mut v, title);
        }
        if let Some(Some(year)) = self.release_year {
            v.range("releaseYear", year, RELEASE_YEAR_MIN, RELEASE_YEAR_MAX);
        }
        if let Some(duration) = self.rental_duration {
            check_positive(&mut v, "rentalDuration", duration);
        }
        if let Some(rate) = self.rental_rate {
            v.money("rentalRate", rate, max_rental_rate());
        }
        if let Some(Some(length)) = self.length {
            check_positive(&mut v, "length", length);
        }
        if let Some(cost) = self.replacement_cost {
            v.money("replacementCost", cost, max_replacement_cost());
        }
        if let Some(Some(ref features)) = self.special_features {
            check_features(&mut v, features);
        }
        v.finish()?;

        Ok(FilmChanges {
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            language_id: self.language_id,
            original_language_id: self.original_language_id,
            rental_duration: self.rental_duration,
            rental_rate: self.rental_rate,
            length: self.length,
            replacement_cost: self.replacement_cost,
            rating: self.rating,
            special_features: self.special_features,
        })
    }
}

fn check_title(v: &mut Validator, title: &str) {
    if title.chars().count() > TITLE_MAX_LEN {
        v.push(
            "title",
            format!("title must be at most {} characters", TITLE_MAX_LEN),
        );
    }
}

fn check_positive(v: &mut Validator, field: &str, value: i32) {
    if value <= 0 {
        v.push(field, format!("{} must be greater than 0", field));
    }
}

fn check_features(v: &mut Validator, features: &[String]) {
    if features.iter().any(|f| f.trim().is_empty()) {
        v.push("specialFeatures", "specialFeatures must not contain empty values");
    }
}
