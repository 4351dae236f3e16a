use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{ActorId, CategoryId, FilmId};
use super::validation::Invalid;

/// A row of `film_actors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmActor {
    pub film_id: FilmId,
    pub actor_id: ActorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of `film_categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmCategory {
    pub film_id: FilmId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/films/{id}/actors`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddActorRequest {
    pub actor_id: Option<ActorId>,
}

impl AddActorRequest {
    pub fn validate(self) -> Result<ActorId, Invalid> {
        self.actor_id
            .ok_or_else(|| Invalid::Missing("actorId is required".to_string()))
    }
}

/// Body of `POST /api/films/{id}/categories`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryRequest {
    pub category_id: Option<CategoryId>,
}

impl AddCategoryRequest {
    pub fn validate(self) -> Result<CategoryId, Invalid> {
        self.category_id
            .ok_or_else(|| Invalid::Missing("categoryId is required".to_string()))
    }
}
