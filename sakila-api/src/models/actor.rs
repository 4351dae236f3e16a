use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::film::Film;
use super::ids::ActorId;
use super::validation::{Invalid, Validator};

/// Maximum length of an actor's first or last name
pub const NAME_MAX_LEN: usize = 20;

/// A row of `actors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An actor together with the films they appear in
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActorWithFilms {
    #[serde(flatten)]
    pub actor: Actor,
    pub films: Vec<Film>,
}

/// Validated input for inserting an actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub first_name: String,
    pub last_name: String,
}

/// Validated partial update of an actor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Body of `POST /api/actors`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CreateActorRequest {
    pub fn validate(self) -> Result<NewActor, Invalid> {
        let first_name = self.first_name.filter(|s| !s.is_empty());
        let last_name = self.last_name.filter(|s| !s.is_empty());
        let (Some(first_name), Some(last_name)) = (first_name, last_name) else {
            return Err(Invalid::Missing(
                "firstName and lastName are required".to_string(),
            ));
        };

        let mut v = Validator::new();
        v.text("firstName", &first_name, NAME_MAX_LEN);
        v.text("lastName", &last_name, NAME_MAX_LEN);
        v.finish()?;

        Ok(NewActor {
            first_name,
            last_name,
        })
    }
}

/// Body of `PUT /api/actors/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateActorRequest {
    pub fn validate(self) -> Result<ActorChanges, Invalid> {
        let mut v = Validator::new();
        if let Some(ref first_name) = self.first_name {
            v.text("firstName", first_name, NAME_MAX_LEN);
        }
        if let Some(ref last_name) = self.last_name {
            v.text("lastName", last_name, NAME_MAX_LEN);
        }
        v.finish()?;

        Ok(ActorChanges {
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}
