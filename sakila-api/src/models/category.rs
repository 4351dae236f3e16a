use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::film::Film;
use super::ids::CategoryId;
use super::validation::{Invalid, Validator};

pub const NAME_MAX_LEN: usize = 20;

/// A row of `categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with the films filed under it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryWithFilms {
    #[serde(flatten)]
    pub category: Category,
    pub films: Vec<Film>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub name: Option<String>,
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

impl CategoryRequest {
    pub fn validate_new(self) -> Result<NewCategory, Invalid> {
        let Some(name) = self.name.filter(|s| !s.is_empty()) else {
            return Err(Invalid::Missing("name is required".to_string()));
        };
        let mut v = Validator::new();
        v.text("name", &name, NAME_MAX_LEN);
        v.finish()?;
        Ok(NewCategory { name })
    }

    pub fn validate_changes(self) -> Result<CategoryChanges, Invalid> {
        let mut v = Validator::new();
        if let Some(ref name) = self.name {
            v.text("name", name, NAME_MAX_LEN);
        }
        v.finish()?;
        Ok(CategoryChanges { name: self.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required_on_create() {
        let request = CategoryRequest { name: None };
        assert_eq!(
            request.validate_new(),
            Err(Invalid::Missing("name is required".to_string()))
        );
    }

    #[test]
    fn test_name_length() {
        let request = CategoryRequest {
            name: Some("Documentary and Biography".to_string()),
        };
        assert!(matches!(request.validate_new(), Err(Invalid::Fields(_))));

        let request = CategoryRequest {
            name: Some("Documentary".to_string()),
        };
        assert_eq!(request.validate_new().unwrap().name, "Documentary");
    }

    #[test]
    fn test_update_without_name_is_noop() {
        let changes = CategoryRequest { name: None }.validate_changes().unwrap();
        assert_eq!(changes, CategoryChanges::default());
    }
}
