use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::LanguageId;
use super::validation::{Invalid, Validator};

pub const NAME_MAX_LEN: usize = 20;

/// Languages inserted into an empty `languages` table at startup
pub const DEFAULT_LANGUAGES: [&str; 7] = [
    "English", "Spanish", "French", "German", "Italian", "Mandarin", "Japanese",
];

/// A row of `languages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLanguage {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageChanges {
    pub name: Option<String>,
}

/// Body of `POST /api/languages` and `PUT /api/languages/{id}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LanguageRequest {
    pub name: Option<String>,
}

impl LanguageRequest {
    pub fn validate_new(self) -> Result<NewLanguage, Invalid> {
        let Some(name) = self.name.filter(|s| !s.is_empty()) else {
            return Err(Invalid::Missing("name is required".to_string()));
        };
        let mut v = Validator::new();
        v.text("name", &name, NAME_MAX_LEN);
        v.finish()?;
        Ok(NewLanguage { name })
    }

    pub fn validate_changes(self) -> Result<LanguageChanges, Invalid> {
        let mut v = Validator::new();
        if let Some(ref name) = self.name {
            v.text("name", name, NAME_MAX_LEN);
        }
        v.finish()?;
        Ok(LanguageChanges { name: self.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_languages_fit_column() {
        assert!(DEFAULT_LANGUAGES
            .iter()
            .all(|name| name.chars().count() <= NAME_MAX_LEN));
    }

    #[test]
    fn test_blank_name_rejected() {
        let request = LanguageRequest {
            name: Some("  ".to_string()),
        };
        assert!(matches!(request.validate_new(), Err(Invalid::Fields(_))));
        let request = LanguageRequest {
            name: Some(String::new()),
        };
        assert!(matches!(request.validate_new(), Err(Invalid::Missing(_))));
    }
}
