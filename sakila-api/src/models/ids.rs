//! Strongly typed entity identifiers
//!
//! Each table gets its own identifier newtype so a film id can never be
//! passed where an actor id is expected. They serialize as bare integers and
//! bind to `INTEGER` columns.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
            ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i32);

        impl $name {
            /// Raw integer value
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a row in `actors`
    ActorId
);
entity_id!(
    /// Identifier of a row in `films`
    FilmId
);
entity_id!(
    /// Identifier of a row in `categories`
    CategoryId
);
entity_id!(
    /// Identifier of a row in `languages`
    LanguageId
);
