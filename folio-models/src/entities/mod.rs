//! SeaORM entities for every persisted table.
pub mod blog_comment;
pub mod blog_post;
pub mod portfolio;
pub mod prelude;
pub mod service;
pub mod site_config;
pub mod technology;
pub mod testimonial;
pub mod user;

use folio_macros::IntoActiveValue;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// List of strings persisted as a JSON array column (tags, feature bullets...).
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    FromJsonQueryResult,
    IntoActiveValue,
)]
pub struct StringList(pub Vec<String>);

impl StringList {
    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }
}

impl From<Vec<String>> for StringList {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}
