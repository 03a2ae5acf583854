use super::common::{deserialize_option_bool_from_anything, resolve_slug, PageParams};
use crate::{
    entities::{portfolio::ActiveModel, StringList},
    enums::common::PublicationStatus,
};
use chrono::NaiveDate;
use folio_utils::text::slugify;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPageParams {
    pub search: Option<String>,
    pub status: Option<PublicationStatus>,
    #[serde(default, deserialize_with = "deserialize_option_bool_from_anything")]
    pub featured: Option<bool>,
    pub category: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

/// Query string of the public portfolio listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicPortfolioQuery {
    #[serde(default, deserialize_with = "deserialize_option_bool_from_anything")]
    pub featured: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    #[validate(length(min = 1, max = 200, message = "title length must be 1..=200"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "slug length must be 1..=200"))]
    pub slug: Option<String>,
    #[validate(length(max = 200, message = "client must be at most 200 characters"))]
    pub client: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category length must be 1..=100"))]
    pub category: String,
    #[validate(length(min = 1, max = 500, message = "summary length must be 1..=500"))]
    pub summary: String,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    #[validate(url(message = "projectUrl must be a valid URL"))]
    pub project_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub status: PublicationStatus,
    pub completed_at: Option<NaiveDate>,
}

impl NewPortfolio {
    pub fn into_active_model(self, created_by: Option<i32>) -> Result<ActiveModel, String> {
        let slug = resolve_slug(self.slug.as_deref(), &self.title)?;
        Ok(ActiveModel {
            title: Set(self.title),
            slug: Set(slug),
            client: Set(self.client),
            category: Set(self.category),
            summary: Set(self.summary),
            content: Set(self.content),
            cover_image: Set(self.cover_image),
            project_url: Set(self.project_url),
            tags: Set(StringList(self.tags)),
            featured: Set(self.featured),
            sort_order: Set(self.sort_order),
            status: Set(self.status),
            completed_at: Set(self.completed_at),
            created_by: Set(created_by),
            ..Default::default()
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolio {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    #[validate(length(min = 1, max = 200, message = "title length must be 1..=200"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "slug length must be 1..=200"))]
    pub slug: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub client: Option<Option<String>>,
    #[validate(length(min = 1, max = 100, message = "category length must be 1..=100"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 500, message = "summary length must be 1..=500"))]
    pub summary: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub content: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub cover_image: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub project_url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub sort_order: Option<i32>,
    pub status: Option<PublicationStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub completed_at: Option<Option<NaiveDate>>,
}

impl UpdatePortfolio {
    pub fn apply(self, active: &mut ActiveModel) {
        if let Some(v) = self.title {
            active.title = Set(v);
        }
        if let Some(v) = self.slug.as_deref().map(slugify).filter(|s| !s.is_empty()) {
            active.slug = Set(v);
        }
        if let Some(v) = self.client {
            active.client = Set(v);
        }
        if let Some(v) = self.category {
            active.category = Set(v);
        }
        if let Some(v) = self.summary {
            active.summary = Set(v);
        }
        if let Some(v) = self.content {
            active.content = Set(v);
        }
        if let Some(v) = self.cover_image {
            active.cover_image = Set(v);
        }
        if let Some(v) = self.project_url {
            active.project_url = Set(v);
        }
        if let Some(v) = self.tags {
            active.tags = Set(StringList(v));
        }
        if let Some(v) = self.featured {
            active.featured = Set(v);
        }
        if let Some(v) = self.sort_order {
            active.sort_order = Set(v);
        }
        if let Some(v) = self.status {
            active.status = Set(v);
        }
        if let Some(v) = self.completed_at {
            active.completed_at = Set(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_project_url_is_rejected() {
        let new: NewPortfolio = serde_json::from_str(
            r#"{"title":"Shop","category":"web","summary":"x","projectUrl":"not a url"}"#,
        )
        .unwrap();
        assert!(new.validate().is_err());
    }

    #[test]
    fn completed_at_parses_iso_dates() {
        let new: NewPortfolio = serde_json::from_str(
            r#"{"title":"Shop","category":"web","summary":"x","completedAt":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(new.completed_at, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn public_query_reads_featured_flag() {
        let q: PublicPortfolioQuery = serde_json::from_str(r#"{"featured":"true"}"#).unwrap();
        assert_eq!(q.featured, Some(true));
    }
}
