use super::common::{resolve_slug, PageParams};
use crate::{entities::technology::ActiveModel, enums::common::PublicationStatus};
use folio_utils::text::slugify;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyPageParams {
    pub search: Option<String>,
    pub status: Option<PublicationStatus>,
    pub category: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTechnology {
    #[validate(length(min = 1, max = 100, message = "name length must be 1..=100"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "slug length must be 1..=100"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 50, message = "category length must be 1..=50"))]
    pub category: String,
    pub icon_url: Option<String>,
    #[validate(url(message = "websiteUrl must be a valid URL"))]
    pub website_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "proficiency must be within 0..=100"))]
    pub proficiency: i16,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub status: PublicationStatus,
}

impl NewTechnology {
    pub fn into_active_model(self, created_by: Option<i32>) -> Result<ActiveModel, String> {
        let slug = resolve_slug(self.slug.as_deref(), &self.name)?;
        Ok(ActiveModel {
            name: Set(self.name),
            slug: Set(slug),
            category: Set(self.category),
            icon_url: Set(self.icon_url),
            website_url: Set(self.website_url),
            proficiency: Set(self.proficiency),
            sort_order: Set(self.sort_order),
            status: Set(self.status),
            created_by: Set(created_by),
            ..Default::default()
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTechnology {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    #[validate(length(min = 1, max = 100, message = "name length must be 1..=100"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "slug length must be 1..=100"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 50, message = "category length must be 1..=50"))]
    pub category: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub icon_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub website_url: Option<Option<String>>,
    #[validate(range(min = 0, max = 100, message = "proficiency must be within 0..=100"))]
    pub proficiency: Option<i16>,
    pub sort_order: Option<i32>,
    pub status: Option<PublicationStatus>,
}

impl UpdateTechnology {
    pub fn apply(self, active: &mut ActiveModel) {
        if let Some(v) = self.name {
            active.name = Set(v);
        }
        if let Some(v) = self.slug.as_deref().map(slugify).filter(|s| !s.is_empty()) {
            active.slug = Set(v);
        }
        if let Some(v) = self.category {
            active.category = Set(v);
        }
        if let Some(v) = self.icon_url {
            active.icon_url = Set(v);
        }
        if let Some(v) = self.website_url {
            active.website_url = Set(v);
        }
        if let Some(v) = self.proficiency {
            active.proficiency = Set(v);
        }
        if let Some(v) = self.sort_order {
            active.sort_order = Set(v);
        }
        if let Some(v) = self.status {
            active.status = Set(v);
        }
    }
}
