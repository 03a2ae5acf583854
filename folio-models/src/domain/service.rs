use super::common::{resolve_slug, PageParams};
use crate::{
    entities::{service::ActiveModel, StringList},
    enums::common::PublicationStatus,
};
use folio_utils::text::slugify;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServicePageParams {
    pub search: Option<String>,
    pub status: Option<PublicationStatus>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[validate(length(min = 1, max = 200, message = "title length must be 1..=200"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "slug length must be 1..=200"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500, message = "summary length must be 1..=500"))]
    pub summary: String,
    pub content: Option<String>,
    #[validate(length(max = 100, message = "icon must be at most 100 characters"))]
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub status: PublicationStatus,
}

impl NewService {
    pub fn into_active_model(self, created_by: Option<i32>) -> Result<ActiveModel, String> {
        let slug = resolve_slug(self.slug.as_deref(), &self.title)?;
        Ok(ActiveModel {
            title: Set(self.title),
            slug: Set(slug),
            summary: Set(self.summary),
            content: Set(self.content),
            icon: Set(self.icon),
            features: Set(StringList(self.features)),
            sort_order: Set(self.sort_order),
            status: Set(self.status),
            created_by: Set(created_by),
            ..Default::default()
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    #[validate(length(min = 1, max = 200, message = "title length must be 1..=200"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "slug length must be 1..=200"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500, message = "summary length must be 1..=500"))]
    pub summary: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub content: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub icon: Option<Option<String>>,
    pub features: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub status: Option<PublicationStatus>,
}

impl UpdateService {
    pub fn apply(self, active: &mut ActiveModel) {
        if let Some(v) = self.title {
            active.title = Set(v);
        }
        if let Some(v) = self.slug.as_deref().map(slugify).filter(|s| !s.is_empty()) {
            active.slug = Set(v);
        }
        if let Some(v) = self.summary {
            active.summary = Set(v);
        }
        if let Some(v) = self.content {
            active.content = Set(v);
        }
        if let Some(v) = self.icon {
            active.icon = Set(v);
        }
        if let Some(v) = self.features {
            active.features = Set(StringList(v));
        }
        if let Some(v) = self.sort_order {
            active.sort_order = Set(v);
        }
        if let Some(v) = self.status {
            active.status = Set(v);
        }
    }
}
