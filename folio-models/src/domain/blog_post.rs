use super::common::{resolve_slug, PageParams};
use crate::{
    entities::{blog_post::ActiveModel, blog_post::Model as BlogPostModel, StringList},
    enums::common::PublicationStatus,
};
use chrono::{DateTime, Utc};
use folio_utils::text::slugify;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostPageParams {
    pub search: Option<String>,
    pub status: Option<PublicationStatus>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub author_id: Option<i32>,
    pub tag: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

/// Post summary for the public blog index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<BlogPostModel> for PublicBlogPost {
    fn from(post: BlogPostModel) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            cover_image: post.cover_image,
            tags: post.tags.0,
            published_at: post.published_at,
        }
    }
}

/// Full post as rendered on its own page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBlogPostDetail {
    #[serde(flatten)]
    pub summary: PublicBlogPost,
    pub content: String,
    pub author_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    #[validate(length(min = 1, max = 200, message = "title length must be 1..=200"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "slug length must be 1..=200"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500, message = "excerpt length must be 1..=500"))]
    pub excerpt: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PublicationStatus,
}

impl NewBlogPost {
    /// `author_id` is the admin creating the post.
    pub fn into_active_model(self, author_id: Option<i32>) -> Result<ActiveModel, String> {
        let slug = resolve_slug(self.slug.as_deref(), &self.title)?;
        let published_at = self.status.is_public().then(Utc::now);
        Ok(ActiveModel {
            title: Set(self.title),
            slug: Set(slug),
            excerpt: Set(self.excerpt),
            content: Set(self.content),
            cover_image: Set(self.cover_image),
            tags: Set(StringList(self.tags)),
            author_id: Set(author_id),
            status: Set(self.status),
            published_at: Set(published_at),
            ..Default::default()
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    #[validate(length(min = 1, max = 200, message = "title length must be 1..=200"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "slug length must be 1..=200"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 500, message = "excerpt length must be 1..=500"))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub cover_image: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PublicationStatus>,
}

impl UpdateBlogPost {
    /// `status` is handled by the repository so `published_at` can be stamped.
    pub fn apply(self, active: &mut ActiveModel) -> Option<PublicationStatus> {
        if let Some(v) = self.title {
            active.title = Set(v);
        }
        if let Some(v) = self.slug.as_deref().map(slugify).filter(|s| !s.is_empty()) {
            active.slug = Set(v);
        }
        if let Some(v) = self.excerpt {
            active.excerpt = Set(v);
        }
        if let Some(v) = self.content {
            active.content = Set(v);
        }
        if let Some(v) = self.cover_image {
            active.cover_image = Set(v);
        }
        if let Some(v) = self.tags {
            active.tags = Set(StringList(v));
        }
        self.status
    }
}
