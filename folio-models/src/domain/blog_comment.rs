use super::common::{deserialize_option_bool_from_anything, PageParams};
use crate::entities::blog_comment::{ActiveModel, Model as BlogCommentModel};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageParams {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub post_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_option_bool_from_anything")]
    pub approved: Option<bool>,
    pub search: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

/// Visitor comment submitted from a blog post page.
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
pub struct NewBlogComment {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(
        min = 3,
        max = 2000,
        message = "content must be between 3 and 2000 characters"
    ))]
    pub content: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i16,
}

impl NewBlogComment {
    /// New comments always wait for moderation.
    pub fn into_active_model(self, post_id: i32) -> ActiveModel {
        ActiveModel {
            post_id: Set(post_id),
            author_name: Set(self.name.trim().to_string()),
            author_email: Set(self.email.trim().to_lowercase()),
            content: Set(self.content),
            rating: Set(self.rating),
            is_approved: Set(false),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModerateComment {
    pub is_approved: bool,
}

/// Approved comment as shown to visitors; the author's email stays private.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicComment {
    pub id: i32,
    pub author_name: String,
    pub content: String,
    pub rating: i16,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<BlogCommentModel> for PublicComment {
    fn from(comment: BlogCommentModel) -> Self {
        Self {
            id: comment.id,
            author_name: comment.author_name,
            content: comment.content,
            rating: comment.rating,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModerationStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(name: &str, rating: i16) -> NewBlogComment {
        NewBlogComment {
            name: name.into(),
            email: "jo@example.com".into(),
            content: "Great read".into(),
            rating,
        }
    }

    #[test]
    fn two_character_name_is_enough() {
        assert!(comment("Jo", 5).validate().is_ok());
    }

    #[test]
    fn one_character_name_is_rejected() {
        let errors = comment("J", 5).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rating_above_five_is_rejected() {
        let errors = comment("Jo", 6).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rating"));
    }

    #[test]
    fn new_comments_are_unapproved() {
        let active = comment("Jo", 4).into_active_model(3);
        assert_eq!(active.is_approved, Set(false));
        assert_eq!(active.post_id, Set(3));
    }
}
