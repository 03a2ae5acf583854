//! Testimonial request/review workflow payloads.
//!
//! An admin creates a request for a client; the client receives a link carrying an
//! opaque token and fills in the form; the admin then reviews and publishes it.

use super::common::PageParams;
use crate::{
    entities::testimonial::{ActiveModel, Model as TestimonialModel},
    enums::common::{PublicationStatus, TestimonialStatus},
};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPageParams {
    pub search: Option<String>,
    pub status: Option<TestimonialStatus>,
    pub publication_status: Option<PublicationStatus>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

/// Admin request asking a client for a testimonial.
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonialRequest {
    #[validate(length(min = 2, max = 100, message = "clientName length must be 2..=100"))]
    pub client_name: String,
    #[validate(email(message = "clientEmail is invalid"))]
    pub client_email: String,
    #[validate(length(max = 100, message = "clientCompany must be at most 100 characters"))]
    pub client_company: Option<String>,
    #[validate(length(max = 100, message = "clientPosition must be at most 100 characters"))]
    pub client_position: Option<String>,
}

impl NewTestimonialRequest {
    pub fn into_active_model(self, token: String, created_by: Option<i32>) -> ActiveModel {
        ActiveModel {
            client_name: Set(self.client_name),
            client_email: Set(self.client_email.trim().to_lowercase()),
            client_company: Set(self.client_company),
            client_position: Set(self.client_position),
            content: Set(String::new()),
            rating: Set(None),
            token: Set(token),
            status: Set(TestimonialStatus::Pending),
            publication_status: Set(PublicationStatus::Draft),
            reminder_count: Set(0),
            created_by: Set(created_by),
            ..Default::default()
        }
    }
}

/// Admin edit of client details or submitted content.
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonial {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    #[validate(length(min = 2, max = 100, message = "clientName length must be 2..=100"))]
    pub client_name: Option<String>,
    #[validate(email(message = "clientEmail is invalid"))]
    pub client_email: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub client_company: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub client_position: Option<Option<String>>,
    #[validate(length(max = 2000, message = "content must be at most 2000 characters"))]
    pub content: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i16>,
}

impl UpdateTestimonial {
    pub fn apply(self, active: &mut ActiveModel) {
        if let Some(v) = self.client_name {
            active.client_name = Set(v);
        }
        if let Some(v) = self.client_email {
            active.client_email = Set(v.trim().to_lowercase());
        }
        if let Some(v) = self.client_company {
            active.client_company = Set(v);
        }
        if let Some(v) = self.client_position {
            active.client_position = Set(v);
        }
        if let Some(v) = self.content {
            active.content = Set(v);
        }
        if let Some(v) = self.rating {
            active.rating = Set(Some(v));
        }
    }
}

/// Client answer posted from the tokenized form.
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestimonial {
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "content must be between 10 and 2000 characters"
    ))]
    pub content: String,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(max = 100, message = "clientPosition must be at most 100 characters"))]
    pub client_position: Option<String>,
    #[validate(length(max = 100, message = "clientCompany must be at most 100 characters"))]
    pub client_company: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
pub struct ReviewTestimonial {
    pub approve: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTestimonialPublication {
    pub publication_status: PublicationStatus,
}

/// Prefill for the client-facing form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialForm {
    pub client_name: String,
    pub client_company: Option<String>,
    pub client_position: Option<String>,
}

impl From<TestimonialModel> for TestimonialForm {
    fn from(model: TestimonialModel) -> Self {
        Self {
            client_name: model.client_name,
            client_company: model.client_company,
            client_position: model.client_position,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTestimonial {
    pub id: i32,
    pub client_name: String,
    pub client_company: Option<String>,
    pub client_position: Option<String>,
    pub content: String,
    pub rating: Option<i16>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<TestimonialModel> for PublicTestimonial {
    fn from(model: TestimonialModel) -> Self {
        Self {
            id: model.id,
            client_name: model.client_name,
            client_company: model.client_company,
            client_position: model.client_position,
            content: model.content,
            rating: model.rating,
            approved_at: model.approved_at,
        }
    }
}

/// Counts per [`TestimonialStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestimonialStats {
    pub total: u64,
    pub pending: u64,
    pub submitted: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl TestimonialStats {
    pub fn record(&mut self, status: TestimonialStatus, count: u64) {
        match status {
            TestimonialStatus::Pending => self.pending += count,
            TestimonialStatus::Submitted => self.submitted += count,
            TestimonialStatus::Approved => self.approved += count,
            TestimonialStatus::Rejected => self.rejected += count,
        }
        self.total += count;
    }
}
