use crate::enums::common::{PublicationStatus, TestimonialStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonial")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_name: String,
    pub client_email: String,
    pub client_company: Option<String>,
    pub client_position: Option<String>,
    /// Empty until the client submits the form.
    pub content: String,
    pub rating: Option<i16>,
    /// Secret embedded in the client form link.
    #[sea_orm(unique)]
    pub token: String,
    pub status: TestimonialStatus,
    pub publication_status: PublicationStatus,
    pub reminder_count: i32,
    pub last_reminder_at: Option<DateTimeUtc>,
    pub submitted_at: Option<DateTimeUtc>,
    pub approved_at: Option<DateTimeUtc>,
    pub created_by: Option<i32>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

impl Model {
    /// Approved by an admin and switched to published.
    #[inline]
    pub fn is_public(&self) -> bool {
        self.status == TestimonialStatus::Approved && self.publication_status.is_public()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
