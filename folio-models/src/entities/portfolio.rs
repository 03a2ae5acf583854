use super::StringList;
use crate::enums::common::PublicationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub client: Option<String>,
    pub category: String,
    pub summary: String,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub project_url: Option<String>,
    pub tags: StringList,
    pub featured: bool,
    pub sort_order: i32,
    pub status: PublicationStatus,
    pub completed_at: Option<Date>,
    pub created_by: Option<i32>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
