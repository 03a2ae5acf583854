use super::common::{deserialize_option_bool_from_anything, PageParams};
use crate::{
    entities::user::{ActiveModel, Model as UserModel},
    enums::common::UserRole,
};
use chrono::{DateTime, Utc};
use sea_orm::{DeriveIntoActiveModel, DerivePartialModel, FromQueryResult, ModelTrait};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPageParams {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "deserialize_option_bool_from_anything")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    #[validate(nested)]
    pub page: PageParams,
}

/// User information without credentials
#[derive(Debug, Clone, Serialize, Deserialize, DerivePartialModel, FromQueryResult)]
#[serde(rename_all = "camelCase")]
#[sea_orm(entity = "<crate::entities::prelude::UserModel as ModelTrait>::Entity")]
pub struct UserInfo {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserModel> for UserInfo {
    fn from(user: UserModel) -> Self {
        UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Provisioning request accepted by the admin API.
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "name length must be 1..=100"))]
    pub name: String,
    #[validate(length(min = 8, max = 128, message = "password length must be 8..=128"))]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Row written by the identity provider once the password is hashed.
#[derive(Clone, Debug, PartialEq, DeriveIntoActiveModel)]
pub struct NewUserHashed {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl NewUser {
    pub fn with_hash(self, password: String) -> NewUserHashed {
        NewUserHashed {
            email: self.email.trim().to_lowercase(),
            name: self.name,
            password,
            role: self.role,
            is_active: self.is_active,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveIntoActiveModel, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUserStatus {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveIntoActiveModel, Validate, Deserialize)]
pub struct ChangeUserRole {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    pub role: UserRole,
}
