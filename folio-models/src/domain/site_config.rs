//! Site-wide configuration domain models.
//!
//! The configuration is persisted as a **single row** (id = 1). It carries the
//! maintenance flag alongside branding, SEO defaults and contact information.

use crate::{
    constants::SITE_CONFIG_SINGLETON_ID,
    entities::site_config::{ActiveModel, Entity as SiteConfigEntity, Model as SiteConfigModel},
    initializer::SeedableTrait,
};
use chrono::{DateTime, Utc};
use sea_orm::{DeriveIntoActiveModel, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use validator::{Validate, ValidationError};

const DEFAULT_SITE_NAME: &str = "Folio";
const DEFAULT_PRIMARY_COLOR: &str = "#0f172a";
const DEFAULT_SECONDARY_COLOR: &str = "#38bdf8";

/// Public subset of the configuration, safe to expose to anonymous visitors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSiteConfig {
    pub site_name: String,
    pub tagline: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub seo_title: String,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub og_image_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_address: Option<String>,
    pub social_links: Option<Json>,
    pub maintenance_mode: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SiteConfigModel> for PublicSiteConfig {
    fn from(model: SiteConfigModel) -> Self {
        Self {
            site_name: model.site_name,
            tagline: model.tagline,
            logo_url: model.logo_url,
            favicon_url: model.favicon_url,
            primary_color: model.primary_color,
            secondary_color: model.secondary_color,
            seo_title: model.seo_title,
            seo_description: model.seo_description,
            seo_keywords: model.seo_keywords,
            og_image_url: model.og_image_url,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            contact_address: model.contact_address,
            social_links: model.social_links,
            maintenance_mode: model.maintenance_mode,
            updated_at: model.updated_at,
        }
    }
}

/// Body of `GET /api/maintenance/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatus {
    pub maintenance_mode: bool,
}

/// Body of `GET /api/maintenance/banner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceBanner {
    pub maintenance_mode: bool,
    /// Only active admins browsing a site in maintenance see the banner.
    pub show_banner: bool,
}

/// Admin toggle for the maintenance flag.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleMaintenance {
    pub enabled: bool,
    #[validate(length(max = 500, message = "message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// Partial update of branding, SEO, contact and social settings.
///
/// Absent fields are left untouched. Nullable fields accept `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteConfig {
    #[validate(length(min = 1, max = 100, message = "siteName length must be 1..=100"))]
    pub site_name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub tagline: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub logo_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub favicon_url: Option<Option<String>>,
    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub secondary_color: Option<String>,
    #[validate(length(min = 1, max = 70, message = "seoTitle length must be 1..=70"))]
    pub seo_title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub seo_description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub seo_keywords: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub og_image_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub contact_address: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub social_links: Option<Option<Json>>,
}

impl UpdateSiteConfig {
    /// Copy every provided field onto the active model.
    pub fn apply(self, active: &mut ActiveModel) {
        if let Some(v) = self.site_name {
            active.site_name = Set(v);
        }
        if let Some(v) = self.tagline {
            active.tagline = Set(v);
        }
        if let Some(v) = self.logo_url {
            active.logo_url = Set(v);
        }
        if let Some(v) = self.favicon_url {
            active.favicon_url = Set(v);
        }
        if let Some(v) = self.primary_color {
            active.primary_color = Set(v);
        }
        if let Some(v) = self.secondary_color {
            active.secondary_color = Set(v);
        }
        if let Some(v) = self.seo_title {
            active.seo_title = Set(v);
        }
        if let Some(v) = self.seo_description {
            active.seo_description = Set(v);
        }
        if let Some(v) = self.seo_keywords {
            active.seo_keywords = Set(v);
        }
        if let Some(v) = self.og_image_url {
            active.og_image_url = Set(v);
        }
        if let Some(v) = self.contact_email {
            active.contact_email = Set(v);
        }
        if let Some(v) = self.contact_phone {
            active.contact_phone = Set(v);
        }
        if let Some(v) = self.contact_address {
            active.contact_address = Set(v);
        }
        if let Some(v) = self.social_links {
            active.social_links = Set(v);
        }
    }

    /// Cross-field checks the derive cannot express.
    pub fn check(&self) -> Result<(), String> {
        if let Some(Some(email)) = &self.contact_email {
            if !validator::ValidateEmail::validate_email(email) {
                return Err("contactEmail is invalid".into());
            }
        }
        if let Some(Some(links)) = &self.social_links {
            let valid = links
                .as_object()
                .is_some_and(|map| map.values().all(|v| v.is_string()));
            if !valid {
                return Err("socialLinks must map network names to URLs".into());
            }
        }
        Ok(())
    }
}

/// Accepts `#rgb` or `#rrggbb`.
fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| ValidationError::new("hex_color"))?;
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("color must be #rgb or #rrggbb".into());
        Err(err)
    }
}

/// Seed/default row for the singleton configuration.
///
/// Used by the database initializer and by `get_or_create` when the row is missing.
#[derive(Clone, Debug, PartialEq, DeriveIntoActiveModel)]
pub struct NewSiteConfigWithId {
    pub id: i32,
    pub maintenance_mode: bool,
    pub site_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub seo_title: String,
}

impl Default for NewSiteConfigWithId {
    fn default() -> Self {
        Self {
            id: SITE_CONFIG_SINGLETON_ID,
            maintenance_mode: false,
            site_name: DEFAULT_SITE_NAME.into(),
            primary_color: DEFAULT_PRIMARY_COLOR.into(),
            secondary_color: DEFAULT_SECONDARY_COLOR.into(),
            seo_title: DEFAULT_SITE_NAME.into(),
        }
    }
}

impl SeedableTrait for NewSiteConfigWithId {
    type ActiveModel = ActiveModel;
    type Entity = SiteConfigEntity;

    #[inline]
    fn get_active_model(&self) -> Self::ActiveModel {
        self.clone().into_active_model()
    }
}
