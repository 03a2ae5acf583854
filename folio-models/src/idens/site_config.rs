//! Migration identifiers and seeding for the site configuration.
//!
//! The configuration is inserted as a **single row** (id = 1) during database initialization.

use crate::{
    domain::prelude::NewSiteConfigWithId,
    initializer::{
        DataSeederTrait, FolioInitializer, InitContext, SeedableInitializerTrait, SeedableTrait,
    },
};
use folio_macros::SeedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::prelude::*;

#[derive(DeriveIden, SeedableInitializer)]
#[seedable(meta(
    model = NewSiteConfigWithId,
    order = super::INIT_SYSTEM_ORDER,
    create_table = create_site_config_table,
    seed_data = get_site_config_seed_data
))]
pub enum SiteConfig {
    Table,
    Id,
    MaintenanceMode,
    MaintenanceMessage,
    SiteName,
    Tagline,
    LogoUrl,
    FaviconUrl,
    PrimaryColor,
    SecondaryColor,
    SeoTitle,
    SeoDescription,
    SeoKeywords,
    OgImageUrl,
    ContactEmail,
    ContactPhone,
    ContactAddress,
    SocialLinks,
    CreatedAt,
    UpdatedAt,
}

fn create_site_config_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(SiteConfig::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(SiteConfig::Id)
                .integer()
                .not_null()
                .primary_key()
                .comment("Always 1"),
        )
        .col(
            ColumnDef::new(SiteConfig::MaintenanceMode)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(SiteConfig::MaintenanceMessage).text())
        .col(
            ColumnDef::new(SiteConfig::SiteName)
                .string_len(100)
                .not_null(),
        )
        .col(ColumnDef::new(SiteConfig::Tagline).string_len(255))
        .col(ColumnDef::new(SiteConfig::LogoUrl).string_len(500))
        .col(ColumnDef::new(SiteConfig::FaviconUrl).string_len(500))
        .col(
            ColumnDef::new(SiteConfig::PrimaryColor)
                .string_len(16)
                .not_null(),
        )
        .col(
            ColumnDef::new(SiteConfig::SecondaryColor)
                .string_len(16)
                .not_null(),
        )
        .col(ColumnDef::new(SiteConfig::SeoTitle).string_len(70).not_null())
        .col(ColumnDef::new(SiteConfig::SeoDescription).string_len(500))
        .col(ColumnDef::new(SiteConfig::SeoKeywords).string_len(500))
        .col(ColumnDef::new(SiteConfig::OgImageUrl).string_len(500))
        .col(ColumnDef::new(SiteConfig::ContactEmail).string_len(255))
        .col(ColumnDef::new(SiteConfig::ContactPhone).string_len(64))
        .col(ColumnDef::new(SiteConfig::ContactAddress).string_len(500))
        .col(
            ColumnDef::new(SiteConfig::SocialLinks)
                .json()
                .comment("network name -> profile URL"),
        )
        .col(
            ColumnDef::new(SiteConfig::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(SiteConfig::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

async fn get_site_config_seed_data(
    _: &mut InitContext,
) -> Result<Option<Vec<NewSiteConfigWithId>>, DbErr> {
    Ok(Some(vec![NewSiteConfigWithId::default()]))
}
