mod common;

use common::setup_db;
use folio_models::{
    domain::prelude::UpdateSiteConfig, entities::prelude::SiteConfig,
    maintenance::MaintenanceSource,
};
use folio_repository::{SiteConfigRepository, SiteMaintenanceSource};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn get_or_create_creates_exactly_one_row() {
    let db = setup_db().await;
    SiteConfig::delete_many().exec(&db).await.unwrap();

    let first = SiteConfigRepository::get_or_create(&db).await.unwrap();
    let second = SiteConfigRepository::get_or_create(&db).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(first, second);
    assert!(!first.maintenance_mode);
    assert_eq!(SiteConfig::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn maintenance_toggle_is_visible_to_the_gate_source() {
    let db = setup_db().await;
    let source = SiteMaintenanceSource::new(db.clone());
    assert!(!source.maintenance_mode().await.unwrap());

    let config = SiteConfigRepository::set_maintenance(true, Some("Back soon".into()), &db)
        .await
        .unwrap();
    assert!(config.maintenance_mode);
    assert_eq!(config.maintenance_message.as_deref(), Some("Back soon"));
    assert!(source.maintenance_mode().await.unwrap());

    // No message keeps the stored one.
    let config = SiteConfigRepository::set_maintenance(false, None, &db)
        .await
        .unwrap();
    assert!(!config.maintenance_mode);
    assert_eq!(config.maintenance_message.as_deref(), Some("Back soon"));
    assert!(!source.maintenance_mode().await.unwrap());
}

#[tokio::test]
async fn partial_update_touches_only_given_fields() {
    let db = setup_db().await;
    let changes: UpdateSiteConfig = serde_json::from_value(serde_json::json!({
        "siteName": "Acme Studio",
        "tagline": "We build things",
        "socialLinks": { "github": "https://github.com/acme" }
    }))
    .unwrap();

    let config = SiteConfigRepository::update(changes, &db).await.unwrap();
    assert_eq!(config.site_name, "Acme Studio");
    assert_eq!(config.tagline.as_deref(), Some("We build things"));
    assert_eq!(config.primary_color, "#0f172a");

    let clear: UpdateSiteConfig =
        serde_json::from_value(serde_json::json!({ "tagline": null })).unwrap();
    let config = SiteConfigRepository::update(clear, &db).await.unwrap();
    assert_eq!(config.tagline, None);
    assert_eq!(config.site_name, "Acme Studio");
}
