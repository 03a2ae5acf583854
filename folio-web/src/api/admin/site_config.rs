//! Site configuration endpoints. The configuration is a single row.

use crate::AppState;
use actix_web::web;
use actix_web_validator::Json;
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{ToggleMaintenance, UpdateSiteConfig},
    entities::prelude::SiteConfigModel,
    web::WebResponse,
};
use folio_repository::SiteConfigRepository;
use tracing::info;

pub(super) const ROUTER_PREFIX: &str = "/site-config";

/// Configure site config routes
///
/// # Routes
/// - GET ``: Full configuration record
/// - PUT ``: Partial update of branding, SEO, contact and social links
/// - PUT `/maintenance`: Toggle maintenance mode
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get))
        .route("", web::put().to(update))
        .route("/maintenance", web::put().to(toggle_maintenance));
}

async fn get(state: web::Data<AppState>) -> WebResult<WebResponse<SiteConfigModel>> {
    Ok(WebResponse::ok(
        SiteConfigRepository::get_or_create(&state.db).await?,
    ))
}

/// Update site configuration
///
/// # Endpoint
/// `PUT /api/admin/site-config`
///
/// Absent fields are untouched; nullable fields accept `null` to clear them.
///
/// # Errors
/// - Bad Request (400): invalid colors, contact email or social links
async fn update(
    req: Json<UpdateSiteConfig>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<SiteConfigModel>> {
    let changes = req.into_inner();
    changes.check().map_err(WebError::BadRequest)?;
    Ok(WebResponse::ok(
        SiteConfigRepository::update(changes, &state.db).await?,
    ))
}

/// Toggle maintenance mode
///
/// # Endpoint
/// `PUT /api/admin/site-config/maintenance`
///
/// An omitted `message` keeps the stored one; a blank message clears it.
async fn toggle_maintenance(
    req: Json<ToggleMaintenance>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<SiteConfigModel>> {
    let req = req.into_inner();
    let config = SiteConfigRepository::set_maintenance(req.enabled, req.message, &state.db).await?;
    info!(enabled = config.maintenance_mode, "Maintenance mode toggled by admin");
    Ok(WebResponse::ok(config))
}
