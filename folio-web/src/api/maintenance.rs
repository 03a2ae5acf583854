//! Client status endpoints for maintenance mode. Both paths are exempt from the gate.

use crate::{middleware::current_session, AppState};
use actix_web::{web, HttpRequest};
use folio_models::{
    domain::prelude::{MaintenanceBanner, MaintenanceStatus},
    maintenance::banner_state,
};
use folio_repository::SiteConfigRepository;
use tracing::warn;

pub(super) const ROUTER_PREFIX: &str = "/maintenance";

pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status))
        .route("/banner", web::get().to(banner));
}

/// `GET /api/maintenance/status`
///
/// Read failures report maintenance as off.
async fn status(state: web::Data<AppState>) -> web::Json<MaintenanceStatus> {
    let maintenance_mode = SiteConfigRepository::maintenance_mode(&state.db)
        .await
        .unwrap_or_else(|e| {
            warn!("Maintenance status lookup failed: {}", e);
            false
        });
    web::Json(MaintenanceStatus { maintenance_mode })
}

/// `GET /api/maintenance/banner`
///
/// `showBanner` is only true for an active admin while maintenance is on.
async fn banner(req: HttpRequest, state: web::Data<AppState>) -> web::Json<MaintenanceBanner> {
    let session = current_session(&req, &state);
    let source = state.maintenance_source();
    web::Json(banner_state(&state.policy, session.as_ref(), &source).await)
}
