//! Router module for handling all API routes

mod admin;
mod auth;
mod health;
mod maintenance;
mod public;

use actix_web::web;

/// Routes mounted under the API router prefix (default `/api`).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(auth::ROUTER_PREFIX).configure(auth::configure_routes))
        .service(web::scope(maintenance::ROUTER_PREFIX).configure(maintenance::configure_routes))
        .service(web::scope(public::ROUTER_PREFIX).configure(public::configure_routes))
        .service(web::scope(admin::ROUTER_PREFIX).configure(admin::configure_routes));
}

/// Routes registered at the root scope, outside the API prefix.
pub fn configure_root_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_health_routes);
}
