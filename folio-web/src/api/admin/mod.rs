//! Admin CMS API. Every route requires an active admin session.
mod blog;
mod comment;
mod portfolio;
mod service;
mod site_config;
mod technology;
mod testimonial;
mod user;

use crate::middleware::auth::AdminAuthentication;
use actix_web::web;

pub(super) const ROUTER_PREFIX: &str = "/admin";

pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(AdminAuthentication)
            .service(web::scope(user::ROUTER_PREFIX).configure(user::configure_routes))
            .service(
                web::scope(site_config::ROUTER_PREFIX).configure(site_config::configure_routes),
            )
            .service(web::scope(service::ROUTER_PREFIX).configure(service::configure_routes))
            .service(web::scope(portfolio::ROUTER_PREFIX).configure(portfolio::configure_routes))
            .service(
                web::scope(technology::ROUTER_PREFIX).configure(technology::configure_routes),
            )
            .service(web::scope(blog::ROUTER_PREFIX).configure(blog::configure_routes))
            .service(web::scope(comment::ROUTER_PREFIX).configure(comment::configure_routes))
            .service(
                web::scope(testimonial::ROUTER_PREFIX).configure(testimonial::configure_routes),
            ),
    );
}
