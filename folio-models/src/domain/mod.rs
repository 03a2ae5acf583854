mod auth;
mod blog_comment;
mod blog_post;
mod common;
#[allow(clippy::needless_update)]
mod portfolio;
pub mod prelude;
#[allow(clippy::needless_update)]
mod service;
mod site_config;
#[allow(clippy::needless_update)]
mod technology;
mod testimonial;
mod user;
