//! Anonymous read endpoints for the marketing site, plus the two visitor
//! submissions (blog comments and testimonial answers).
//!
//! Every handler takes [`SiteAccess`], so the maintenance decision is applied
//! even when the gate middleware is not mounted. Reads degrade to an empty
//! list when the database misbehaves.

use crate::{middleware::SiteAccess, AppState};
use actix_web::{web, HttpResponse};
use actix_web_validator::Json;
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        NewBlogComment, PathSlug, PathToken, PublicBlogPost, PublicBlogPostDetail, PublicComment,
        PublicPortfolioQuery, PublicSiteConfig, PublicTestimonial, SubmitTestimonial,
        TestimonialForm,
    },
    entities::prelude::{BlogCommentModel, PortfolioModel, ServiceModel, TechnologyModel},
    enums::common::EntityType,
    web::WebResponse,
};
use folio_repository::{
    BlogCommentRepository, BlogPostRepository, PortfolioRepository, ServiceRepository,
    SiteConfigRepository, TechnologyRepository, TestimonialRepository,
};
use serde_json::json;
use std::fmt::Display;
use tracing::{error, info};

pub(super) const ROUTER_PREFIX: &str = "/public";

pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/site-config", web::get().to(site_config))
        .route("/services", web::get().to(services))
        .route("/portfolio", web::get().to(portfolio))
        .route("/technologies", web::get().to(technologies))
        .route("/blog", web::get().to(blog_posts))
        .route("/blog/{slug}", web::get().to(blog_post))
        .route("/blog/{slug}/comments", web::get().to(comments))
        .route("/blog/{slug}/comments", web::post().to(create_comment))
        .route("/testimonials", web::get().to(testimonials))
        .route("/testimonials/request/{token}", web::get().to(testimonial_form))
        .route("/testimonials/submit", web::post().to(submit_testimonial));
}

/// Logs a failed read and hands back an empty list.
fn degrade<T>(what: &str, e: impl Display) -> Vec<T> {
    error!("Failed to load public {}: {}", what, e);
    Vec::new()
}

/// `GET /api/public/site-config`
async fn site_config(_access: SiteAccess, state: web::Data<AppState>) -> HttpResponse {
    match SiteConfigRepository::get_or_create(&state.db).await {
        Ok(config) => HttpResponse::Ok().json(PublicSiteConfig::from(config)),
        Err(e) => {
            error!("Failed to load site config: {}", e);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to load site configuration" }))
        }
    }
}

async fn services(_access: SiteAccess, state: web::Data<AppState>) -> web::Json<Vec<ServiceModel>> {
    web::Json(
        ServiceRepository::find_published(&state.db)
            .await
            .unwrap_or_else(|e| degrade("services", e)),
    )
}

/// `GET /api/public/portfolio?featured=true`
async fn portfolio(
    _access: SiteAccess,
    query: web::Query<PublicPortfolioQuery>,
    state: web::Data<AppState>,
) -> web::Json<Vec<PortfolioModel>> {
    web::Json(
        PortfolioRepository::find_published(query.featured, &state.db)
            .await
            .unwrap_or_else(|e| degrade("portfolio", e)),
    )
}

async fn technologies(
    _access: SiteAccess,
    state: web::Data<AppState>,
) -> web::Json<Vec<TechnologyModel>> {
    web::Json(
        TechnologyRepository::find_published(&state.db)
            .await
            .unwrap_or_else(|e| degrade("technologies", e)),
    )
}

async fn blog_posts(
    _access: SiteAccess,
    state: web::Data<AppState>,
) -> web::Json<Vec<PublicBlogPost>> {
    let posts = match BlogPostRepository::find_published(&state.db).await {
        Ok(posts) => posts.into_iter().map(PublicBlogPost::from).collect(),
        Err(e) => degrade("blog posts", e),
    };
    web::Json(posts)
}

/// `GET /api/public/blog/{slug}`. Drafts and archived posts are not found.
async fn blog_post(
    _access: SiteAccess,
    params: web::Path<PathSlug>,
    state: web::Data<AppState>,
) -> WebResult<web::Json<PublicBlogPostDetail>> {
    let (post, author) = BlogPostRepository::find_published_by_slug(&params.slug, &state.db)
        .await?
        .ok_or(WebError::NotFound(EntityType::BlogPost.to_string()))?;
    let content = post.content.clone();
    Ok(web::Json(PublicBlogPostDetail {
        summary: post.into(),
        content,
        author_name: author.map(|a| a.name),
    }))
}

/// `GET /api/public/blog/{slug}/comments`, approved comments only.
async fn comments(
    _access: SiteAccess,
    params: web::Path<PathSlug>,
    state: web::Data<AppState>,
) -> WebResult<web::Json<Vec<PublicComment>>> {
    let post_id = match BlogPostRepository::find_published_by_slug(&params.slug, &state.db).await
    {
        Ok(Some((post, _))) => post.id,
        Ok(None) => return Err(WebError::NotFound(EntityType::BlogPost.to_string())),
        Err(e) => return Ok(web::Json(degrade("comments", e))),
    };
    let comments = match BlogCommentRepository::find_approved_by_post(post_id, &state.db).await {
        Ok(comments) => comments.into_iter().map(PublicComment::from).collect(),
        Err(e) => degrade("comments", e),
    };
    Ok(web::Json(comments))
}

/// Post a comment
///
/// # Endpoint
/// `POST /api/public/blog/{slug}/comments`
///
/// The comment is stored unapproved and only shows up once an admin approves it.
///
/// # Returns
/// `201 Created` with the stored comment
async fn create_comment(
    _access: SiteAccess,
    params: web::Path<PathSlug>,
    comment: Json<NewBlogComment>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<BlogCommentModel>> {
    let (post, _) = BlogPostRepository::find_published_by_slug(&params.slug, &state.db)
        .await?
        .ok_or(WebError::NotFound(EntityType::BlogPost.to_string()))?;
    let comment = comment.into_inner().into_active_model(post.id);
    let comment = BlogCommentRepository::create(comment, &state.db).await?;
    info!(post_id = post.id, comment_id = comment.id, "Comment awaiting moderation");
    Ok(WebResponse::created(comment))
}

async fn testimonials(
    _access: SiteAccess,
    state: web::Data<AppState>,
) -> web::Json<Vec<PublicTestimonial>> {
    let testimonials = match TestimonialRepository::find_public(&state.db).await {
        Ok(list) => list.into_iter().map(PublicTestimonial::from).collect(),
        Err(e) => degrade("testimonials", e),
    };
    web::Json(testimonials)
}

/// `GET /api/public/testimonials/request/{token}`
///
/// 404 for an unknown token, 400 once the form has been answered.
async fn testimonial_form(
    _access: SiteAccess,
    params: web::Path<PathToken>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialForm>> {
    let testimonial = TestimonialRepository::find_open_by_token(&params.token, &state.db).await?;
    Ok(WebResponse::ok(testimonial.into()))
}

async fn submit_testimonial(
    _access: SiteAccess,
    answer: Json<SubmitTestimonial>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<()>> {
    TestimonialRepository::submit(answer.into_inner(), &state.db).await?;
    Ok(WebResponse::ok_with_message("Thank you for your testimonial", ()))
}
