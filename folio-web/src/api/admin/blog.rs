//! Blog post management API endpoints

use crate::{middleware::RequestContext, AppState};
use actix_web::web;
use actix_web_validator::{Json, Path, Query};
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        BlogPostPageParams, ChangePublicationStatus, NewBlogPost, PageWithStats, PathId,
        StatusStats, UpdateBlogPost,
    },
    entities::prelude::BlogPostModel,
    enums::common::EntityType,
    web::WebResponse,
};
use folio_repository::BlogPostRepository;

pub(super) const ROUTER_PREFIX: &str = "/blog";

/// Configure blog post routes
///
/// # Routes
/// - POST ``: Create a post authored by the calling admin
/// - PUT ``: Update a post
/// - GET `/page`: Paginated list with status counts
/// - GET `/detail/{id}`: Post by id
/// - PUT `/change-status`: Publish, unpublish or archive
/// - DELETE `/{id}`: Delete a post and its comments
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("", web::put().to(update))
        .route("/page", web::get().to(page))
        .route("/detail/{id}", web::get().to(get_by_id))
        .route("/change-status", web::put().to(change_status))
        .route("/{id}", web::delete().to(delete));
}

/// Retrieve paginated list of blog posts
///
/// # Endpoint
/// `GET /api/admin/blog/page`
///
/// # Parameters
/// - `search`: matches title, slug and excerpt
/// - `status`, `authorId`, `tag`: exact filters
async fn page(
    params: Query<BlogPostPageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageWithStats<BlogPostModel, StatusStats>>> {
    Ok(WebResponse::ok(
        BlogPostRepository::page(&params, &state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<BlogPostModel>> {
    Ok(WebResponse::ok(
        BlogPostRepository::find_by_id(params.id, &state.db)
            .await?
            .ok_or(WebError::NotFound(EntityType::BlogPost.to_string()))?,
    ))
}

async fn create(
    post: Json<NewBlogPost>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<BlogPostModel>> {
    let model = post
        .into_inner()
        .into_active_model(Some(ctx.admin()?.user_id))
        .map_err(WebError::BadRequest)?;
    Ok(WebResponse::ok(
        BlogPostRepository::create(model, &state.db).await?,
    ))
}

/// Update a post
///
/// `publishedAt` is stamped the first time the post is published.
async fn update(
    post: Json<UpdateBlogPost>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<BlogPostModel>> {
    Ok(WebResponse::ok(
        BlogPostRepository::update(post.into_inner(), &state.db).await?,
    ))
}

async fn change_status(
    req: Json<ChangePublicationStatus>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<BlogPostModel>> {
    Ok(WebResponse::ok(
        BlogPostRepository::change_status(req.id, req.status, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<AppState>) -> WebResult<WebResponse<bool>> {
    BlogPostRepository::delete(params.id, &state.db).await?;
    Ok(WebResponse::ok(true))
}
