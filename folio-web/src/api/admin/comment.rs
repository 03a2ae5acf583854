//! Blog comment moderation endpoints

use crate::AppState;
use actix_web::web;
use actix_web_validator::{Json, Path, Query};
use folio_error::WebResult;
use folio_models::{
    domain::prelude::{
        CommentPageParams, ModerateComment, ModerationStats, PageWithStats, PathId,
    },
    entities::prelude::BlogCommentModel,
    web::WebResponse,
};
use folio_repository::BlogCommentRepository;

pub(super) const ROUTER_PREFIX: &str = "/comment";

pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/page", web::get().to(page))
        .route("/{id}", web::patch().to(moderate))
        .route("/{id}", web::delete().to(delete));
}

/// `GET /api/admin/comment/page`, filtered by `postId`, `approved` and `search`.
async fn page(
    params: Query<CommentPageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageWithStats<BlogCommentModel, ModerationStats>>> {
    Ok(WebResponse::ok(
        BlogCommentRepository::page(&params, &state.db).await?,
    ))
}

/// `PATCH /api/admin/comment/{id}` with `{ isApproved }`.
async fn moderate(
    params: Path<PathId>,
    req: Json<ModerateComment>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<BlogCommentModel>> {
    Ok(WebResponse::ok(
        BlogCommentRepository::moderate(params.id, req.is_approved, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<AppState>) -> WebResult<WebResponse<bool>> {
    BlogCommentRepository::delete(params.id, &state.db).await?;
    Ok(WebResponse::ok(true))
}
