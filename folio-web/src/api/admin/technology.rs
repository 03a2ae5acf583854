//! Technology management API endpoints

use crate::{middleware::RequestContext, AppState};
use actix_web::web;
use actix_web_validator::{Json, Path, Query};
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        ChangePublicationStatus, NewTechnology, PageWithStats, PathId, TechnologyPageParams,
        StatusStats, UpdateTechnology,
    },
    entities::prelude::TechnologyModel,
    enums::common::EntityType,
    web::WebResponse,
};
use folio_repository::TechnologyRepository;

pub(super) const ROUTER_PREFIX: &str = "/technology";

/// Same surface as the other content modules; `name` and `slug` are both unique.
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("", web::put().to(update))
        .route("/page", web::get().to(page))
        .route("/detail/{id}", web::get().to(get_by_id))
        .route("/change-status", web::put().to(change_status))
        .route("/{id}", web::delete().to(delete));
}

/// Retrieve paginated list of technologys
///
/// # Endpoint
/// `GET /api/admin/technology/page`
///
/// # Parameters
/// - `page`, `pageSize`: pagination
/// - `search`: matches name and category
/// - `status`: publication status filter
/// - `category`: exact category
async fn page(
    params: Query<TechnologyPageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageWithStats<TechnologyModel, StatusStats>>> {
    Ok(WebResponse::ok(
        TechnologyRepository::page(&params, &state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TechnologyModel>> {
    Ok(WebResponse::ok(
        TechnologyRepository::find_by_id(params.id, &state.db)
            .await?
            .ok_or(WebError::NotFound(EntityType::Technology.to_string()))?,
    ))
}

/// Create a new technology
///
/// # Endpoint
/// `POST /api/admin/technology`
///
/// # Errors
/// - Bad Request (400): invalid payload or a name without any slug characters
/// - Conflict (409): slug already taken
async fn create(
    item: Json<NewTechnology>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TechnologyModel>> {
    let model = item
        .into_inner()
        .into_active_model(Some(ctx.admin()?.user_id))
        .map_err(WebError::BadRequest)?;
    Ok(WebResponse::ok(
        TechnologyRepository::create(model, &state.db).await?,
    ))
}

async fn update(
    item: Json<UpdateTechnology>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TechnologyModel>> {
    Ok(WebResponse::ok(
        TechnologyRepository::update(item.into_inner(), &state.db).await?,
    ))
}

async fn change_status(
    req: Json<ChangePublicationStatus>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TechnologyModel>> {
    Ok(WebResponse::ok(
        TechnologyRepository::change_status(req.id, req.status, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<AppState>) -> WebResult<WebResponse<bool>> {
    TechnologyRepository::delete(params.id, &state.db).await?;
    Ok(WebResponse::ok(true))
}
