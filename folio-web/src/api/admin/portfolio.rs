//! Portfolio management API endpoints

use crate::{middleware::RequestContext, AppState};
use actix_web::web;
use actix_web_validator::{Json, Path, Query};
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        ChangePublicationStatus, NewPortfolio, PageWithStats, PathId, PortfolioPageParams,
        StatusStats, UpdatePortfolio,
    },
    entities::prelude::PortfolioModel,
    enums::common::EntityType,
    web::WebResponse,
};
use folio_repository::PortfolioRepository;

pub(super) const ROUTER_PREFIX: &str = "/portfolio";

/// Configure portfolio routes
///
/// # Routes
/// - POST ``: Create a portfolio
/// - PUT ``: Update a portfolio
/// - GET `/page`: Paginated list with status counts
/// - GET `/detail/{id}`: Portfolio by id
/// - PUT `/change-status`: Publish, unpublish or archive
/// - DELETE `/{id}`: Delete a portfolio
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("", web::put().to(update))
        .route("/page", web::get().to(page))
        .route("/detail/{id}", web::get().to(get_by_id))
        .route("/change-status", web::put().to(change_status))
        .route("/{id}", web::delete().to(delete));
}

/// Retrieve paginated list of portfolio entries
///
/// # Endpoint
/// `GET /api/admin/portfolio/page`
///
/// # Parameters
/// - `page`, `pageSize`: pagination
/// - `search`: matches title, client, category and summary
/// - `status`: publication status filter
/// - `featured`: only (un)featured projects
/// - `category`: exact category
async fn page(
    params: Query<PortfolioPageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageWithStats<PortfolioModel, StatusStats>>> {
    Ok(WebResponse::ok(
        PortfolioRepository::page(&params, &state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PortfolioModel>> {
    Ok(WebResponse::ok(
        PortfolioRepository::find_by_id(params.id, &state.db)
            .await?
            .ok_or(WebError::NotFound(EntityType::Portfolio.to_string()))?,
    ))
}

/// Create a new portfolio entry
///
/// # Endpoint
/// `POST /api/admin/portfolio`
///
/// # Errors
/// - Bad Request (400): invalid payload or a title without any slug characters
/// - Conflict (409): slug already taken
async fn create(
    item: Json<NewPortfolio>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PortfolioModel>> {
    let model = item
        .into_inner()
        .into_active_model(Some(ctx.admin()?.user_id))
        .map_err(WebError::BadRequest)?;
    Ok(WebResponse::ok(
        PortfolioRepository::create(model, &state.db).await?,
    ))
}

async fn update(
    item: Json<UpdatePortfolio>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PortfolioModel>> {
    Ok(WebResponse::ok(
        PortfolioRepository::update(item.into_inner(), &state.db).await?,
    ))
}

async fn change_status(
    req: Json<ChangePublicationStatus>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PortfolioModel>> {
    Ok(WebResponse::ok(
        PortfolioRepository::change_status(req.id, req.status, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<AppState>) -> WebResult<WebResponse<bool>> {
    PortfolioRepository::delete(params.id, &state.db).await?;
    Ok(WebResponse::ok(true))
}
