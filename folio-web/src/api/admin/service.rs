//! Service management API endpoints

use crate::{middleware::RequestContext, AppState};
use actix_web::web;
use actix_web_validator::{Json, Path, Query};
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        ChangePublicationStatus, NewService, PageWithStats, PathId, ServicePageParams,
        StatusStats, UpdateService,
    },
    entities::prelude::ServiceModel,
    enums::common::EntityType,
    web::WebResponse,
};
use folio_repository::ServiceRepository;

pub(super) const ROUTER_PREFIX: &str = "/service";

/// Configure service routes
///
/// # Routes
/// - POST ``: Create a service
/// - PUT ``: Update a service
/// - GET `/page`: Paginated list with status counts
/// - GET `/detail/{id}`: Service by id
/// - PUT `/change-status`: Publish, unpublish or archive
/// - DELETE `/{id}`: Delete a service
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("", web::put().to(update))
        .route("/page", web::get().to(page))
        .route("/detail/{id}", web::get().to(get_by_id))
        .route("/change-status", web::put().to(change_status))
        .route("/{id}", web::delete().to(delete));
}

/// Retrieve paginated list of services
///
/// # Endpoint
/// `GET /api/admin/service/page`
///
/// # Parameters
/// - `page`, `pageSize`: pagination
/// - `search`: matches title, slug and summary
/// - `status`: publication status filter
async fn page(
    params: Query<ServicePageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageWithStats<ServiceModel, StatusStats>>> {
    Ok(WebResponse::ok(
        ServiceRepository::page(&params, &state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<ServiceModel>> {
    Ok(WebResponse::ok(
        ServiceRepository::find_by_id(params.id, &state.db)
            .await?
            .ok_or(WebError::NotFound(EntityType::Service.to_string()))?,
    ))
}

/// Create a new service
///
/// # Endpoint
/// `POST /api/admin/service`
///
/// # Errors
/// - Bad Request (400): invalid payload or a title without any slug characters
/// - Conflict (409): slug already taken
async fn create(
    item: Json<NewService>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<ServiceModel>> {
    let model = item
        .into_inner()
        .into_active_model(Some(ctx.admin()?.user_id))
        .map_err(WebError::BadRequest)?;
    Ok(WebResponse::ok(
        ServiceRepository::create(model, &state.db).await?,
    ))
}

async fn update(
    item: Json<UpdateService>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<ServiceModel>> {
    Ok(WebResponse::ok(
        ServiceRepository::update(item.into_inner(), &state.db).await?,
    ))
}

async fn change_status(
    req: Json<ChangePublicationStatus>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<ServiceModel>> {
    Ok(WebResponse::ok(
        ServiceRepository::change_status(req.id, req.status, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<AppState>) -> WebResult<WebResponse<bool>> {
    ServiceRepository::delete(params.id, &state.db).await?;
    Ok(WebResponse::ok(true))
}
