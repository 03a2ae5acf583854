//! User management API endpoints

use crate::{middleware::RequestContext, AppState};
use actix_web::web;
use actix_web_validator::{Json, Query};
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        ChangeUserRole, ChangeUserStatus, NewUser, PageResult, UserInfo, UserPageParams,
    },
    entities::prelude::UserModel,
    enums::common::{EntityType, UserRole},
    web::WebResponse,
};
use folio_repository::UserRepository;

pub(super) const ROUTER_PREFIX: &str = "/user";

/// Configure user routes
///
/// # Routes
/// - POST ``: Provision a user through the identity provider
/// - GET `/page`: Paginated user list
/// - PUT `/change-status`: Activate or deactivate a user
/// - PUT `/change-role`: Change a user's role
/// - GET `/userinfo`: The calling admin
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("/page", web::get().to(page))
        .route("/change-status", web::put().to(change_status))
        .route("/change-role", web::put().to(change_role))
        .route("/userinfo", web::get().to(get_user_info));
}

/// Retrieve paginated list of users
///
/// # Endpoint
/// `GET /api/admin/user/page`
///
/// # Parameters
/// - `search`: matches email and name
/// - `role`: `ADMIN` or `USER`
/// - `isActive`: active flag
async fn page(
    params: Query<UserPageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageResult<UserInfo>>> {
    Ok(WebResponse::ok(state.identity.list_users(&params).await?))
}

async fn create(
    user: Json<NewUser>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<UserInfo>> {
    let user = state.identity.create_user(user.into_inner()).await?;
    Ok(WebResponse::ok(user.into()))
}

/// Change user status
///
/// # Endpoint
/// `PUT /api/admin/user/change-status`
///
/// # Errors
/// - Bad Request (400): deactivating yourself or the last active admin
async fn change_status(
    req: Json<ChangeUserStatus>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<UserInfo>> {
    if !req.is_active {
        if req.id == ctx.admin()?.user_id {
            return Err(WebError::BadRequest(
                "You cannot deactivate your own account".into(),
            ));
        }
        ensure_admin_remains(req.id, &state).await?;
    }
    let user = UserRepository::change_status(req.id, req.is_active, &state.db).await?;
    Ok(WebResponse::ok(user.into()))
}

/// Change user role
///
/// # Endpoint
/// `PUT /api/admin/user/change-role`
///
/// # Errors
/// - Bad Request (400): demoting yourself or the last active admin
async fn change_role(
    req: Json<ChangeUserRole>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<UserInfo>> {
    if !req.role.is_admin() {
        if req.id == ctx.admin()?.user_id {
            return Err(WebError::BadRequest("You cannot demote yourself".into()));
        }
        ensure_admin_remains(req.id, &state).await?;
    }
    let user = UserRepository::change_role(req.id, req.role, &state.db).await?;
    Ok(WebResponse::ok(user.into()))
}

async fn get_user_info(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<UserInfo>> {
    let user = load(ctx.admin()?.user_id, &state).await?;
    Ok(WebResponse::ok(user.into()))
}

/// Refuses to take away the only remaining active admin.
async fn ensure_admin_remains(id: i32, state: &AppState) -> WebResult<()> {
    let target = load(id, state).await?;
    if target.role == UserRole::Admin
        && target.is_active
        && UserRepository::count_active_admins(&state.db).await? <= 1
    {
        return Err(WebError::BadRequest(
            "At least one active admin is required".into(),
        ));
    }
    Ok(())
}

async fn load(id: i32, state: &AppState) -> WebResult<UserModel> {
    UserRepository::find_by_id(id, &state.db)
        .await?
        .ok_or(WebError::NotFound(EntityType::User.to_string()))
}
