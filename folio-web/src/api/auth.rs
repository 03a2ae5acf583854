use crate::AppState;
use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    http::header::SET_COOKIE,
    web, CustomizeResponder, Responder,
};
use actix_web_validator::Json;
use chrono::Utc;
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{LoginRequest, LoginResponse},
    settings::Auth,
    web::WebResponse,
};
use tracing::info;

pub(super) const ROUTER_PREFIX: &str = "/auth";

/// Configure authentication routes
///
/// # Routes
/// - POST `/login`: exchange credentials for a session token and cookie
/// - POST `/logout`: clear the session cookie
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout));
}

/// Login endpoint
///
/// # Endpoint
/// `POST /api/auth/login`
///
/// # Errors
/// - Bad Request (400): missing or malformed email/password
/// - Unauthorized (401): unknown email, wrong password or inactive user
async fn login(
    req: Json<LoginRequest>,
    state: web::Data<AppState>,
) -> WebResult<CustomizeResponder<WebResponse<LoginResponse>>> {
    let req = req.into_inner();
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(WebError::BadRequest("email and password are required".into()));
    };

    let login = state.identity.login(&email, &password).await?;
    let cookie = session_cookie(&state.auth, login.token.clone(), login.expires_at);
    Ok(WebResponse::ok(login)
        .customize()
        .append_header((SET_COOKIE, cookie.to_string())))
}

/// Logout endpoint
///
/// # Endpoint
/// `POST /api/auth/logout`
///
/// Tokens are stateless; logging out only removes the browser cookie.
async fn logout(state: web::Data<AppState>) -> CustomizeResponder<WebResponse<bool>> {
    let mut cookie = session_cookie(&state.auth, String::new(), 0);
    cookie.make_removal();
    info!("Session cookie cleared");
    WebResponse::ok(true)
        .customize()
        .append_header((SET_COOKIE, cookie.to_string()))
}

fn session_cookie(auth: &Auth, token: String, expires_at: i64) -> Cookie<'static> {
    let max_age = (expires_at - Utc::now().timestamp()).max(0);
    Cookie::build(auth.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .secure(auth.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age))
        .finish()
}
