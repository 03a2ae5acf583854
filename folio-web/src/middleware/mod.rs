pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod maintenance;

use crate::AppState;
use actix_web::{
    dev::Payload,
    error::InternalError,
    http::header::{self, ACCEPT, AUTHORIZATION},
    web::Data,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use folio_error::web::WebError;
use folio_models::{
    constants::BEARER_TOKEN,
    domain::prelude::Session,
    maintenance::{decide_access, AccessDecision, AllowReason},
};
use futures::future::{ready, LocalBoxFuture, Ready};

/// Admin resolved by [`auth::AdminAuthentication`] for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub user_id: i32,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub admin: Option<AdminIdentity>,
}

impl RequestContext {
    /// The authenticated admin; missing only on routes outside the admin scope.
    pub fn admin(&self) -> Result<&AdminIdentity, WebError> {
        self.admin
            .as_ref()
            .ok_or_else(|| WebError::Unauthorized("Authentication required".into()))
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(RequestContext {
            admin: req.extensions().get::<AdminIdentity>().cloned(),
        }))
    }
}

/// Guard for public content handlers: evaluates the maintenance decision for the
/// request path and rejects with the gate's redirect response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteAccess(pub AllowReason);

impl FromRequest for SiteAccess {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let Some(state) = req.app_data::<Data<AppState>>().cloned() else {
                return Err(WebError::InternalError("application state missing".into()).into());
            };
            let session = current_session(&req, &state);
            let source = state.maintenance_source();
            match decide_access(&state.policy, req.path(), session.as_ref(), &source).await {
                AccessDecision::Allow(reason) => Ok(SiteAccess(reason)),
                AccessDecision::Redirect(to) => Err(InternalError::from_response(
                    WebError::Maintenance {
                        redirect: to.clone(),
                    },
                    maintenance_response(&req, &to),
                )
                .into()),
            }
        })
    }
}

/// Session token from `Authorization: Bearer …`, falling back to the session cookie.
pub(crate) fn session_token(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_TOKEN))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    bearer.or_else(|| {
        req.cookie(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Valid session of the caller, if any. Invalid tokens count as anonymous.
pub(crate) fn current_session(req: &HttpRequest, state: &AppState) -> Option<Session> {
    let token = session_token(req, &state.auth.cookie_name)?;
    state.identity.session(&token).ok()
}

/// JSON callers get `503` with the redirect target; browsers get a `307`.
pub(crate) fn maintenance_response(req: &HttpRequest, redirect: &str) -> HttpResponse {
    if wants_json(req) {
        WebError::Maintenance {
            redirect: redirect.to_string(),
        }
        .error_response()
    } else {
        HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, redirect))
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

fn wants_json(req: &HttpRequest) -> bool {
    let path = req.path();
    let api_path = path == "/api" || path.starts_with("/api/");
    api_path
        || req
            .headers()
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, http::StatusCode, test::TestRequest};

    #[test]
    fn bearer_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .cookie(Cookie::new("folio_session", "from-cookie"))
            .to_http_request();
        assert_eq!(session_token(&req, "folio_session").as_deref(), Some("abc"));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new("folio_session", "from-cookie"))
            .to_http_request();
        assert_eq!(
            session_token(&req, "folio_session").as_deref(),
            Some("from-cookie")
        );
        assert_eq!(session_token(&req, "other"), None);
    }

    #[test]
    fn empty_bearer_is_ignored() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert_eq!(session_token(&req, "folio_session"), None);
    }

    #[test]
    fn browsers_are_redirected_api_callers_get_503() {
        let page = TestRequest::with_uri("/about").to_http_request();
        let resp = maintenance_response(&page, "/maintenance");
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/maintenance");

        let api = TestRequest::with_uri("/api/public/services").to_http_request();
        assert_eq!(
            maintenance_response(&api, "/maintenance").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let json = TestRequest::with_uri("/about")
            .insert_header((ACCEPT, "application/json"))
            .to_http_request();
        assert_eq!(
            maintenance_response(&json, "/maintenance").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );

        let lookalike = TestRequest::with_uri("/apix").to_http_request();
        assert_eq!(
            maintenance_response(&lookalike, "/maintenance").status(),
            StatusCode::TEMPORARY_REDIRECT
        );
    }
}
