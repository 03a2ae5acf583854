//! Admin authentication middleware.
//!
//! Accepts the session token from the `Authorization` header or the session
//! cookie, validates it with the identity provider and then requires the local
//! user behind it to be an active admin.

use super::{session_token, AdminIdentity};
use crate::AppState;
use actix_service::{Service, Transform};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    web::Data,
    Error, HttpMessage, ResponseError,
};
use folio_error::web::WebError;
use folio_repository::UserRepository;
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use std::{
    cell::RefCell,
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;

const MISSING_TOKEN: &str = "Authentication required";
const INVALID_TOKEN: &str = "Invalid token, please login again";
const NOT_ADMIN: &str = "Admin access required";

pub struct AdminAuthentication;

impl<S, B> Transform<S, ServiceRequest> for AdminAuthentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminAuthenticationMiddleware {
            service: Rc::new(RefCell::new(service)),
        })
    }
}

pub struct AdminAuthenticationMiddleware<S> {
    service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for AdminAuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        async move {
            // Fast path for OPTIONS requests
            if Method::OPTIONS == req.method() {
                return srv.call(req).await.map(|res| res.map_into_left_body());
            }

            let Some(state) = req.app_data::<Data<AppState>>().cloned() else {
                return Err(WebError::InternalError("application state missing".into()).into());
            };

            let Some(token) = session_token(req.request(), &state.auth.cookie_name) else {
                return Ok(reject(req, MISSING_TOKEN));
            };

            let session = match state.identity.session(&token) {
                Ok(session) => session,
                Err(e) => {
                    debug!("Rejected session token: {}", e);
                    return Ok(reject(req, INVALID_TOKEN));
                }
            };

            let user = match UserRepository::find_by_email(&session.email, &state.db).await {
                Ok(Some(user)) if user.is_active_admin() => user,
                Ok(_) => return Ok(reject(req, NOT_ADMIN)),
                Err(e) => return Err(WebError::from(e).into()),
            };

            req.extensions_mut().insert(AdminIdentity {
                user_id: user.id,
                email: user.email,
                name: user.name,
            });

            srv.call(req).await.map(|res| res.map_into_left_body())
        }
        .boxed_local()
    }
}

#[inline]
fn reject<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>> {
    req.into_response(WebError::Unauthorized(message.into()).error_response())
        .map_into_right_body()
}
