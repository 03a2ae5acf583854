//! Edge interceptor for maintenance mode.
//!
//! Wraps the whole application. Requests the shared access decision refuses are
//! answered here and never reach a handler.

use super::{current_session, maintenance_response};
use crate::AppState;
use actix_service::{Service, Transform};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    web::Data,
    Error,
};
use folio_models::maintenance::{decide_access, AccessDecision};
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use std::{
    cell::RefCell,
    rc::Rc,
    task::{Context, Poll},
};
use tracing::warn;

pub struct MaintenanceGate;

impl<S, B> Transform<S, ServiceRequest> for MaintenanceGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = MaintenanceGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(MaintenanceGateMiddleware {
            service: Rc::new(RefCell::new(service)),
        })
    }
}

pub struct MaintenanceGateMiddleware<S> {
    service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for MaintenanceGateMiddleware<S>
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
            // CORS preflights carry no credentials
            if Method::OPTIONS == req.method() {
                return srv.call(req).await.map(|res| res.map_into_left_body());
            }

            let Some(state) = req.app_data::<Data<AppState>>().cloned() else {
                warn!("Application state missing, maintenance gate skipped");
                return srv.call(req).await.map(|res| res.map_into_left_body());
            };

            let session = current_session(req.request(), &state);
            let source = state.maintenance_source();
            let decision =
                decide_access(&state.policy, req.path(), session.as_ref(), &source).await;

            match decision {
                AccessDecision::Allow(_) => {
                    srv.call(req).await.map(|res| res.map_into_left_body())
                }
                AccessDecision::Redirect(to) => {
                    let response = maintenance_response(req.request(), &to);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        }
        .boxed_local()
    }
}
