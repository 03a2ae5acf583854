//! Testimonial request management endpoints
//!
//! An admin creates a request for a client, which mails the client a link to
//! the public form. Submitted answers are reviewed here and then published.

use crate::{middleware::RequestContext, AppState};
use actix_web::web;
use actix_web_validator::{Json, Path, Query};
use folio_error::{web::WebError, WebResult};
use folio_models::{
    domain::prelude::{
        ChangeTestimonialPublication, NewTestimonialRequest, PageWithStats, PathId,
        ReviewTestimonial, TestimonialPageParams, TestimonialStats, UpdateTestimonial,
    },
    entities::prelude::TestimonialModel,
    enums::common::EntityType,
    mail::testimonial_request,
    web::WebResponse,
};
use folio_repository::{SiteConfigRepository, TestimonialRepository};
use folio_utils::text::new_form_token;
use tracing::{info, warn};

pub(super) const ROUTER_PREFIX: &str = "/testimonial";

/// Configure testimonial routes
///
/// # Routes
/// - POST ``: Create a request and mail the client
/// - PUT ``: Edit client details or content
/// - GET `/page`: Paginated list with per-status counts
/// - GET `/detail/{id}`: Testimonial by id
/// - PATCH `/{id}/review`: Approve or reject a submission
/// - PATCH `/{id}/publication`: Publish or unpublish an approved testimonial
/// - POST `/{id}/reminder`: Mail the client again
/// - DELETE `/{id}`: Delete a testimonial
pub(super) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create))
        .route("", web::put().to(update))
        .route("/page", web::get().to(page))
        .route("/detail/{id}", web::get().to(get_by_id))
        .route("/{id}/review", web::patch().to(review))
        .route("/{id}/publication", web::patch().to(change_publication))
        .route("/{id}/reminder", web::post().to(send_reminder))
        .route("/{id}", web::delete().to(delete));
}

async fn page(
    params: Query<TestimonialPageParams>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<PageWithStats<TestimonialModel, TestimonialStats>>> {
    Ok(WebResponse::ok(
        TestimonialRepository::page(&params, &state.db).await?,
    ))
}

async fn get_by_id(
    params: Path<PathId>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialModel>> {
    Ok(WebResponse::ok(require(params.id, &state).await?))
}

/// Create a testimonial request
///
/// # Endpoint
/// `POST /api/admin/testimonial`
///
/// The request is stored before the mail goes out. A delivery failure is
/// reported in the response message and the request can be re-sent later as
/// a reminder.
async fn create(
    req: Json<NewTestimonialRequest>,
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialModel>> {
    let model = req
        .into_inner()
        .into_active_model(new_form_token(), Some(ctx.admin()?.user_id));
    let testimonial = TestimonialRepository::create(model, &state.db).await?;
    info!(id = testimonial.id, "Testimonial request created");

    match send_request_mail(&state, &testimonial, false).await {
        Ok(()) => Ok(WebResponse::ok(testimonial)),
        Err(e) => {
            warn!(id = testimonial.id, error = %e, "Testimonial request mail failed");
            Ok(WebResponse::ok_with_message(
                "Testimonial created but the request email could not be sent",
                testimonial,
            ))
        }
    }
}

async fn update(
    req: Json<UpdateTestimonial>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialModel>> {
    Ok(WebResponse::ok(
        TestimonialRepository::update(req.into_inner(), &state.db).await?,
    ))
}

/// `SUBMITTED` to `APPROVED` or `REJECTED`; any other state answers 400.
async fn review(
    params: Path<PathId>,
    req: Json<ReviewTestimonial>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialModel>> {
    Ok(WebResponse::ok(
        TestimonialRepository::review(params.id, req.approve, &state.db).await?,
    ))
}

async fn change_publication(
    params: Path<PathId>,
    req: Json<ChangeTestimonialPublication>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialModel>> {
    Ok(WebResponse::ok(
        TestimonialRepository::change_publication(params.id, req.publication_status, &state.db)
            .await?,
    ))
}

/// Send a reminder
///
/// # Endpoint
/// `POST /api/admin/testimonial/{id}/reminder`
///
/// # Errors
/// - Bad Request (400): the testimonial is no longer pending
/// - Internal Server Error (500): the mail could not be delivered; the
///   reminder counter is left untouched
async fn send_reminder(
    params: Path<PathId>,
    state: web::Data<AppState>,
) -> WebResult<WebResponse<TestimonialModel>> {
    let testimonial = require(params.id, &state).await?;
    if !testimonial.status.accepts_reminder() {
        return Err(WebError::BadRequest(
            "reminders can only be sent for pending testimonials".into(),
        ));
    }
    send_request_mail(&state, &testimonial, true)
        .await
        .map_err(|e| WebError::InternalError(format!("failed to send reminder: {e}")))?;
    Ok(WebResponse::ok(
        TestimonialRepository::record_reminder(testimonial.id, &state.db).await?,
    ))
}

async fn delete(params: Path<PathId>, state: web::Data<AppState>) -> WebResult<WebResponse<bool>> {
    TestimonialRepository::delete(params.id, &state.db).await?;
    Ok(WebResponse::ok(true))
}

async fn require(id: i32, state: &AppState) -> WebResult<TestimonialModel> {
    TestimonialRepository::find_by_id(id, &state.db)
        .await?
        .ok_or(WebError::NotFound(EntityType::Testimonial.to_string()))
}

async fn send_request_mail(
    state: &AppState,
    testimonial: &TestimonialModel,
    reminder: bool,
) -> WebResult<()> {
    let site = SiteConfigRepository::get_or_create(&state.db).await?;
    let message = testimonial_request(&site.site_name, &state.site_url, testimonial, reminder);
    state.mailer.send(message).await?;
    Ok(())
}
