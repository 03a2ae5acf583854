mod common;

use actix_web::{
    http::{header, StatusCode},
    test,
};
use common::{bearer, TestContext};
use folio_models::enums::common::UserRole;
use folio_repository::{SiteConfigRepository, TestimonialRepository};
use sea_orm::ConnectionTrait;
use serde_json::{json, Value};

async fn enable_maintenance(ctx: &TestContext) {
    SiteConfigRepository::set_maintenance(true, None, &ctx.db)
        .await
        .unwrap();
}

#[actix_web::test]
async fn health_answers_ok() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");
}

#[actix_web::test]
async fn gate_redirects_pages_and_rejects_api_calls_during_maintenance() {
    let ctx = TestContext::new().await;
    enable_maintenance(&ctx).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/about")
        .insert_header((header::ACCEPT, "text/html"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/maintenance");

    let req = test::TestRequest::get()
        .uri("/api/public/services")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "maintenanceMode": true, "redirect": "/maintenance" }));

    // Exempt prefixes stay reachable.
    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::get()
        .uri("/api/maintenance/status")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn active_admin_bypasses_maintenance_but_others_do_not() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let (_, user) = ctx
        .user_token("user@example.com", UserRole::User, true)
        .await;
    let (_, inactive) = ctx
        .user_token("gone@example.com", UserRole::Admin, false)
        .await;
    enable_maintenance(&ctx).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/public/services")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));

    for token in [user, inactive, "garbage".to_string()] {
        let req = test::TestRequest::get()
            .uri("/api/public/services")
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    // The session cookie works as well as the bearer header.
    let req = test::TestRequest::get()
        .uri("/api/public/services")
        .cookie(actix_web::cookie::Cookie::new("folio_session", admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn site_access_guard_applies_without_the_gate() {
    let ctx = TestContext::new().await;
    enable_maintenance(&ctx).await;
    let app = test::init_service(ctx.ungated_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/public/blog")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["redirect"], "/maintenance");
}

#[actix_web::test]
async fn status_follows_the_admin_toggle() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let app = test::init_service(ctx.app()).await;

    let status = || {
        test::TestRequest::get()
            .uri("/api/maintenance/status")
            .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, status()).await;
    assert_eq!(body, json!({ "maintenanceMode": false }));

    let req = test::TestRequest::put()
        .uri("/api/admin/site-config/maintenance")
        .insert_header(bearer(&admin))
        .set_json(json!({ "enabled": true, "message": "Back soon" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["maintenanceMode"], true);
    assert_eq!(body["data"]["maintenanceMessage"], "Back soon");

    let body: Value = test::call_and_read_body_json(&app, status()).await;
    assert_eq!(body, json!({ "maintenanceMode": true }));

    let req = test::TestRequest::put()
        .uri("/api/admin/site-config/maintenance")
        .insert_header(bearer(&admin))
        .set_json(json!({ "enabled": false }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, status()).await;
    assert_eq!(body, json!({ "maintenanceMode": false }));
}

#[actix_web::test]
async fn banner_is_only_shown_to_admins() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    enable_maintenance(&ctx).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/maintenance/banner")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "maintenanceMode": true, "showBanner": false }));

    let req = test::TestRequest::get()
        .uri("/api/maintenance/banner")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "maintenanceMode": true, "showBanner": true }));
}

#[actix_web::test]
async fn admin_routes_require_an_active_admin() {
    let ctx = TestContext::new().await;
    let (_, user) = ctx
        .user_token("user@example.com", UserRole::User, true)
        .await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/service/page")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/admin/service/page")
        .insert_header(bearer(&user))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn login_sets_the_session_cookie() {
    let ctx = TestContext::new().await;
    ctx.admin_token().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": common::ADMIN_EMAIL, "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "folio_session")
        .expect("session cookie");
    assert!(cookie.http_only().unwrap_or(false));

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": common::ADMIN_EMAIL, "password": "wrong-password" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn duplicate_service_slug_conflicts() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let app = test::init_service(ctx.app()).await;

    let create = || {
        test::TestRequest::post()
            .uri("/api/admin/service")
            .insert_header(bearer(&admin))
            .set_json(json!({ "title": "Web Design", "summary": "Sites that convert" }))
            .to_request()
    };
    let resp = test::call_service(&app, create()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["slug"], "web-design");

    assert_eq!(
        test::call_service(&app, create()).await.status(),
        StatusCode::CONFLICT
    );
}

#[actix_web::test]
async fn comments_are_validated_and_hidden_until_approved() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/blog")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "title": "Hello World",
            "excerpt": "First post",
            "content": "Welcome to the blog.",
            "status": "PUBLISHED"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let comment = |name: &str, rating: i32| {
        test::TestRequest::post()
            .uri("/api/public/blog/hello-world/comments")
            .set_json(json!({
                "name": name,
                "email": "reader@example.com",
                "content": "Great read",
                "rating": rating
            }))
            .to_request()
    };
    assert_eq!(
        test::call_service(&app, comment("J", 5)).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        test::call_service(&app, comment("Jo", 6)).await.status(),
        StatusCode::BAD_REQUEST
    );
    let resp = test::call_service(&app, comment("Jo", 5)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["isApproved"], false);
    let id = body["data"]["id"].as_i64().unwrap();

    let list = || {
        test::TestRequest::get()
            .uri("/api/public/blog/hello-world/comments")
            .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body, json!([]));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/comment/{id}"))
        .insert_header(bearer(&admin))
        .set_json(json!({ "isApproved": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, list()).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["authorName"], "Jo");
    assert!(body[0].get("authorEmail").is_none());

    let req = test::TestRequest::get()
        .uri("/api/public/blog/missing/comments")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn testimonial_request_flow() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/testimonial")
        .insert_header(bearer(&admin))
        .set_json(json!({ "clientName": "Ada Lovelace", "clientEmail": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert!(sent[0].text.contains(&token));

    let req = test::TestRequest::get()
        .uri(&format!("/api/public/testimonials/request/{token}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["clientName"], "Ada Lovelace");

    let reminder = || {
        test::TestRequest::post()
            .uri(&format!("/api/admin/testimonial/{id}/reminder"))
            .insert_header(bearer(&admin))
            .to_request()
    };
    assert_eq!(test::call_service(&app, reminder()).await.status(), StatusCode::OK);
    assert_eq!(ctx.mailer.sent().len(), 2);

    let submit = || {
        test::TestRequest::post()
            .uri("/api/public/testimonials/submit")
            .set_json(json!({
                "token": token,
                "content": "Working with this team was a pleasure.",
                "rating": 5
            }))
            .to_request()
    };
    assert_eq!(test::call_service(&app, submit()).await.status(), StatusCode::OK);
    assert_eq!(
        test::call_service(&app, submit()).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        test::call_service(&app, reminder()).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/public/testimonials/request/{token}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    // Not public until approved and published.
    let public = || {
        test::TestRequest::get()
            .uri("/api/public/testimonials")
            .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, public()).await;
    assert_eq!(body, json!([]));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/testimonial/{id}/review"))
        .insert_header(bearer(&admin))
        .set_json(json!({ "approve": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/testimonial/{id}/publication"))
        .insert_header(bearer(&admin))
        .set_json(json!({ "publicationStatus": "PUBLISHED" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, public()).await;
    assert_eq!(body[0]["rating"], 5);

    let req = test::TestRequest::get()
        .uri("/api/public/testimonials/request/unknown-token")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn testimonial_survives_a_mail_failure() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;
    ctx.mailer.fail(true);
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/testimonial")
        .insert_header(bearer(&admin))
        .set_json(json!({ "clientName": "Grace Hopper", "clientEmail": "grace@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap() as i32;
    assert_ne!(body["message"], "success");

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/testimonial/{id}/reminder"))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    let stored = TestimonialRepository::find_by_id(id, &ctx.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.reminder_count, 0);
}

#[actix_web::test]
async fn admins_cannot_lock_themselves_out() {
    let ctx = TestContext::new().await;
    let (admin_id, admin) = ctx
        .user_token(common::ADMIN_EMAIL, UserRole::Admin, true)
        .await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/user/change-status")
        .insert_header(bearer(&admin))
        .set_json(json!({ "id": admin_id, "isActive": false }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::put()
        .uri("/api/admin/user/change-role")
        .insert_header(bearer(&admin))
        .set_json(json!({ "id": admin_id, "role": "USER" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/admin/user")
        .insert_header(bearer(&admin))
        .set_json(json!({ "email": "editor@example.com", "name": "Editor", "password": "long-enough" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], "USER");
    assert!(body["data"].get("password").is_none());
    let editor = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri("/api/admin/user/change-status")
        .insert_header(bearer(&admin))
        .set_json(json!({ "id": editor, "isActive": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isActive"], false);

    let req = test::TestRequest::get()
        .uri("/api/admin/user/userinfo")
        .insert_header(bearer(&admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["email"], common::ADMIN_EMAIL);
}

#[actix_web::test]
async fn public_site_config_hides_admin_fields() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/public/site-config")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.get("siteName").is_some());
    assert!(body.get("maintenanceMessage").is_none());
}

#[actix_web::test]
async fn public_reads_degrade_when_the_store_fails() {
    let ctx = TestContext::new().await;
    ctx.db.execute_unprepared("DROP TABLE service").await.unwrap();
    ctx.db
        .execute_unprepared("DROP TABLE site_config")
        .await
        .unwrap();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/api/public/services")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));

    let req = test::TestRequest::get()
        .uri("/api/maintenance/status")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "maintenanceMode": false }));

    let req = test::TestRequest::get()
        .uri("/api/public/site-config")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to load site configuration" }));
}
