//! Authorization gate behaviour on the assembled app

#[macro_use]
mod common;

use actix_web::test;
use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};

use tmpl_core::domain::entities::token::{Claims, TokenKind};
use tmpl_core::domain::value_objects::Role;

use common::{read_envelope, TestContext};

#[actix_web::test]
async fn test_public_routes_need_no_token() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "healthy");
}

#[actix_web::test]
async fn test_protected_route_without_token_is_forbidden() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/v1/user/profile").to_request();
    let (status, body) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 403);
    assert_eq!(body["status"], "permission_denied");

    let req = test::TestRequest::get()
        .uri("/v1/template")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let (status, _) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 403);
}

#[actix_web::test]
async fn test_expired_token_is_unauthorized() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let claims = Claims::new(
        "user-1",
        Role::User,
        ctx.tokens.config().audience.clone(),
        TokenKind::Access,
        Duration::seconds(-60),
    );
    let token = ctx.tokens.encode_jwt(&claims).unwrap();

    let req = test::TestRequest::get()
        .uri("/v1/user/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let (status, body) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 401);
    assert_eq!(body["status"], "access_token_expired");
    assert_eq!(body["message"], "Access token has expired");
}

#[actix_web::test]
async fn test_forged_token_is_forbidden() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let claims = Claims::new(
        "admin-1",
        Role::Admin,
        ctx.tokens.config().audience.clone(),
        TokenKind::Access,
        Duration::minutes(5),
    );
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"not-the-signing-key"),
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let (status, body) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 403);
    assert_eq!(body["status"], "permission_denied");
}

#[actix_web::test]
async fn test_role_hierarchy() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let user = ctx.bearer_for("user-1", Role::User);

    let req = test::TestRequest::get()
        .uri("/v1/users")
        .insert_header(("Authorization", user.clone()))
        .to_request();
    let (status, _) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 403);

    let req = test::TestRequest::post()
        .uri("/v1/template")
        .insert_header(("Authorization", user.clone()))
        .set_json(serde_json::json!({ "template_name": "invoice" }))
        .to_request();
    let (status, _) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 403);

    // admin inherits the user rules
    let req = test::TestRequest::get()
        .uri("/v1/template")
        .insert_header(("Authorization", ctx.admin_bearer()))
        .to_request();
    let (status, _) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);

    // and user inherits the public ones
    let req = test::TestRequest::get()
        .uri("/v1/user/check/someone@example.com")
        .insert_header(("Authorization", user))
        .to_request();
    let (status, _) = read_envelope(test::call_service(&app, req).await).await;
    assert_eq!(status, 200);
}

#[actix_web::test]
async fn test_responses_carry_request_id() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/v1/user/profile")
        .insert_header(("x-request-id", "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");
}
