//! Shared fixtures for the HTTP integration tests
//!
//! The app under test is the real [`create_app`] wired to the in-memory
//! mocks from `tmpl_core`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use serde_json::Value;

use tmpl_api::{middleware::AuthorizationGate, AppState, Backend};
use tmpl_core::domain::entities::otp::otp_cache_key;
use tmpl_core::domain::value_objects::{PasswordHasher, Role};
use tmpl_core::repositories::MockDatabase;
use tmpl_core::services::{
    MediaService, MockCacheService, MockEmailService, MockMediaStorage, OtpService,
    OtpServiceConfig, PolicyTable, TemplateService, TokenService, TokenServiceConfig,
    UploadPolicy, UserService, UserServiceConfig,
};

pub const BASE_URL: &str = "http://localhost:8000/";
pub const MAX_UPLOAD_BYTES: usize = 1024;
pub const PASSWORD: &str = "correct-horse";

pub struct MockBackend;

impl Backend for MockBackend {
    type Users = MockDatabase;
    type Records = MockDatabase;
    type Templates = MockDatabase;
    type Cache = MockCacheService;
    type Email = MockEmailService;
    type Media = MockMediaStorage;
}

/// Handles on every mock behind the app, for seeding and assertions
pub struct TestContext {
    pub db: MockDatabase,
    pub cache: MockCacheService,
    pub email: MockEmailService,
    pub media: MockMediaStorage,
    pub tokens: Arc<TokenService>,
    pub state: web::Data<AppState<MockBackend>>,
    pub gate: AuthorizationGate,
}

impl TestContext {
    pub fn new() -> Self {
        let db = MockDatabase::new();
        let cache = MockCacheService::new();
        let email = MockEmailService::new();
        let media = MockMediaStorage::new();
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));

        let otp = Arc::new(OtpService::new(
            Arc::new(cache.clone()),
            Arc::new(email.clone()),
            OtpServiceConfig::default(),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            otp,
            Arc::clone(&tokens),
            UserServiceConfig::default()
                .with_password_hasher(PasswordHasher::with_cost(4))
                .with_request_timeout(Duration::from_secs(5)),
        ));
        let template_service = Arc::new(TemplateService::new(
            Arc::new(db.clone()),
            Duration::from_secs(5),
        ));
        let media_service = Arc::new(MediaService::new(
            Arc::new(media.clone()),
            UploadPolicy::new(MAX_UPLOAD_BYTES),
            BASE_URL,
        ));

        let state = web::Data::new(AppState::new(user_service, template_service, media_service));
        let policy = Arc::new(PolicyTable::embedded().unwrap());
        let gate = AuthorizationGate::new(policy, Arc::clone(&tokens));

        Self {
            db,
            cache,
            email,
            media,
            tokens,
            state,
            gate,
        }
    }

    /// Bearer header value for a token minted directly for `role`
    pub fn bearer_for(&self, user_id: &str, role: Role) -> String {
        let pair = self.tokens.generate_token_pair(user_id, role).unwrap();
        format!("Bearer {}", pair.access_token)
    }

    pub fn admin_bearer(&self) -> String {
        self.bearer_for("admin-1", Role::Admin)
    }

    pub fn otp_key(&self, email: &str) -> String {
        otp_cache_key(email)
    }
}

/// Initialise the app for `$ctx` in the calling test
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(tmpl_api::create_app(
            $ctx.state.clone(),
            $ctx.gate.clone(),
            tmpl_shared::Environment::Development,
        ))
        .await
    };
}

/// Status and parsed envelope of a response
pub async fn read_envelope<B>(resp: ServiceResponse<B>) -> (u16, Value)
where
    B: MessageBody,
{
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Run the email check and registration for a new account
///
/// Evaluates to the `data` of the registration response: `{user, tokens}`.
#[macro_export]
macro_rules! register_user {
    ($app:expr, $ctx:expr, $user_name:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::get()
            .uri(&format!("/v1/user/check/{}", $email))
            .to_request();
        let (status, body) =
            $crate::common::read_envelope(actix_web::test::call_service(&$app, req).await).await;
        assert_eq!(status, 200, "{}", body);
        assert_eq!(body["data"]["status"], "register");

        let code = $ctx.email.last_code_for($email).unwrap();
        let req = actix_web::test::TestRequest::post()
            .uri("/v1/user")
            .set_json(serde_json::json!({
                "user_name": $user_name,
                "email": $email,
                "password": $crate::common::PASSWORD,
                "otp": code,
            }))
            .to_request();
        let (status, body) =
            $crate::common::read_envelope(actix_web::test::call_service(&$app, req).await).await;
        assert_eq!(status, 200, "{}", body);
        body["data"].clone()
    }};
}
