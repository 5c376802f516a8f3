//! Authorization gate in front of every route.
//!
//! The gate reads the `Authorization` header, asks
//! [`tmpl_core::services::authorize`] for a decision against the policy table
//! and either forwards the request with the verified claims in its extensions
//! or answers it directly:
//!
//! - expired access token: 401 `access_token_expired`
//! - any other token failure, or no rule for the caller's role: 403
//!   `permission_denied`

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use tmpl_core::domain::entities::token::Claims;
use tmpl_core::domain::value_objects::Role;
use tmpl_core::services::{authorize, Decision, DenyReason, PolicyTable, TokenService};
use tmpl_shared::{status_codes, StandardResponse};

use super::request_id::RequestIdExt;

/// Caller identity taken from a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// User id (`sub` claim)
    pub user_id: String,
    pub role: Role,
}

impl From<&Claims> for AuthContext {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            role: claims.role,
        }
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<Claims>().map(AuthContext::from);
        ready(context.ok_or_else(|| {
            let response = HttpResponse::Unauthorized().json(StandardResponse::message(
                status_codes::UNAUTHORIZED,
                "Authentication required",
            ));
            InternalError::from_response("missing claims", response).into()
        }))
    }
}

/// Response for a refused request
pub fn deny_response(reason: &DenyReason) -> HttpResponse {
    match reason {
        DenyReason::TokenExpired => HttpResponse::Unauthorized().json(StandardResponse::message(
            status_codes::ACCESS_TOKEN_EXPIRED,
            "Access token has expired",
        )),
        DenyReason::InvalidToken(_) | DenyReason::Forbidden { .. } => HttpResponse::Forbidden()
            .json(StandardResponse::message(
                status_codes::PERMISSION_DENIED,
                "Permission denied",
            )),
    }
}

/// Middleware factory holding the shared policy table and token verifier
#[derive(Clone)]
pub struct AuthorizationGate {
    policy: Arc<PolicyTable>,
    tokens: Arc<TokenService>,
}

impl AuthorizationGate {
    pub fn new(policy: Arc<PolicyTable>, tokens: Arc<TokenService>) -> Self {
        Self { policy, tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthorizationGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthorizationGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizationGateMiddleware {
            service: Rc::new(service),
            policy: Arc::clone(&self.policy),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct AuthorizationGateMiddleware<S> {
    service: Rc<S>,
    policy: Arc<PolicyTable>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthorizationGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok());
            authorize(
                &self.policy,
                &self.tokens,
                header,
                req.path(),
                req.method().as_str(),
            )
        };

        match decision {
            Decision::Allow { claims } => {
                if let Some(claims) = claims {
                    req.extensions_mut().insert(claims);
                }
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Decision::Deny(reason) => {
                let request_id = req.request().request_id();
                match &reason {
                    DenyReason::InvalidToken(err) => log::warn!(
                        "[{}] Rejected {} {}: {}",
                        request_id,
                        req.method(),
                        req.path(),
                        err
                    ),
                    other => log::info!(
                        "[{}] Denied {} {}: {:?}",
                        request_id,
                        req.method(),
                        req.path(),
                        other
                    ),
                }
                let response = deny_response(&reason);
                let (http_req, _) = req.into_parts();
                Box::pin(async move {
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App};
    use tmpl_core::services::TokenServiceConfig;

    async fn whoami(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().body(auth.user_id)
    }

    fn gate() -> (AuthorizationGate, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));
        let policy = Arc::new(PolicyTable::embedded().unwrap());
        (AuthorizationGate::new(policy, Arc::clone(&tokens)), tokens)
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let (gate, tokens) = gate();
        let app = test::init_service(
            App::new()
                .wrap(gate)
                .route("/v1/user/profile", web::get().to(whoami)),
        )
        .await;

        let pair = tokens.generate_token_pair("user-1", Role::User).unwrap();
        let req = test::TestRequest::get()
            .uri("/v1/user/profile")
            .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "user-1");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let (gate, tokens) = gate();
        let app = test::init_service(
            App::new()
                .wrap(gate)
                .route("/v1/user/profile", web::get().to(whoami)),
        )
        .await;

        let pair = tokens.generate_token_pair("user-1", Role::User).unwrap();
        let req = test::TestRequest::get()
            .uri("/v1/user/profile")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_missing_claims_without_gate() {
        let app =
            test::init_service(App::new().route("/v1/user/profile", web::get().to(whoami))).await;
        let req = test::TestRequest::get().uri("/v1/user/profile").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
