//! Per-request authorization decision
//!
//! Combines bearer-token verification with the policy table. The decision is
//! a pure function of its inputs, so the HTTP middleware only has to translate
//! it into a response.

use crate::domain::entities::token::Claims;
use crate::domain::value_objects::Role;
use crate::errors::TokenError;
use crate::services::policy::PolicyTable;
use crate::services::token::TokenService;

/// Why a request was turned away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// A correctly signed access token past its expiry; the client should refresh
    TokenExpired,
    /// Any other token failure
    InvalidToken(TokenError),
    /// The policy table has no rule for this role, path and method
    Forbidden { role: Role },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Proceed; `claims` is `None` for anonymous callers
    Allow { claims: Option<Claims> },
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }
}

/// Token carried by an `Authorization` header value
///
/// Returns `None` for values that do not carry a bearer credential: empty
/// values and any `Basic` scheme. A `Bearer ` prefix is optional.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    if header.is_empty() || header.contains("Basic") {
        return None;
    }
    let token = match header.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => header[7..].trim(),
        _ => header,
    };
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Decides whether a request may proceed
///
/// 1. No usable bearer credential ⇒ role `unauthorized`.
/// 2. A credential that fails verification is denied outright, with expiry
///    reported separately.
/// 3. Otherwise the role from the token (or `unauthorized`) is checked
///    against the policy table.
pub fn authorize(
    policy: &PolicyTable,
    tokens: &TokenService,
    authorization: Option<&str>,
    path: &str,
    method: &str,
) -> Decision {
    let claims = match authorization.and_then(bearer_token) {
        None => None,
        Some(token) => match tokens.verify_access_token(token) {
            Ok(claims) => Some(claims),
            Err(TokenError::TokenExpired) => return Decision::Deny(DenyReason::TokenExpired),
            Err(other) => return Decision::Deny(DenyReason::InvalidToken(other)),
        },
    };

    let role = claims.as_ref().map(|c| c.role).unwrap_or(Role::Unauthorized);
    if policy.is_allowed(role, path, method) {
        Decision::Allow { claims }
    } else {
        Decision::Deny(DenyReason::Forbidden { role })
    }
}
