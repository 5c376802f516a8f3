pub mod auth;
pub mod cors;
pub mod request_id;

pub use auth::{AuthContext, AuthorizationGate};
pub use cors::create_cors;
pub use request_id::{RequestIdExt, RequestIdMiddleware};
