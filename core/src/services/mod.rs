//! Business services containing domain logic and use cases.

pub mod authorization;
pub mod deadline;
pub mod media;
pub mod otp;
pub mod policy;
pub mod template;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use authorization::{authorize, bearer_token, Decision, DenyReason};
pub use deadline::with_deadline;
pub use media::{MediaService, MediaStorage, UploadPolicy};
pub use otp::{CacheServiceTrait, EmailServiceTrait, OtpService, OtpServiceConfig};
pub use policy::{PolicyError, PolicyTable};
pub use template::TemplateService;
pub use token::{TokenService, TokenServiceConfig};
pub use user::{
    AuthenticatedUser, CheckOutcome, PasswordReset, Registration, UserService, UserServiceConfig,
};

#[cfg(any(test, feature = "mocks"))]
pub use media::MockMediaStorage;
#[cfg(any(test, feature = "mocks"))]
pub use otp::{MockCacheService, MockEmailService};
