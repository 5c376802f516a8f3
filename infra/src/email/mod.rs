//! Email delivery for one-time codes
//!
//! Two providers are available: SMTP through lettre for real delivery, and a
//! console provider for development that prints the message instead of
//! sending it.

mod console;
mod smtp;

use async_trait::async_trait;

use tmpl_core::domain::entities::otp::OtpPurpose;
use tmpl_core::services::otp::EmailServiceTrait;
use tmpl_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub use console::ConsoleEmailService;
pub use smtp::SmtpEmailService;

/// The configured email provider
pub enum EmailService {
    Smtp(SmtpEmailService),
    Console(ConsoleEmailService),
}

#[async_trait]
impl EmailServiceTrait for EmailService {
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> Result<(), String> {
        match self {
            EmailService::Smtp(service) => service.send_otp(to, code, purpose).await,
            EmailService::Console(service) => service.send_otp(to, code, purpose).await,
        }
    }
}

/// Create the email service selected by `config.provider`
pub fn create_email_service(config: &EmailConfig) -> Result<EmailService, InfrastructureError> {
    match config.provider {
        EmailProvider::Smtp => {
            tracing::info!(host = %config.host, port = config.port, "Using SMTP email service");
            Ok(EmailService::Smtp(SmtpEmailService::new(config)?))
        }
        EmailProvider::Mock => {
            tracing::warn!("Using console email service; codes are printed, not sent");
            Ok(EmailService::Console(ConsoleEmailService::new()))
        }
    }
}

/// Plain-text body of an OTP email
pub(crate) fn render_otp_body(code: &str, purpose: OtpPurpose) -> String {
    match purpose {
        OtpPurpose::Registration => format!(
            "Welcome!\n\nYour verification code is {}.\n\nIf you did not request this code, you can ignore this email.\n",
            code
        ),
        OtpPurpose::PasswordReset => format!(
            "Your password reset code is {}.\n\nIf you did not ask to reset your password, you can ignore this email.\n",
            code
        ),
    }
}
