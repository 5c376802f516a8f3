//! SMTP email delivery through lettre

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use tmpl_core::domain::entities::otp::OtpPurpose;
use tmpl_core::services::otp::EmailServiceTrait;
use tmpl_shared::config::EmailConfig;

use crate::InfrastructureError;

use super::render_otp_body;

/// Sends mail through an authenticated STARTTLS relay
#[derive(Clone)]
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailService {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let sender: Mailbox = config.sender.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid SMTP_EMAIL {:?}: {}", config.sender, e))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP_HOST: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.sender.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }

    fn build_message(&self, to: &str, code: &str, purpose: OtpPurpose) -> Result<Message, String> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| format!("invalid recipient address: {}", e))?;

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(purpose.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(render_otp_body(code, purpose))
            .map_err(|e| format!("failed to build email: {}", e))
    }
}

#[async_trait]
impl EmailServiceTrait for SmtpEmailService {
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> Result<(), String> {
        let message = self.build_message(to, code, purpose)?;

        self.transport.send(message).await.map_err(|e| {
            tracing::error!(to, error = %e, event = "smtp_send_failed", "Failed to send email");
            format!("smtp delivery failed: {}", e)
        })?;

        tracing::info!(to, purpose = ?purpose, event = "email_sent", "Sent email");
        Ok(())
    }
}
