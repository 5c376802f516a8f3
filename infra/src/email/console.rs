//! Development email service printing messages to stdout

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tmpl_core::domain::entities::otp::OtpPurpose;
use tmpl_core::services::otp::EmailServiceTrait;

use super::render_otp_body;

/// Prints each message to the console instead of sending it
///
/// The code goes to stdout only, never through the logger.
#[derive(Clone, Default)]
pub struct ConsoleEmailService {
    message_count: Arc<AtomicU64>,
}

impl ConsoleEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailServiceTrait for ConsoleEmailService {
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> Result<(), String> {
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        println!("\n========== Console Email #{} ==========", count);
        println!("To:      {}", to);
        println!("Subject: {}", purpose.subject());
        println!("{}", render_otp_body(code, purpose));
        println!("=======================================\n");
        tracing::info!(to, event = "email_printed", "Printed email to console");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_messages() {
        let service = ConsoleEmailService::new();
        service
            .send_otp("a@example.com", "123456", OtpPurpose::Registration)
            .await
            .unwrap();
        service
            .send_otp("a@example.com", "654321", OtpPurpose::PasswordReset)
            .await
            .unwrap();
        assert_eq!(service.message_count(), 2);
    }
}
