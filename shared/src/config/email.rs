//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_string, Environment};

/// Which email backend delivers OTP messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Smtp,
    /// Logs messages instead of sending them
    Mock,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(EmailProvider::Smtp),
            "mock" | "log" => Ok(EmailProvider::Mock),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    /// Sender address, also the SMTP login
    pub sender: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl EmailConfig {
    /// Defaults for the given environment: mock delivery outside production-like
    /// environments
    pub fn for_environment(environment: Environment) -> Self {
        let provider = if environment.is_development() {
            EmailProvider::Mock
        } else {
            EmailProvider::Smtp
        };
        Self {
            provider,
            sender: String::new(),
            password: String::new(),
            host: String::new(),
            port: 587,
        }
    }

    pub fn from_env(environment: Environment) -> Self {
        let defaults = Self::for_environment(environment);
        Self {
            provider: env_or("EMAIL_PROVIDER", defaults.provider),
            sender: env_string("SMTP_EMAIL", ""),
            password: env_string("SMTP_EMAIL_PASS", ""),
            host: env_string("SMTP_HOST", ""),
            port: env_or("SMTP_PORT", defaults.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("SMTP".parse::<EmailProvider>(), Ok(EmailProvider::Smtp));
        assert_eq!("mock".parse::<EmailProvider>(), Ok(EmailProvider::Mock));
        assert!("carrier-pigeon".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_environment_defaults() {
        assert_eq!(
            EmailConfig::for_environment(Environment::Development).provider,
            EmailProvider::Mock
        );
        assert_eq!(
            EmailConfig::for_environment(Environment::Production).provider,
            EmailProvider::Smtp
        );
    }
}
