//! Configuration for the user service

use std::time::Duration;

use tmpl_shared::config::ServerConfig;

use crate::domain::value_objects::PasswordHasher;

#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub password_hasher: PasswordHasher,
    /// Upper bound on the store and cache work of a single operation
    pub request_timeout: Duration,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            password_hasher: PasswordHasher::default(),
            request_timeout: Duration::from_secs(7),
        }
    }
}

impl UserServiceConfig {
    pub fn from_server(server: &ServerConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(server.request_timeout),
            ..Default::default()
        }
    }

    pub fn with_password_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.password_hasher = hasher;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
