//! Hetzner Cloud Authentication
//!
//! The API authenticates with a project-scoped bearer token. The client only
//! holds the token string; validating it is the server's job.

use std::fmt;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "HCLOUD_TOKEN";

/// Bearer token holder
#[derive(Clone, Default)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// Credentials carrying `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Credentials that send requests unauthenticated
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Read the token from `HCLOUD_TOKEN`, if set and non-empty
    pub fn from_env() -> Self {
        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        if token.is_none() {
            tracing::debug!("{} not set, requests will be unauthenticated", TOKEN_ENV);
        }
        Self { token }
    }

    /// The bearer token, when one is configured
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

// Security: never print the token itself
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
