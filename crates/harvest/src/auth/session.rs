//! Session management for Twitter authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Twitter session cookies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The long-lived auth token cookie.
    pub auth_token: String,
    /// The CSRF token, echoed in the `x-csrf-token` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct0: Option<String>,
    /// When this session was created/updated.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with the given auth token.
    #[must_use]
    pub fn new(auth_token: String) -> Self {
        Self {
            auth_token,
            ct0: None,
            created_at: Utc::now(),
        }
    }

    /// Create a session with both auth token and CSRF token.
    #[must_use]
    pub fn with_ct0(auth_token: String, ct0: String) -> Self {
        Self {
            auth_token,
            ct0: Some(ct0),
            created_at: Utc::now(),
        }
    }

    /// Load session from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let session: Self = serde_json::from_str(&content)?;
        Ok(session)
    }

    /// Load session from environment variables.
    pub fn from_env() -> Result<Self> {
        let auth_token = std::env::var("TWITTER_AUTH_TOKEN")
            .map_err(|_| Error::Session("TWITTER_AUTH_TOKEN not set".to_string()))?;
        let ct0 = std::env::var("TWITTER_CT0").ok();

        Ok(Self {
            auth_token,
            ct0,
            created_at: Utc::now(),
        })
    }

    /// Load session cookies from a captured HTTP request (as copied from a
    /// browser's network tab). The first `Cookie:` header line is used.
    pub fn from_request_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_request(&content)
    }

    /// Parse session cookies out of raw request text.
    pub fn from_request(request: &str) -> Result<Self> {
        let cookie_line = request
            .lines()
            .find_map(|line| line.strip_prefix("Cookie: "))
            .ok_or_else(|| Error::Session("no Cookie header in request".to_string()))?;

        let mut auth_token = None;
        let mut ct0 = None;
        for pair in cookie_line.trim_end().split("; ") {
            match pair.split_once('=') {
                Some(("auth_token", value)) => auth_token = Some(value.to_string()),
                Some(("ct0", value)) => ct0 = Some(value.to_string()),
                _ => {}
            }
        }

        let auth_token = auth_token
            .ok_or_else(|| Error::Session("Cookie header has no auth_token".to_string()))?;
        Ok(Self {
            auth_token,
            ct0,
            created_at: Utc::now(),
        })
    }

    /// Get cookie string for HTTP requests.
    #[must_use]
    pub fn cookie_string(&self) -> String {
        if let Some(ct0) = &self.ct0 {
            format!("auth_token={}; ct0={}", self.auth_token, ct0)
        } else {
            format!("auth_token={}", self.auth_token)
        }
    }
}
