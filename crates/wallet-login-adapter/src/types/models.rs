/*
[INPUT]:  Server responses and caller-supplied values
[OUTPUT]: Strongly typed handshake values
[POS]:    Data layer - challenge, token and login payload models
[UPDATE]: When the nonce or login payloads change
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Single-use challenge issued by the server for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(String);

impl Nonce {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anti-forgery token rendered into the page by the server.
///
/// Sent back verbatim in the `X-CSRFToken` header of the login request.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

// Tokens end up in logs through Debug, so keep them out.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(***)")
    }
}

/// Body returned by the nonce endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct NonceResponse {
    #[serde(default)]
    pub nonce: Option<String>,
}

/// Form submitted to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub address: &'a str,
    pub signature: &'a str,
}

/// Successful login as reported by the server.
///
/// The payload is server-defined; the accessors cover the shapes the
/// backend is known to return.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub address: String,
    pub payload: serde_json::Value,
}

impl LoginOutcome {
    /// API token, when the endpoint issues one (`{"token": ...}`)
    pub fn token(&self) -> Option<&str> {
        self.payload.get("token").and_then(|value| value.as_str())
    }

    /// Redirect target, when the endpoint answers with a page (`{"detail": ...}`)
    pub fn redirect(&self) -> Option<&str> {
        self.payload.get("detail").and_then(|value| value.as_str())
    }
}
