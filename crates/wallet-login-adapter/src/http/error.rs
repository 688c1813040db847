/*
[INPUT]:  Error sources (wallet provider, HTTP, serialization, cancellation)
[OUTPUT]: Structured error types with per-step context and user messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Error reported by a wallet provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The user dismissed or denied the wallet prompt
    #[error("request rejected by user: {0}")]
    Rejected(String),

    /// Any other provider failure
    #[error("provider error: {0}")]
    Internal(String),
}

/// Why an HTTP exchange with the login server did not produce a usable body
#[derive(Error, Debug)]
pub enum ResponseError {
    /// Connection, TLS or timeout failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },

    /// Body was not the expected JSON
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request or response failed a local check
    #[error("{0}")]
    Invalid(String),
}

impl ResponseError {
    /// Build a status error, pulling a readable reason out of the body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        ResponseError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ResponseError::Status { status, .. } => Some(*status),
            ResponseError::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ResponseError::Transport(err) if err.is_timeout())
    }
}

/// Main error type for the login flow
///
/// Every variant is terminal for the current attempt.
#[derive(Error, Debug)]
pub enum LoginError {
    /// No provider present, wrong provider type, or no usable account
    #[error("wallet provider unavailable: {0}")]
    WalletUnavailable(String),

    /// User declined the account authorization prompt
    #[error("account authorization rejected: {0}")]
    UserRejected(String),

    /// Challenge could not be obtained
    #[error("nonce request failed: {0}")]
    NonceRequestFailed(#[source] ResponseError),

    /// Wallet did not produce a usable signature
    #[error("signing failed: {0}")]
    SigningFailed(#[source] ProviderError),

    /// Login endpoint refused or could not be reached
    #[error("login failed: {0}")]
    LoginFailed(#[source] ResponseError),

    /// Logout endpoint refused or could not be reached
    #[error("logout failed: {0}")]
    LogoutFailed(#[source] ResponseError),

    /// Attempt abandoned by the caller
    #[error("login attempt cancelled")]
    Cancelled,

    /// Client construction failed
    #[error("configuration error: {0}")]
    Config(String),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Copyable discriminant of [`LoginError`], for reporting and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginErrorKind {
    WalletUnavailable,
    UserRejected,
    NonceRequestFailed,
    SigningFailed,
    LoginFailed,
    LogoutFailed,
    Cancelled,
    Config,
}

impl LoginError {
    pub fn kind(&self) -> LoginErrorKind {
        match self {
            LoginError::WalletUnavailable(_) => LoginErrorKind::WalletUnavailable,
            LoginError::UserRejected(_) => LoginErrorKind::UserRejected,
            LoginError::NonceRequestFailed(_) => LoginErrorKind::NonceRequestFailed,
            LoginError::SigningFailed(_) => LoginErrorKind::SigningFailed,
            LoginError::LoginFailed(_) => LoginErrorKind::LoginFailed,
            LoginError::LogoutFailed(_) => LoginErrorKind::LogoutFailed,
            LoginError::Cancelled => LoginErrorKind::Cancelled,
            LoginError::Config(_) | LoginError::UrlParse(_) => LoginErrorKind::Config,
        }
    }

    /// Short sentence suitable for showing to the person logging in
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            LoginErrorKind::WalletUnavailable => "No compatible wallet is available.",
            LoginErrorKind::UserRejected => "Wallet connection was rejected.",
            LoginErrorKind::NonceRequestFailed => "Could not start login, please try again.",
            LoginErrorKind::SigningFailed => "The login message was not signed.",
            LoginErrorKind::LoginFailed => "Authentication failed.",
            LoginErrorKind::LogoutFailed => "Logout failed.",
            LoginErrorKind::Cancelled => "Login was cancelled.",
            LoginErrorKind::Config => "Login is misconfigured.",
        }
    }

    /// Status code returned by the server, when the failure came from one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            LoginError::NonceRequestFailed(source)
            | LoginError::LoginFailed(source)
            | LoginError::LogoutFailed(source) => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for login operations
pub type Result<T> = std::result::Result<T, LoginError>;

/// Turn an error body into one line of text.
///
/// Handles `{"detail": "..."}`, field errors such as
/// `{"address": "Invalid address"}` or `{"address": ["..."]}`, and
/// falls back to the raw body.
fn extract_detail(body: &str) -> String {
    let body = body.trim();
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    if let Some(detail) = value.get("detail").and_then(|detail| detail.as_str()) {
        return detail.to_string();
    }

    if let Some(object) = value.as_object() {
        let fields: Vec<String> = object
            .iter()
            .filter_map(|(field, reason)| {
                let reason = match reason {
                    serde_json::Value::String(text) => text.clone(),
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|item| item.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    _ => return None,
                };
                Some(format!("{field}: {reason}"))
            })
            .collect();
        if !fields.is_empty() {
            return fields.join("; ");
        }
    }

    body.to_string()
}
