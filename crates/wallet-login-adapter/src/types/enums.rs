/*
[INPUT]:  Provider identities and login progress
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for the login handshake
[UPDATE]: When adding provider kinds or flow states
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity a wallet provider declares for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Browser-injected MetaMask extension
    #[serde(alias = "meta_mask")]
    MetaMask,
    /// In-process key, used by the CLI and tests
    Local,
    /// Anything that does not identify itself
    Unknown,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::MetaMask => "metamask",
            ProviderKind::Local => "local",
            ProviderKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Progress of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    Idle,
    Connecting,
    NonceRequested,
    Signing,
    Submitting,
    Success,
    Failed,
}

impl LoginState {
    /// The state that follows this one when the current step succeeds.
    pub fn next(self) -> Option<LoginState> {
        match self {
            LoginState::Idle => Some(LoginState::Connecting),
            LoginState::Connecting => Some(LoginState::NonceRequested),
            LoginState::NonceRequested => Some(LoginState::Signing),
            LoginState::Signing => Some(LoginState::Submitting),
            LoginState::Submitting => Some(LoginState::Success),
            LoginState::Success | LoginState::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LoginState::Success | LoginState::Failed)
    }
}
