/*
[INPUT]:  Account authorization and message signing requests
[OUTPUT]: Authorized addresses and signature strings
[POS]:    Auth layer - wallet provider abstraction
[UPDATE]: When adding new provider types or changing signature format
*/

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::http::ProviderError;
use crate::types::ProviderKind;

/// Trait for wallet provider operations
///
/// Implement this for whatever holds the user's keys (browser extension
/// bridge, hardware wallet, local key). The trait is async because both
/// calls may wait on a human confirming a prompt.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// What the provider declares itself to be
    fn kind(&self) -> ProviderKind;

    /// Ask the user to authorize one or more accounts
    ///
    /// Returns the authorized addresses in provider order.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Sign `message` with the key behind `address`
    ///
    /// Returns a hex-encoded signature (0x...).
    async fn sign(&self, message: &str, address: &str) -> Result<String, ProviderError>;
}

/// Scripted wallet provider for testing
#[derive(Debug)]
pub struct MockWalletProvider {
    kind: ProviderKind,
    accounts: Result<Vec<String>, ProviderError>,
    signature: Result<String, ProviderError>,
    account_requests: AtomicUsize,
    sign_requests: Mutex<Vec<(String, String)>>,
}

impl MockWalletProvider {
    /// Create a mock that authorizes `accounts` and returns `signature`
    pub fn new(kind: ProviderKind, accounts: &[&str], signature: &str) -> Self {
        Self {
            kind,
            accounts: Ok(accounts.iter().map(|a| a.to_string()).collect()),
            signature: Ok(signature.to_string()),
            account_requests: AtomicUsize::new(0),
            sign_requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail account authorization with `error`
    pub fn with_accounts_error(mut self, error: ProviderError) -> Self {
        self.accounts = Err(error);
        self
    }

    /// Fail signing with `error`
    pub fn with_sign_error(mut self, error: ProviderError) -> Self {
        self.signature = Err(error);
        self
    }

    /// Number of `request_accounts` calls so far
    pub fn account_requests(&self) -> usize {
        self.account_requests.load(Ordering::SeqCst)
    }

    /// Every (message, address) pair passed to `sign`
    pub fn sign_requests(&self) -> Vec<(String, String)> {
        self.sign_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        self.accounts.clone()
    }

    async fn sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        self.sign_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), address.to_string()));
        self.signature.clone()
    }
}
