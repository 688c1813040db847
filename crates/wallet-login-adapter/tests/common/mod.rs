/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fake login server, test wallets
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for wallet-login-adapter tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;
use wallet_login_adapter::auth::{addresses_equal, recover_signer};
use wallet_login_adapter::{LocalKeyProvider, ProviderError, ProviderKind, WalletProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const LOGIN_PATH: &str = "/api/v1/login";
pub const CSRF_TOKEN: &str = "test-csrf-token";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Number of requests the server received on `endpoint`
pub async fn requests_to(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == endpoint)
        .count()
}

/// Local-key wallet that identifies itself as MetaMask
pub fn test_wallet() -> LocalKeyProvider {
    LocalKeyProvider::new(TEST_KEY)
        .unwrap()
        .with_kind(ProviderKind::MetaMask)
}

fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

/// Server-side bookkeeping of the fake login backend
#[derive(Debug, Default)]
pub struct FakeState {
    /// Outstanding nonce per lowercase address
    pub pending: HashMap<String, String>,
    pub issued: Vec<String>,
    pub consumed: Vec<String>,
}

/// Fake backend that issues nonces and verifies personal_sign logins
///
/// A nonce is consumed by the first successful login for its address.
/// Failed logins leave it outstanding.
pub struct FakeAuthServer {
    pub server: MockServer,
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeAuthServer {
    pub async fn start() -> Self {
        let server = setup_mock_server().await;
        let state = Arc::new(Mutex::new(FakeState::default()));

        Mock::given(method("POST"))
            .and(path("/api/v1/nonce"))
            .respond_with(NonceResponder {
                state: state.clone(),
            })
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(LoginResponder {
                state: state.clone(),
            })
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn issued(&self) -> Vec<String> {
        self.state.lock().unwrap().issued.clone()
    }

    pub fn consumed(&self) -> Vec<String> {
        self.state.lock().unwrap().consumed.clone()
    }
}

struct NonceResponder {
    state: Arc<Mutex<FakeState>>,
}

impl Respond for NonceResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let fields = form_fields(request);
        let Some(address) = fields.get("address").filter(|a| a.starts_with("0x")) else {
            return ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"address": "Invalid address"}));
        };

        let nonce = Uuid::new_v4().simple().to_string();
        let mut state = self.state.lock().unwrap();
        state.pending.insert(address.to_lowercase(), nonce.clone());
        state.issued.push(nonce.clone());

        ResponseTemplate::new(200).set_body_json(serde_json::json!({"nonce": nonce}))
    }
}

struct LoginResponder {
    state: Arc<Mutex<FakeState>>,
}

impl Respond for LoginResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let csrf_ok = request
            .headers
            .get("x-csrftoken")
            .and_then(|value| value.to_str().ok())
            == Some(CSRF_TOKEN);
        if !csrf_ok {
            return ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"detail": "CSRF Failed: CSRF token missing."}));
        }

        let fields = form_fields(request);
        let address = fields.get("address").cloned().unwrap_or_default();
        let signature = fields.get("signature").cloned().unwrap_or_default();

        let mut state = self.state.lock().unwrap();
        let key = address.to_lowercase();
        let verified = state
            .pending
            .get(&key)
            .and_then(|nonce| recover_signer(nonce, &signature).ok())
            .is_some_and(|signer| addresses_equal(&signer, &address));

        if !verified {
            return ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "Authentication fail"}));
        }

        let nonce = state.pending.remove(&key).unwrap_or_default();
        state.consumed.push(nonce);
        let token = format!("token-{}", state.consumed.len());

        ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": token}))
    }
}

/// Wallet wrapper that keeps every signature it hands out
pub struct RecordingWallet {
    pub inner: LocalKeyProvider,
    pub signatures: Mutex<Vec<String>>,
}

impl RecordingWallet {
    pub fn new(inner: LocalKeyProvider) -> Self {
        Self {
            inner,
            signatures: Mutex::new(Vec::new()),
        }
    }

    pub fn signatures(&self) -> Vec<String> {
        self.signatures.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for RecordingWallet {
    fn kind(&self) -> ProviderKind {
        self.inner.kind()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.inner.request_accounts().await
    }

    async fn sign(&self, message: &str, address: &str) -> Result<String, ProviderError> {
        let signature = self.inner.sign(message, address).await?;
        self.signatures.lock().unwrap().push(signature.clone());
        Ok(signature)
    }
}

/// Wallet that signs a fixed message instead of the challenge it is given
pub struct StaleNonceWallet {
    pub inner: LocalKeyProvider,
    pub stale_nonce: String,
}

#[async_trait]
impl WalletProvider for StaleNonceWallet {
    fn kind(&self) -> ProviderKind {
        self.inner.kind()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        self.inner.request_accounts().await
    }

    async fn sign(&self, _message: &str, address: &str) -> Result<String, ProviderError> {
        self.inner.sign(&self.stale_nonce, address).await
    }
}

/// Wallet whose authorization prompt is never answered
pub struct UnansweredWallet;

#[async_trait]
impl WalletProvider for UnansweredWallet {
    fn kind(&self) -> ProviderKind {
        ProviderKind::MetaMask
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        std::future::pending().await
    }

    async fn sign(&self, _message: &str, _address: &str) -> Result<String, ProviderError> {
        std::future::pending().await
    }
}
