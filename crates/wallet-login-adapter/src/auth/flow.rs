/*
[INPUT]:  Wallet provider, HTTP client, login URL and anti-forgery token
[OUTPUT]: Server login payload for the wallet's active account
[POS]:    Auth layer - orchestrates complete wallet login flow
[UPDATE]: When flow steps, their order or failure mapping change
*/

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::{LoginAttempt, WalletProvider, addresses_equal, recover_signer};
use crate::http::{LoginClient, LoginError, NONCE_ENDPOINT, ProviderError, ResponseError, Result};
use crate::types::{CsrfToken, LoginOutcome, Nonce, ProviderKind};

/// Flow behaviour knobs
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Provider type the flow is willing to talk to
    pub expected_provider: ProviderKind,
    /// Path of the challenge endpoint
    pub nonce_endpoint: String,
    /// Check locally that the signature recovers to the active address
    /// before submitting it
    pub verify_signature: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            expected_provider: ProviderKind::MetaMask,
            nonce_endpoint: NONCE_ENDPOINT.to_string(),
            verify_signature: false,
        }
    }
}

/// Inputs of one login attempt
#[derive(Clone, Copy)]
pub struct LoginRequest<'a> {
    /// Injected wallet provider, `None` when nothing is installed
    pub provider: Option<&'a dyn WalletProvider>,
    /// Login endpoint, relative to the client base URL or absolute
    pub login_url: &'a str,
    pub csrf_token: &'a CsrfToken,
}

/// Runs the wallet login handshake
///
/// 1. Connect the wallet and pick the first authorized account
/// 2. Request a nonce for that account
/// 3. Have the wallet sign the nonce
/// 4. Submit address + signature to the login endpoint
#[derive(Debug, Clone)]
pub struct LoginFlow {
    client: LoginClient,
    config: FlowConfig,
}

impl LoginFlow {
    pub fn new(client: LoginClient) -> Self {
        Self::with_config(client, FlowConfig::default())
    }

    pub fn with_config(client: LoginClient, config: FlowConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &LoginClient {
        &self.client
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Run a complete login attempt
    pub async fn login(&self, request: LoginRequest<'_>) -> Result<LoginOutcome> {
        let mut attempt = LoginAttempt::new();
        self.run(&mut attempt, request, &CancellationToken::new())
            .await
    }

    /// Run a complete login attempt that stops as soon as `cancel` fires
    pub async fn login_with_cancel(
        &self,
        request: LoginRequest<'_>,
        cancel: &CancellationToken,
    ) -> Result<LoginOutcome> {
        let mut attempt = LoginAttempt::new();
        self.run(&mut attempt, request, cancel).await
    }

    /// Run a login attempt, recording its progress in `attempt`
    ///
    /// `attempt` ends in `Success` or `Failed`. A fresh attempt is
    /// expected; a finished one fails immediately.
    pub async fn run(
        &self,
        attempt: &mut LoginAttempt,
        request: LoginRequest<'_>,
        cancel: &CancellationToken,
    ) -> Result<LoginOutcome> {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LoginError::Cancelled),
            result = self.steps(attempt, request) => result,
        };

        match &result {
            Ok(outcome) => {
                attempt.advance();
                info!(
                    address = %outcome.address,
                    payload = %outcome.payload,
                    "wallet login succeeded"
                );
            }
            Err(err) => {
                attempt.fail();
                warn!(
                    kind = ?err.kind(),
                    error = %err,
                    "wallet login failed"
                );
            }
        }

        result
    }

    async fn steps(
        &self,
        attempt: &mut LoginAttempt,
        request: LoginRequest<'_>,
    ) -> Result<LoginOutcome> {
        let provider = self.require_provider(request.provider)?;

        // Refuse before the user is prompted and a nonce is burned.
        if request.csrf_token.is_empty() {
            return Err(LoginError::LoginFailed(ResponseError::Invalid(
                "anti-forgery token is missing".to_string(),
            )));
        }
        self.client.url(request.login_url)?;

        if !attempt.advance() {
            return Err(LoginError::Config(format!(
                "login attempt already in state {:?}",
                attempt.state()
            )));
        }
        let address = self.request_account(provider).await?;

        attempt.advance();
        let nonce = self
            .client
            .request_nonce_at(&self.config.nonce_endpoint, &address)
            .await?;
        debug!(address = %address, "nonce issued");

        attempt.advance();
        let signature = self.sign_nonce(provider, &nonce, &address).await?;

        attempt.advance();
        self.client
            .submit_login(request.login_url, &address, &signature, request.csrf_token)
            .await
    }

    /// Connect to the wallet and return its active account
    pub async fn connect_wallet(&self, provider: Option<&dyn WalletProvider>) -> Result<String> {
        let provider = self.require_provider(provider)?;
        self.request_account(provider).await
    }

    fn require_provider<'a>(
        &self,
        provider: Option<&'a dyn WalletProvider>,
    ) -> Result<&'a dyn WalletProvider> {
        let provider = provider.ok_or_else(|| {
            LoginError::WalletUnavailable(format!(
                "no wallet provider installed, expected {}",
                self.config.expected_provider
            ))
        })?;

        if provider.kind() != self.config.expected_provider {
            return Err(LoginError::WalletUnavailable(format!(
                "provider is {}, expected {}",
                provider.kind(),
                self.config.expected_provider
            )));
        }

        Ok(provider)
    }

    async fn request_account(&self, provider: &dyn WalletProvider) -> Result<String> {
        let accounts = provider.request_accounts().await.map_err(|e| match e {
            ProviderError::Rejected(message) => LoginError::UserRejected(message),
            ProviderError::Internal(message) => LoginError::WalletUnavailable(message),
        })?;

        let address = accounts
            .into_iter()
            .next()
            .map(|address| address.trim().to_string())
            .filter(|address| !address.is_empty())
            .ok_or_else(|| {
                LoginError::WalletUnavailable("provider returned no accounts".to_string())
            })?;

        info!(address = %address, "wallet connected");
        Ok(address)
    }

    /// Have the wallet sign `nonce` with the key behind `address`
    pub async fn sign_nonce(
        &self,
        provider: &dyn WalletProvider,
        nonce: &Nonce,
        address: &str,
    ) -> Result<String> {
        let signature = provider
            .sign(nonce.as_str(), address)
            .await
            .map_err(LoginError::SigningFailed)?;

        if signature.trim().is_empty() {
            return Err(LoginError::SigningFailed(ProviderError::Internal(
                "provider returned an empty signature".to_string(),
            )));
        }

        if self.config.verify_signature {
            let signer = recover_signer(nonce.as_str(), &signature)
                .map_err(LoginError::SigningFailed)?;
            if !addresses_equal(&signer, address) {
                return Err(LoginError::SigningFailed(ProviderError::Internal(format!(
                    "signature belongs to {signer}, not {address}"
                ))));
            }
        }

        debug!(address = %address, "nonce signed");
        Ok(signature)
    }
}
