/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed login configuration and derived client/flow settings
[POS]:    Configuration layer - login runner setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use wallet_login_adapter::http::NONCE_ENDPOINT;
use wallet_login_adapter::{ClientConfig, FlowConfig, ProviderKind};

/// Top-level configuration for the login runner
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginConfig {
    /// Login server endpoints and timeouts
    pub server: ServerConfig,
    /// Anti-forgery token the server expects in `X-CSRFToken`
    pub csrf_token: String,
    /// Wallet used to sign the challenge
    #[serde(default)]
    pub wallet: WalletConfig,
    /// Recover the signer locally before submitting
    #[serde(default)]
    pub verify_signature: bool,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL all relative endpoints resolve against
    pub base_url: String,
    /// Login endpoint, relative or absolute
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_nonce_endpoint")]
    pub nonce_endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Wallet configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Environment variable holding the hex private key
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,
    /// Provider kind the local wallet declares and the flow expects
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key_env: default_private_key_env(),
            provider: default_provider(),
        }
    }
}

fn default_login_url() -> String {
    "/api/v1/login".to_string()
}

fn default_nonce_endpoint() -> String {
    NONCE_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_private_key_env() -> String {
    "WALLET_PRIVATE_KEY".to_string()
}

fn default_provider() -> ProviderKind {
    ProviderKind::Local
}

impl LoginConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would fail the flow before it starts
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.base_url.trim().is_empty() {
            bail!("server.base_url must not be empty");
        }
        if self.server.login_url.trim().is_empty() {
            bail!("server.login_url must not be empty");
        }
        if self.csrf_token.trim().is_empty() {
            bail!("csrf_token must not be empty");
        }
        if self.server.timeout_secs == 0 {
            bail!("server.timeout_secs must be positive");
        }
        if self.wallet.private_key_env.trim().is_empty() {
            bail!("wallet.private_key_env must name an environment variable");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.server.timeout_secs),
            connect_timeout: Duration::from_secs(self.server.connect_timeout_secs),
        }
    }

    pub fn flow_config(&self) -> FlowConfig {
        FlowConfig {
            expected_provider: self.wallet.provider,
            nonce_endpoint: self.server.nonce_endpoint.clone(),
            verify_signature: self.verify_signature,
        }
    }

    /// Read the wallet key from the configured environment variable
    pub fn private_key(&self) -> anyhow::Result<String> {
        std::env::var(&self.wallet.private_key_env)
            .with_context(|| format!("environment variable {} not set", self.wallet.private_key_env))
    }
}
