/*
[INPUT]:  EVM private key (hex string)
[OUTPUT]: personal_sign signatures and checksummed wallet address
[POS]:    Auth layer - in-process wallet provider implementation
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::str::FromStr;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::auth::{WalletProvider, addresses_equal};
use crate::http::{LoginError, ProviderError, Result};
use crate::types::ProviderKind;

/// Wallet provider backed by a key held in memory
///
/// Exposes exactly one account and signs with EIP-191 `personal_sign`,
/// the same scheme MetaMask uses for login messages.
pub struct LocalKeyProvider {
    signer: PrivateKeySigner,
    address: String,
    kind: ProviderKind,
}

impl LocalKeyProvider {
    /// Create a provider from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.trim();
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| LoginError::Config(format!("Invalid EVM private key: {e}")))?;

        let address = signer.address().to_checksum(None);

        Ok(Self {
            signer,
            address,
            kind: ProviderKind::Local,
        })
    }

    /// Declare a different provider kind, e.g. to stand in for MetaMask
    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl WalletProvider for LocalKeyProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn request_accounts(&self) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(vec![self.address.clone()])
    }

    async fn sign(&self, message: &str, address: &str) -> std::result::Result<String, ProviderError> {
        if !addresses_equal(address, &self.address) {
            return Err(ProviderError::Internal(format!(
                "unknown account {address}"
            )));
        }

        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| ProviderError::Internal(format!("Failed to sign message: {e}")))?;

        // [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
