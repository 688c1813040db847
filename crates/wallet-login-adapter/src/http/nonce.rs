/*
[INPUT]:  Account address
[OUTPUT]: Fresh single-use nonce issued by the server
[POS]:    HTTP layer - challenge endpoint
[UPDATE]: When the nonce endpoint or its payload changes
*/

use reqwest::Method;

use crate::http::{LoginClient, LoginError, ResponseError, Result};
use crate::types::{Nonce, NonceResponse};

/// Default path of the challenge endpoint
pub const NONCE_ENDPOINT: &str = "/api/v1/nonce";

impl LoginClient {
    /// Request a fresh nonce for `address`
    ///
    /// POST /api/v1/nonce (form: address)
    pub async fn request_nonce(&self, address: &str) -> Result<Nonce> {
        self.request_nonce_at(NONCE_ENDPOINT, address).await
    }

    /// Request a fresh nonce from a non-default endpoint
    pub async fn request_nonce_at(&self, endpoint: &str, address: &str) -> Result<Nonce> {
        let address = address.trim();
        if address.is_empty() {
            return Err(LoginError::NonceRequestFailed(ResponseError::Invalid(
                "address must not be empty".to_string(),
            )));
        }

        let builder = self.request(Method::POST, endpoint)?;
        let builder = builder.form(&[("address", address)]);

        let response: NonceResponse = self
            .send_json(builder)
            .await
            .map_err(LoginError::NonceRequestFailed)?;

        match response.nonce {
            Some(nonce) if !nonce.is_empty() => Ok(Nonce::new(nonce)),
            _ => Err(LoginError::NonceRequestFailed(ResponseError::Invalid(
                "response is missing 'nonce'".to_string(),
            ))),
        }
    }
}
