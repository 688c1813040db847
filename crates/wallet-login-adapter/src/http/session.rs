/*
[INPUT]:  Address, signature, anti-forgery token, issued API token
[OUTPUT]: Server login payload or logout acknowledgement
[POS]:    HTTP layer - login and logout endpoints
[UPDATE]: When login payload, CSRF header or logout route change
*/

use reqwest::Method;
use reqwest::header::AUTHORIZATION;

use crate::http::{LoginClient, LoginError, ResponseError, Result};
use crate::types::{CsrfToken, LoginForm, LoginOutcome};

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Default path of the token logout endpoint
pub const LOGOUT_ENDPOINT: &str = "/api/v1/logout";

impl LoginClient {
    /// Submit a signed challenge
    ///
    /// POST {login_url} (form: address, signature; header: X-CSRFToken)
    pub async fn submit_login(
        &self,
        login_url: &str,
        address: &str,
        signature: &str,
        csrf_token: &CsrfToken,
    ) -> Result<LoginOutcome> {
        if csrf_token.is_empty() {
            return Err(LoginError::LoginFailed(ResponseError::Invalid(
                "anti-forgery token is missing".to_string(),
            )));
        }

        let form = LoginForm { address, signature };
        let builder = self
            .request(Method::POST, login_url)?
            .header(CSRF_HEADER, csrf_token.as_str())
            .form(&form);

        let payload: serde_json::Value = self
            .send_json(builder)
            .await
            .map_err(LoginError::LoginFailed)?;

        Ok(LoginOutcome {
            address: address.to_string(),
            payload,
        })
    }

    /// Revoke an API token
    ///
    /// POST /api/v1/logout (header: Authorization: Bearer {token})
    pub async fn logout(&self, token: &str) -> Result<serde_json::Value> {
        let builder = self
            .request(Method::POST, LOGOUT_ENDPOINT)?
            .header(AUTHORIZATION, format!("Bearer {token}"));

        self.send_json(builder)
            .await
            .map_err(LoginError::LogoutFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_submit_login_sends_form_and_csrf_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts/login-with-metamask"))
            .and(header(CSRF_HEADER, "csrf-abc"))
            .and(body_string("address=0xABC&signature=0xsig"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"detail": "/admin/"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LoginClient::new(&server.uri()).unwrap();
        let outcome = client
            .submit_login(
                "/accounts/login-with-metamask",
                "0xABC",
                "0xsig",
                &CsrfToken::new("csrf-abc"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.address, "0xABC");
        assert_eq!(outcome.redirect(), Some("/admin/"));
    }

    #[tokio::test]
    async fn test_submit_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"detail": "You cannot access this site"})),
            )
            .mount(&server)
            .await;

        let client = LoginClient::new(&server.uri()).unwrap();
        let err = client
            .submit_login("/api/v1/login", "0xABC", "0xsig", &CsrfToken::new("csrf"))
            .await
            .unwrap_err();

        assert_eq!(err.status().map(|status| status.as_u16()), Some(403));
        assert!(err.to_string().contains("You cannot access this site"));
    }

    #[tokio::test]
    async fn test_submit_login_requires_csrf_token() {
        let server = MockServer::start().await;
        let client = LoginClient::new(&server.uri()).unwrap();

        let err = client
            .submit_login("/api/v1/login", "0xABC", "0xsig", &CsrfToken::new(""))
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::LoginFailed(ResponseError::Invalid(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_logout_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_ENDPOINT))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"detail": "Logout success."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LoginClient::new(&server.uri()).unwrap();
        let body = client.logout("tok-1").await.unwrap();
        assert_eq!(body["detail"], "Logout success.");
    }

    #[tokio::test]
    async fn test_logout_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGOUT_ENDPOINT))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Invalid token."})),
            )
            .mount(&server)
            .await;

        let client = LoginClient::new(&server.uri()).unwrap();
        let err = client.logout("stale").await.unwrap_err();
        assert!(matches!(err, LoginError::LogoutFailed(_)));
    }
}
