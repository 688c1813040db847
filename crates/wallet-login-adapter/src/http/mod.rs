/*
[INPUT]:  HTTP client configuration and login server endpoints
[OUTPUT]: HTTP responses and typed handshake results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod nonce;
pub mod session;

pub use error::{LoginError, LoginErrorKind, ProviderError, ResponseError, Result};
pub use nonce::NONCE_ENDPOINT;
pub use session::{CSRF_HEADER, LOGOUT_ENDPOINT};

pub use client::{ClientConfig, LoginClient};
