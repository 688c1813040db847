/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public wallet login crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    FlowConfig,
    LocalKeyProvider,
    LoginAttempt,
    LoginFlow,
    LoginRequest,
    MockWalletProvider,
    WalletProvider,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    LoginClient,
    LoginError,
    LoginErrorKind,
    ProviderError,
    ResponseError,
    Result,
};

// Re-export all types
pub use types::*;
