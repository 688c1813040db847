/*
[INPUT]:  Wallet provider, login configuration and anti-forgery token
[OUTPUT]: Login outcome, attempt progress, and auth errors
[POS]:    Auth layer - handles the wallet challenge-response login
[UPDATE]: When auth flow or signature methods change
*/

pub mod attempt;
pub mod flow;
pub mod local_wallet;
pub mod recover;
pub mod wallet;

pub use attempt::LoginAttempt;
pub use flow::{FlowConfig, LoginFlow, LoginRequest};
pub use local_wallet::LocalKeyProvider;
pub use recover::{addresses_equal, recover_signer};
pub use wallet::{MockWalletProvider, WalletProvider};
