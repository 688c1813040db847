/*
[INPUT]:  Local wallet key and a running login server
[OUTPUT]: Login payload for the wallet account
[POS]:    Examples - login flow demonstration
[UPDATE]: When login flow changes
*/

use wallet_login_adapter::*;

/// Example: Wallet login flow
///
/// This example demonstrates the complete login flow:
/// 1. Create HTTP client
/// 2. Wrap a local key as the wallet provider
/// 3. Connect wallet, request nonce, sign it
/// 4. Submit address + signature to the login endpoint
#[tokio::main]
async fn main() {
    println!("=== Wallet Login Example ===\n");

    // Step 1: Create HTTP client
    let client = match LoginClient::new("http://127.0.0.1:8000") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    // Step 2: Well-known development key, never use it for real funds
    let wallet = match LocalKeyProvider::new(
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    ) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to load wallet key: {}", e);
            return;
        }
    };
    println!("✓ Wallet ready: {}", wallet.address());

    let flow = LoginFlow::with_config(
        client,
        FlowConfig {
            expected_provider: ProviderKind::Local,
            verify_signature: true,
            ..FlowConfig::default()
        },
    );

    // Step 3-4: In a browser the token comes from the rendered page
    let csrf = CsrfToken::new("example-csrf-token");
    let result = flow
        .login(LoginRequest {
            provider: Some(&wallet),
            login_url: "/api/v1/login",
            csrf_token: &csrf,
        })
        .await;

    match result {
        Ok(outcome) => println!("✓ Logged in as {}: {}", outcome.address, outcome.payload),
        Err(e) => println!("✗ {} ({})", e.user_message(), e),
    }
}
