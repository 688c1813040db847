/*
[INPUT]:  CLI arguments, YAML configuration file, wallet key env var, Ctrl-C
[OUTPUT]: Server login payload on stdout, or a revoked token
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or cancellation handling
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wallet_login_adapter::{CsrfToken, LocalKeyProvider, LoginClient, LoginFlow, LoginRequest};
use wallet_login_cli::LoginConfig;

#[derive(Parser, Debug)]
#[command(name = "wallet-login", version, about = "Log in to a server by signing its nonce with a wallet key")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Revoke this API token instead of logging in
    #[arg(long = "logout", value_name = "TOKEN")]
    logout: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting wallet-login"
    );

    let config = load_config(&args.config_path)?;
    info!(base_url = %config.server.base_url, "configuration loaded");

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let client = LoginClient::with_config(config.client_config(), &config.server.base_url)
        .context("build HTTP client")?;

    if let Some(token) = args.logout {
        let body = client.logout(&token).await.context("logout")?;
        info!(response = %body, "token revoked");
        return Ok(());
    }

    let private_key = config.private_key()?;
    let wallet = LocalKeyProvider::new(&private_key)
        .context("load wallet key")?
        .with_kind(config.wallet.provider);
    info!(address = %wallet.address(), "wallet loaded");

    let flow = LoginFlow::with_config(client, config.flow_config());
    let csrf = CsrfToken::new(config.csrf_token.clone());

    let cancel = CancellationToken::new();
    setup_signal_handler(cancel.clone());

    let outcome = flow
        .login_with_cancel(
            LoginRequest {
                provider: Some(&wallet),
                login_url: &config.server.login_url,
                csrf_token: &csrf,
            },
            &cancel,
        )
        .await
        .map_err(|err| {
            error!(kind = ?err.kind(), "{}", err.user_message());
            err
        })
        .context("wallet login")?;

    println!("{}", outcome.payload);
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<LoginConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    LoginConfig::from_file(path_str).context("load config")
}

fn setup_signal_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT, abandoning login");
        cancel.cancel();
    });
}
