//! paywallet - a server-rendered front end for the payment wallet backend.
//!
//! Serves the account, payment, key and dashboard pages behind a route
//! guard that reads the signed session token from the `token` cookie.

mod cookies;
mod handlers;
mod middleware;
mod router;
mod state;
mod views;

use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use paywallet_core::{Config, PaymentStatus, SessionClaims, TokenVerifier};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use state::AppState;

const USAGE: &str = "\
Usage:
  paywallet                                       Serve the wallet front end
  paywallet --check-config                        Print the resolved configuration
  paywallet --issue-token <id> <name> <email> <paid>
                                                  Mint a session token (development only)";

/// Lifetime of tokens minted by `--issue-token`
const ISSUED_TOKEN_TTL_HOURS: i64 = 1;

/// Initialize the tracing subscriber for logging
///
/// Use RUST_LOG to control the level (e.g. RUST_LOG=debug). When a log
/// directory is configured, a daily rolling file is written alongside stderr;
/// the returned guard must live until shutdown to flush it.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "paywallet.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    if matches!(args.get(1).map(String::as_str), Some("--help" | "-h")) {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;

    match args.get(1).map(String::as_str) {
        None => {}
        Some("--check-config") => {
            println!("{config}");
            return Ok(());
        }
        Some("--issue-token") => return issue_token(&config, &args[2..]),
        Some(other) => bail!("Unknown argument `{other}`\n\n{USAGE}"),
    }

    let _log_guard = init_tracing(config.log_dir.as_deref());
    info!(environment = %config.environment, "paywallet starting");

    serve(config).await
}

async fn serve(config: Config) -> Result<()> {
    if config.uses_development_secret() {
        warn!("Using the built-in development signing secret");
    }

    let addr = config.bind_addr;
    let state = AppState::new(config)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, api = %state.api().base_url(), "Listening");

    axum::serve(listener, router::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("paywallet shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}

/// Mint a token signed with the configured secret, for local testing
/// against a development backend.
fn issue_token(config: &Config, args: &[String]) -> Result<()> {
    if !config.environment.is_development() {
        bail!("--issue-token is only available when PAYWALLET_ENV=development");
    }
    let [id, name, email, paid] = args else {
        bail!("--issue-token expects <id> <name> <email> <paid>\n\n{USAGE}");
    };
    let paid: bool = paid
        .parse()
        .with_context(|| format!("<paid> must be true or false, got `{paid}`"))?;

    let claims = SessionClaims::new(
        id.as_str(),
        name.as_str(),
        email.as_str(),
        PaymentStatus::from(paid),
    );
    let token = TokenVerifier::new(&config.jwt_secret)
        .issue(&claims, Some(chrono::Duration::hours(ISSUED_TOKEN_TTL_HOURS)))
        .context("Failed to sign token")?;

    println!("{token}");
    Ok(())
}
