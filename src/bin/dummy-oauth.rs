//! Dummy OAuth server binary.
//!
//! Loads the signing key, wires the token and discovery operations into the
//! router and serves them over HTTP until interrupted.

use anyhow::Result;
use clap::Parser;
use dummy_oauth::{
    config::{Config, HttpAddress, JwksUri},
    http::{AppState, MultiRouter, PermissiveAuthorizer, build_router, make_api_router},
    key_provider::{PemFileKeyProvider, SigningKeyProvider},
    oauth::{DiscoveryService, DummyOAuth, TokenService, discovery::static_jwk},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing_subscriber::prelude::*;

/// Command-line overrides for the environment configuration.
#[derive(Debug, Parser)]
#[command(name = "dummy-oauth", version, about = "Issues signed access tokens for integration tests")]
struct Args {
    /// Listen address, e.g. ":8085" or "127.0.0.1:8085"
    #[arg(long)]
    addr: Option<String>,

    /// RSA private key PEM used to sign tokens
    #[arg(long)]
    private_key_file: Option<String>,

    /// JWKS URI published in the authorization server metadata
    #[arg(long)]
    jwks_uri: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "dummy_oauth=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    let args = Args::parse();

    let mut config = Config::new()?;
    if let Some(addr) = args.addr {
        config.http_address = HttpAddress::try_from(addr)?;
    }
    if let Some(private_key_file) = args.private_key_file {
        config.private_key_file = private_key_file;
    }
    if let Some(jwks_uri) = args.jwks_uri {
        config.jwks_uri = JwksUri::try_from(jwks_uri)?;
    }

    tracing::info!(version = ?config.version, "Starting dummy OAuth server");

    let signing_key = PemFileKeyProvider::new(&config.private_key_file)
        .signing_key()
        .await?;
    if !signing_key.matches(&static_jwk()) {
        tracing::warn!(
            private_key_file = %config.private_key_file,
            "signing key does not match the published JWKS; issued tokens will not validate against it"
        );
    }

    let implementation = DummyOAuth::new(
        TokenService::new(Arc::new(signing_key)),
        DiscoveryService::new(config.jwks_uri.as_ref()),
    );
    let app_state = AppState::new(Arc::new(implementation), Arc::new(PermissiveAuthorizer));
    let app = build_router(MultiRouter::new().with_router(make_api_router(app_state)?));

    // Setup graceful shutdown
    let tracker = TaskTracker::new();
    let token = CancellationToken::new();

    {
        let tracker = tracker.clone();
        let inner_token = token.clone();

        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {}", err);
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut terminate) => {
                    terminate.recv().await;
                }
                Err(err) => {
                    tracing::error!("failed to install signal handler: {}", err);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::spawn(async move {
            tokio::select! {
                () = inner_token.cancelled() => { },
                _ = terminate => {},
                _ = ctrl_c => {},
            }

            tracker.close();
            inner_token.cancel();
        });
    }

    // Start HTTP server
    let bind_address = *config.http_address.as_ref();
    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!("Starting server on {bind_address}");
    {
        let inner_token = token.clone();
        tracker.spawn(async move {
            let shutdown_token = inner_token.clone();
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_token.cancelled().await;
                    tracing::info!("axum graceful shutdown complete");
                })
                .await;
            if let Err(err) = result {
                tracing::error!("axum task failed: {}", err);
            }

            inner_token.cancel();
        });
    }

    tracker.wait().await;

    Ok(())
}
