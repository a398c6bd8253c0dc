#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;
use std::process::ExitCode;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::cli::Cli;
use crate::cli::Command;
use crate::storage::Backend;
use crate::storage::Config;
use crate::storage::Storage;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

mod api;
mod cli;
mod client;
mod graceful_shutdown;
mod notes;
mod root;
mod storage;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "notas=debug,tower_http=debug";
const DEFAULT_CLIENT_RUST_LOG: &str = "notas=warn";
const DEFAULT_ADDRESS: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    setup_environment();

    let cli = Cli::parse();
    setup_tracing(matches!(cli.command, Command::Serve { .. }));

    cli::run(cli).await
}

/// Run the API server until a shutdown signal arrives
///
/// # Errors
///
/// Will return `Err` if any of its dependencies fail to load:
/// - Storage connection or migrations
/// - Listening address
pub async fn serve(config: Config) -> Result<()> {
    let address = setup_address()?;

    match storage::setup(config).await? {
        Backend::Postgres(storage) => serve_storage(storage, address).await,
        Backend::Memory(storage) => serve_storage(storage, address).await,
    }
}

async fn serve_storage<S: Storage>(storage: S, address: SocketAddr) -> Result<()> {
    let app = create_router(storage);

    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create the router for Notas
pub fn create_router<S: Storage>(storage: S) -> Router {
    Router::new()
        .route("/", get(root::root))
        .nest("/api", router::<S>())
        .fallback(root::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing(is_server: bool) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    let default_filter = if is_server {
        DEFAULT_RUST_LOG
    } else {
        DEFAULT_CLIENT_RUST_LOG
    };

    registry()
        .with(EnvFilter::new(
            env_var("RUST_LOG").unwrap_or_else(|| default_filter.into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Some(port) = env_var("PORT") {
        let port = port.parse::<u16>()?;

        address.set_port(port);
    }

    Ok(address)
}
