//! hubgate - container registry gateway daemon
//!
//! Serves the Docker Registry HTTP API v2 on one port and relays every
//! request to the upstream registry selected by host label or `?ns=`:
//! - `/token` goes to the auth issuer
//! - `/v1/search` goes to the Docker Hub index
//! - `/health`, `/healthz` answer locally
//!
//! Access via: http://localhost:50001

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use hubgate_core::AppState;
use hubgate_types::GatewayConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod router;
mod server_utils;
mod settings;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = settings::load_config(cli.config.as_deref(), &cli.overrides)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Config { json } => show_config(&config, json),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

async fn serve(config: GatewayConfig) -> Result<()> {
    info!("🚀 hubgate {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Canonical registry {}, {} aliases, auth issuer {}",
        config.upstreams.canonical_host,
        config.upstreams.aliases.len(),
        config.auth_issuer
    );

    let listener = server_utils::create_listener(&config).await?;
    let state = AppState::new(config).map_err(|e| anyhow::anyhow!(e))?;
    let app = router::build_router(state);

    info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("✅ Server stopped");
    Ok(())
}

fn show_config(config: &GatewayConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Gateway Configuration:".cyan().bold());
    println!("  Listen: {}", config.socket_addr());
    println!("  Canonical registry: {}", config.upstreams.canonical_host);
    println!("  Search index: {}", config.upstreams.search_host);
    println!("  Auth issuer: {}", config.auth_issuer);
    println!("  Default namespace: {}", config.default_namespace);
    println!("  Max redirects: {}", config.max_redirects);
    println!("  Max body bytes: {}", config.max_body_bytes);
    println!("  Length check: {}", config.length_check);
    println!("  Blocked user agents: {}", config.blocked_user_agents.join(", "));
    println!("{}", "Upstream aliases:".cyan().bold());
    for (label, host) in &config.upstreams.aliases {
        println!("  {} → {}", label, host);
    }
    Ok(())
}
