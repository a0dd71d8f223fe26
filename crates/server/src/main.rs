//! pageforge daemon: accepts webhook task requests, generates a single-file
//! web app, publishes it, and reports completion to the caller's evaluator.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pageforge_server::{config::Config, http, vcs::GitCli};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pageforge-server", version, about = "Task webhook daemon")]
struct Cli {
    /// Where the HTTP API will listen, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Root directory for per-attempt publish workspaces.
    #[arg(long, default_value = ".pageforge/workspaces")]
    workspaces_root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env(cli.listen, cli.workspaces_root)?;
    tokio::fs::create_dir_all(&config.workspaces_root).await?;

    let state = http::AppState::new(Arc::new(config), Arc::new(GitCli));
    let listen = state.config.listen.clone();
    let app = http::router(state);

    info!(listen = %listen, "pageforge starting");
    axum::serve(tokio::net::TcpListener::bind(&listen).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
