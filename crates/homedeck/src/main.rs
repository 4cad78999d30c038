use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use homedeck::Server;

/// Workspace directory: first CLI argument, or `~/.local/share/homedeck`.
fn workspace_dir() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homedeck")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let workspace = workspace_dir();
    tracing::info!(workspace = %workspace.display(), "starting homedeck");

    let server = Server::new(workspace).await?;
    println!("homedeck listening on http://{}", server.addr());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
