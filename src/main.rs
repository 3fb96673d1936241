use agora::cli::Cli;
use agora::config::Settings;
use agora::vendors::AdapterRegistry;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    info!(
        "Starting Agora multi-agent chat server on {}:{}",
        settings.server.host, settings.server.port
    );
    info!("Summary vendor: {}", settings.summary.vendor);

    let registry = Arc::new(AdapterRegistry::from_settings(&settings));
    let app = agora::create_app(registry, settings.summary.vendor.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
