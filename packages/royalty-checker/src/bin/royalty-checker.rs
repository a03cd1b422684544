//! Royalty checker binary.

use clap::Parser;
use royalty_checker::{check_royalty_payments, signature_or_usage, Config, HeliusClient};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Check that an NFT sale paid its creators their royalties.
#[derive(Parser)]
#[command(name = "royalty-checker", version, about)]
struct Cli {
    /// Signature of the NFT_SALE transaction to inspect.
    #[arg(long)]
    signature: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let signature = signature_or_usage(cli.signature, &mut std::io::stderr())?;

    let config = Config::load()?;
    info!(api = %config.api_base_url, "Configuration loaded");

    let client = HeliusClient::from_config(&config)?;
    let mut stdout = std::io::stdout().lock();
    check_royalty_payments(&config, &client, &signature, &mut stdout).await?;

    Ok(())
}
