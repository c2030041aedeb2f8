// apps/swapper/src/main.rs

use anyhow::{Context, Result};
use dialoguer::console::style;
use swapper_common::{swap_session, Config};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging().context("initializing logging")?;

    // Load .env (JUPITER_API, RPC_URL, SECRET_KEY or KEYPAIR_PATH, PUBLIC_KEY)
    let cfg = Config::from_env().inspect_err(|e| error!("invalid configuration: {e:#}"))?;
    info!(api = %cfg.api_base, "starting swapper");

    swap_session(&cfg).await?;

    println!("{}", style("Bye.").dim());
    Ok(())
}

fn init_logging() -> Result<()> {
    // use RUST_LOG if provided; otherwise default
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,swapper_common=info,swapper=info"));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}
