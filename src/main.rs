mod config;
mod cycle;
mod error;
mod feed;
mod filter;
mod notify;
mod state;
mod types;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::cycle::SalesCycle;
use crate::error::Result;
use crate::notify::WriterSink;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    // stdout is reserved for notifications.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    info!(
        collection = %cfg.collection_address,
        page_size = cfg.page_size,
        "Checking latest sales"
    );

    let mut sink = WriterSink::stdout(cfg.output_format);
    let cycle = SalesCycle::new(cfg)?;
    cycle.run(&mut sink).await?;

    Ok(())
}
