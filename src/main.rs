//! Command-line interface for registry-peek
//!
//! # Usage Examples
//!
//! ```bash
//! # Ten polls of one second each, then exit
//! registry-peek --brokers localhost:9092 --topic TEST1 \
//!   --schema-registry-url http://localhost:8081 \
//!   --max-polls 10 --poll-timeout 1s
//!
//! # Poll until Ctrl-C, printing JSON lines with debug logs on stderr
//! RUST_LOG=debug registry-peek --topic TEST1 --output json
//! ```

use clap::Parser;
use registry_peek::{run_peek, Config};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "registry-peek")]
#[command(about = "Print schema-registry framed Avro records from a Kafka topic")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; records own stdout, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, stopping consumer");
                cancel.cancel();
            }
        }
    });

    run_peek(cli.config, cancel).await?;

    Ok(())
}
