//! Load generator for the storefront gateway.
//!
//! Sends a paced stream of random reads and writes and prints a summary.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_client::loadgen::{self, LoadConfig};
use storefront_client::{ClientOptions, StorefrontClient};

/// `storefront-loadgen` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "storefront-loadgen",
    about = "Drive randomized traffic at a storefront gateway and report throughput",
    version
)]
struct CliArgs {
    /// Gateway base URL.
    #[arg(long, env = "STOREFRONT_URL", default_value = "http://localhost:8080")]
    base_url: String,
    /// Requests to send in total.
    #[arg(long, default_value_t = 1000)]
    total_requests: u64,
    /// Maximum requests in flight.
    #[arg(long, default_value_t = 50)]
    concurrency: usize,
    /// Pause between dispatches, in milliseconds.
    #[arg(long, default_value_t = 50)]
    delay_ms: u64,
    /// Per-request timeout, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_seconds: u64,
    /// Seed the request mix for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    tracing::info!(
        target_url = %args.base_url,
        total_requests = args.total_requests,
        concurrency = args.concurrency,
        delay_ms = args.delay_ms,
        "Starting load test"
    );

    let client = StorefrontClient::with_options(
        &args.base_url,
        ClientOptions::with_timeout(args.timeout_seconds),
    )?;

    if let Err(e) = client.health().await {
        tracing::error!(error = %e, "Server is not reachable");
        return Err(e.into());
    }
    tracing::info!("Server is healthy, starting load test");

    let config = LoadConfig {
        total_requests: args.total_requests,
        concurrency: args.concurrency,
        delay: Duration::from_millis(args.delay_ms),
        seed: args.seed,
    };

    let report = loadgen::run(&client, &config).await;

    println!("{report}");

    Ok(())
}
