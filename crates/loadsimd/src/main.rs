//! loadsimd — the load-simulation daemon.
//!
//! Single binary that assembles the simulator:
//! - Scenario + service catalogs (selected via the `SCENARIO` env var)
//! - Fleet sampler (phase timeline, load/resource/derived models)
//! - Autoscaling simulator
//! - `/metrics` scrape endpoint
//!
//! # Usage
//!
//! ```text
//! SCENARIO=spike_test loadsimd --port 8000
//! loadsimd --seed 42        # reproducible noise for recorded demos
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use loadsim_catalog::{scenarios, services};
use loadsim_metrics::FleetSampler;
use loadsim_model::{GaussianNoise, SystemClock};

#[derive(Parser)]
#[command(name = "loadsimd", about = "Synthetic load-test telemetry emitter")]
struct Cli {
    /// Port to serve /metrics on.
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Seed for the noise source; omit for OS entropy.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,loadsimd=debug,loadsim=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    run(cli.port, cli.seed).await
}

async fn run(port: u16, seed: Option<u64>) -> anyhow::Result<()> {
    info!("load simulator starting");

    // ── Catalogs ───────────────────────────────────────────────

    let scenario = scenarios::select_from_env();
    scenario.validate()?;
    info!(
        scenario = %scenario.name,
        duration_minutes = scenario.duration_minutes,
        max_replicas = scenario.max_replicas,
        "scenario loaded"
    );

    let services = services::builtin();
    services::validate(&services)?;
    info!(count = services.len(), "service catalog loaded");

    // ── Sampler ────────────────────────────────────────────────

    let noise = match seed {
        Some(seed) => {
            info!(seed, "noise source seeded");
            GaussianNoise::seeded(seed)
        }
        None => GaussianNoise::from_entropy(),
    };

    let sampler = Arc::new(FleetSampler::new(
        scenario,
        services,
        Arc::new(SystemClock),
        Arc::new(noise),
    ));

    // ── Scrape endpoint ────────────────────────────────────────

    let router = loadsim_api::build_router(sampler);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "metrics endpoint starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to install CTRL+C handler");
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("load simulator stopped");
    Ok(())
}
