//! Trip Settlement Runner Binary
//!
//! Weighs and settles one trip scenario and prints the settlement report as
//! JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Run a scenario file
//! cargo run --bin trip-settle -- crates/interface_cli/scenarios/truck_trip.json
//!
//! # Or take the path from the environment
//! SETTLE_SCENARIO_PATH=trip.json SETTLE_LOG_LEVEL=debug cargo run --bin trip-settle
//! ```
//!
//! # Environment Variables
//!
//! * `SETTLE_SCENARIO_PATH` - Scenario file, overridden by the first argument
//! * `SETTLE_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `SETTLE_LOG_JSON` - Emit JSON log lines (default: false)

use anyhow::{Context, Result};
use interface_cli::{RunnerConfig, ScenarioRunner, TripScenario};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let mut config = RunnerConfig::from_env().context("invalid SETTLE_* configuration")?;
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_scenario_path(path);
    }

    init_tracing(&config.log_level, config.log_json);

    let path = config
        .scenario_path
        .context("no scenario given: pass a path or set SETTLE_SCENARIO_PATH")?;
    tracing::info!(path = %path.display(), "running trip scenario");

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read scenario {}", path.display()))?;
    let scenario: TripScenario = serde_json::from_str(&raw)
        .with_context(|| format!("malformed scenario {}", path.display()))?;

    let report = ScenarioRunner::new().run(&scenario).await.map_err(|e| {
        tracing::error!(kind = %e.kind(), error = %e, "scenario failed");
        e
    })?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
