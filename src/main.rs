//! Conformance runner for the posts collection API.
//!
//! Runs the full scenario table against the configured base URL and
//! reports a pass/fail summary. Scenarios probing documented divergences
//! of the live service fail there by design; the failure is the finding.

use clap::Parser;
use posts_conformance::{
    ConformanceSuite, Dataset, HarnessConfig, PostsClient, init_logging, scenario_table,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = HarnessConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        base_url = %config.base_url,
        timeout_secs = config.request_timeout,
        "Starting conformance run"
    );

    let client = PostsClient::new(&config)?;
    let dataset = Dataset::canonical();
    let scenarios = scenario_table(&dataset);
    let suite = ConformanceSuite::new(client, dataset, config.budget());

    let total = scenarios.len();
    let mut failed = 0usize;
    for scenario in &scenarios {
        info!(scenario = %scenario, "running");
        match suite.run(scenario).await {
            Ok(()) => info!(scenario = %scenario, "passed"),
            Err(err) => {
                failed += 1;
                error!(scenario = %scenario, error = %err, "failed");
            }
        }
    }

    info!(total, passed = total - failed, failed, "Conformance run complete");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
