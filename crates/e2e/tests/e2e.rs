//! Scenario harness entry point
//!
//! Runs the catalog against a freshly spawned mock (the default) or a live
//! service.
//! Run with: cargo test --package petstore-e2e --test e2e
//! Live:     cargo test --package petstore-e2e --test e2e -- --target live

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use petstore_e2e::{Scenario, ScenarioRunner, SuiteConfig, SuiteResult};
use petstore_mock::{MockConfig, MockServer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// In-process mock pet store
    Mock,
    /// The configured base URL
    Live,
}

#[derive(Parser, Debug)]
#[command(name = "petstore-e2e")]
#[command(about = "Scenario runner for the pet-store REST API")]
struct Args {
    /// Where to send requests
    #[arg(long, value_enum, default_value = "mock")]
    target: Target,

    /// TOML suite configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Service root for --target live
    #[arg(long, env = "PETSTORE_BASE_URL")]
    base_url: Option<String>,

    /// Run only this scenario
    #[arg(short, long)]
    scenario: Option<String>,

    /// Run only this fixture (requires --scenario)
    #[arg(short, long, requires = "scenario")]
    fixture: Option<String>,

    /// Expected status of an update after delete (404 rejects, 200 upserts)
    #[arg(long)]
    update_missing_status: Option<u16>,

    /// The live target is private to this run
    #[arg(long)]
    isolated: bool,

    /// Spawn the mock with upsert-on-update enabled
    #[arg(long)]
    mock_upsert: bool,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List scenarios and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for scenario in Scenario::ALL {
            println!("{:<32} {}", scenario.name(), scenario.description());
        }
        return;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(2);
        }
    };

    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> anyhow::Result<bool> {
    let mut config = SuiteConfig::load(args.config.as_deref())?;

    let mock = match args.target {
        Target::Mock => {
            let server = MockServer::spawn(MockConfig {
                upsert_on_update: args.mock_upsert,
                ..Default::default()
            })
            .await?;
            config.base_url = server.base_url().to_string();
            config.isolated_target = true;
            if args.mock_upsert && args.update_missing_status.is_none() {
                config.expectations.update_missing_status = 200;
            }
            Some(server)
        }
        Target::Live => {
            if let Some(url) = args.base_url {
                config.base_url = url;
            }
            config.isolated_target |= args.isolated;
            None
        }
    };

    if let Some(status) = args.update_missing_status {
        config.expectations.update_missing_status = status;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }

    let runner = ScenarioRunner::new(config)?;

    let results = match (args.scenario, args.fixture) {
        (Some(name), Some(label)) => {
            let scenario: Scenario = name.parse()?;
            let result = runner.run_fixture(scenario, &label).await?;
            SuiteResult {
                base_url: runner.config().base_url.clone(),
                started_at: chrono::Utc::now(),
                total: 1,
                passed: usize::from(result.success),
                failed: usize::from(!result.success),
                duration_ms: result.duration_ms,
                results: vec![result],
            }
        }
        (Some(name), None) => runner.run_named(&name).await?,
        (None, _) => runner.run_all().await,
    };

    runner.write_results(&results)?;

    for failure in results.failures() {
        info!("failed: {} - {}", failure.name, failure.error.as_deref().unwrap_or("unknown error"));
    }

    if let Some(server) = mock {
        server.shutdown().await;
    }

    Ok(results.success())
}
