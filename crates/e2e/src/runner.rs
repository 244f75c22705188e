//! Runner that executes the scenario catalog and collects results

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use petstore_common::{Error, Result, SuiteConfig};

use crate::client::{Exchange, PetStoreClient};
use crate::fixtures::{self, Fixture};
use crate::scenario::{Scenario, Session};

/// Result of running one scenario against one fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// `scenario/fixture-label`, or the scenario name alone
    pub name: String,
    pub scenario: String,
    pub fixture: Option<String>,
    pub success: bool,
    pub duration_ms: u64,
    pub exchanges: Vec<Exchange>,
    pub error: Option<String>,
    /// Outcome may depend on other writers of the same ids
    pub flaky: bool,
    /// The failure came from a status or body assertion, not from transport or setup
    #[serde(default)]
    pub assertion_failure: bool,
}

/// Result of running a set of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<CaseResult>,
}

impl SuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

/// Scenario runner
pub struct ScenarioRunner {
    client: PetStoreClient,
    config: SuiteConfig,
}

impl ScenarioRunner {
    pub fn new(config: SuiteConfig) -> Result<Self> {
        config.validate()?;
        let client = PetStoreClient::from_config(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Run the whole catalog
    pub async fn run_all(&self) -> SuiteResult {
        self.run_scenarios(&Scenario::ALL).await
    }

    /// Run one scenario by name, over all fixtures
    pub async fn run_named(&self, name: &str) -> Result<SuiteResult> {
        let scenario: Scenario = name.parse()?;
        Ok(self.run_scenarios(&[scenario]).await)
    }

    /// Run one scenario against the fixture labelled `label`
    pub async fn run_fixture(&self, scenario: Scenario, label: &str) -> Result<CaseResult> {
        if !scenario.is_parameterized() {
            return Err(Error::InvalidConfig(format!(
                "scenario {} takes no fixture",
                scenario
            )));
        }
        let fixture = fixtures::by_label(label)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown fixture: {}", label)))?;
        Ok(self.run_case(scenario, Some(&fixture)).await)
    }

    /// Run scenarios in order; a failing case never stops the suite
    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> SuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::new();

        if !self.config.isolated_target && scenarios.iter().any(|s| s.shared_state_sensitive()) {
            warn!(
                "{} is not marked isolated; scenarios asserting absence of fixed ids may be affected by other clients",
                self.client.base_url()
            );
        }

        info!("Running {} scenario(s) against {}", scenarios.len(), self.client.base_url());

        for scenario in scenarios {
            if scenario.is_parameterized() {
                for fixture in fixtures::fixtures() {
                    results.push(self.run_case(*scenario, Some(&fixture)).await);
                }
            } else {
                results.push(self.run_case(*scenario, None).await);
            }
        }

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!("Test Results: {} passed, {} failed ({} ms)", passed, failed, duration_ms);

        SuiteResult {
            base_url: self.client.base_url().to_string(),
            started_at,
            total: results.len(),
            passed,
            failed,
            duration_ms,
            results,
        }
    }

    /// Run one case
    pub async fn run_case(&self, scenario: Scenario, fixture: Option<&Fixture>) -> CaseResult {
        let name = match fixture {
            Some(f) => format!("{}/{}", scenario, f.label),
            None => scenario.to_string(),
        };
        debug!("Running case: {} ({})", name, scenario.description());

        let start = Instant::now();
        let mut session = Session::new(&self.client);
        let outcome = scenario
            .execute(&mut session, fixture, &self.config.expectations)
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let flaky = !self.config.isolated_target && scenario.shared_state_sensitive();
        let mut assertion_failure = false;
        let error = match outcome {
            Ok(()) => {
                info!("✓ {} ({} ms)", name, duration_ms);
                None
            }
            Err(e) => {
                assertion_failure = e.is_assertion();
                let kind = if assertion_failure { "assertion" } else { "error" };
                if flaky {
                    error!("✗ {} - {}: {} (shared target, may be flaky)", name, kind, e);
                } else {
                    error!("✗ {} - {}: {}", name, kind, e);
                }
                Some(e.to_string())
            }
        };

        CaseResult {
            name,
            scenario: scenario.to_string(),
            fixture: fixture.map(|f| f.label.to_string()),
            success: error.is_none(),
            duration_ms,
            exchanges: session.into_exchanges(),
            error,
            flaky,
            assertion_failure,
        }
    }

    /// Write results to `test-results.json` in the output directory
    pub fn write_results(&self, results: &SuiteResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
