//! Pet-store API Scenario Suite
//!
//! Drives a fixed catalog of request/assert sequences against a pet-store
//! REST service and reports pass/fail per case:
//! - Typed HTTP client for the `/pet` collection
//! - Three literal fixtures shared by the parameterized scenarios
//! - Sequential runner with JSON result output
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ScenarioRunner                          │
//! │    ├── run_all() -> SuiteResult                             │
//! │    ├── run_named(name) -> SuiteResult                       │
//! │    ├── run_case(scenario, fixture) -> CaseResult            │
//! │    └── write_results(&SuiteResult) -> test-results.json     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (catalog)            Fixture (x3)                 │
//! │    └── execute(session, fixture, expectations)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PetStoreClient                                             │
//! │    ├── POST   /pet          create                          │
//! │    ├── GET    /pet/{id}     get                             │
//! │    ├── PUT    /pet          update                          │
//! │    └── DELETE /pet/{id}     delete                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod fixtures;
pub mod runner;
pub mod scenario;

pub use client::{Exchange, PetStoreClient};
pub use fixtures::Fixture;
pub use petstore_common::{Error, Result, SuiteConfig};
pub use runner::{CaseResult, ScenarioRunner, SuiteResult};
pub use scenario::Scenario;
