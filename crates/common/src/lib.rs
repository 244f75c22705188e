//! Pet-store Common Library
//!
//! Shared types, errors and configuration for the pet-store scenario suite
//! and the in-memory mock service.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Expectations, SuiteConfig};
pub use error::{Error, Result};
pub use types::{Category, Pet};

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Public sample service the suite targets by default
pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
