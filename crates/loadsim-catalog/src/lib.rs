//! loadsim-catalog — fixed configuration tables for the load simulator.
//!
//! Holds the immutable scenario catalog (phase timelines, replica bounds,
//! baseline latency/error rate) and the service catalog (relative resource
//! cost factors). Both are constructed once at startup and passed by
//! reference into the simulation components; nothing in this crate is
//! mutated after construction.
//!
//! Scenario selection reads the `SCENARIO` environment variable and falls
//! back to `stress_test` when unset or unrecognized — never a fatal error.

pub mod error;
pub mod scenarios;
pub mod services;
pub mod types;

pub use error::{CatalogError, CatalogResult};
pub use scenarios::{DEFAULT_SCENARIO, SCENARIO_ENV};
pub use types::{Phase, Scenario, Service};
