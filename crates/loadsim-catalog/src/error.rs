//! Error types for catalog validation.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised when a catalog entry is internally inconsistent.
///
/// The built-in catalogs are fixed, so any of these indicates a defect in
/// the tables themselves; validation runs once at process start.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("scenario {0} has no phases")]
    EmptyPhases(String),

    #[error("scenario {scenario} phase {index} has non-positive duration {duration}")]
    NonPositiveDuration {
        scenario: String,
        index: usize,
        duration: f64,
    },

    #[error("scenario {scenario} has non-positive total duration {duration}")]
    NonPositiveTotal { scenario: String, duration: f64 },

    #[error("scenario {scenario} replica bounds invalid: base {base} > max {max}")]
    ReplicaBounds { scenario: String, base: u32, max: u32 },

    #[error("service catalog is empty")]
    NoServices,

    #[error("duplicate service name {0}")]
    DuplicateService(String),
}
