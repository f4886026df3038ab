//! The built-in service catalog.
//!
//! Eight simulated microservices modeled after a small clinical booking
//! platform. The cost factor scales simulated CPU relative to the
//! gateway; notification-service is the designated low-priority service
//! and is allowed to drop to a single replica.

use crate::error::{CatalogError, CatalogResult};
use crate::types::Service;

fn service(name: &str, cpu_factor: f64, memory_base_mb: f64, min_replicas: u32) -> Service {
    Service {
        name: name.to_string(),
        cpu_factor,
        memory_base_mb,
        min_replicas,
    }
}

/// Build the full service catalog.
pub fn builtin() -> Vec<Service> {
    vec![
        service("api-gateway", 1.0, 512.0, 2),
        service("auth-service", 0.7, 384.0, 2),
        service("patient-service", 0.6, 356.0, 2),
        service("appointment-service", 0.55, 342.0, 2),
        service("dental-records-service", 0.5, 328.0, 2),
        service("xray-service", 0.6, 384.0, 2),
        service("treatment-service", 0.45, 312.0, 2),
        service("notification-service", 0.3, 256.0, 1),
    ]
}

/// Check the service catalog for duplicates and emptiness.
pub fn validate(services: &[Service]) -> CatalogResult<()> {
    if services.is_empty() {
        return Err(CatalogError::NoServices);
    }
    for (i, s) in services.iter().enumerate() {
        if services[..i].iter().any(|other| other.name == s.name) {
            return Err(CatalogError::DuplicateService(s.name.clone()));
        }
    }
    Ok(())
}
