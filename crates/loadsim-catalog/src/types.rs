//! Domain types for the simulation catalogs.
//!
//! These types describe what to simulate, not anything that happens at
//! runtime: a `Scenario` is a looping phase timeline with replica bounds
//! and baselines, a `Service` is a simulated workload with a relative
//! resource cost. All of them are immutable after catalog construction.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

// ── Scenario ───────────────────────────────────────────────────────

/// A named load profile: an ordered phase timeline that loops for the
/// lifetime of the process, plus the bounds the autoscaling simulator
/// operates within.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Stable key used for selection and the `scenario` metric label.
    pub name: String,
    /// Human-readable description, logged at startup.
    pub title: String,
    /// Total timeline length in minutes. Elapsed time is reduced modulo
    /// this value so the scenario repeats indefinitely.
    pub duration_minutes: f64,
    /// Ordered phases; durations sum to `duration_minutes`.
    pub phases: Vec<Phase>,
    /// Replica count every service starts with (the low-priority service
    /// overrides this, see [`Service::initial_replicas`]).
    pub base_replicas: u32,
    /// Upper replica bound for the autoscaling simulator.
    pub max_replicas: u32,
    /// Baseline error rate in percent at nominal load.
    pub error_rate_base: f64,
    /// Baseline P95 response time in milliseconds at nominal load.
    pub response_time_base_ms: f64,
}

/// One segment of a scenario timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Segment length in minutes.
    pub duration_minutes: f64,
    /// Virtual-user count this phase targets.
    pub target_vus: u32,
    /// When true, virtual users interpolate linearly from the previous
    /// phase's target to this one; when false they hold at the target.
    pub ramp: bool,
}

impl Scenario {
    /// Check internal consistency of the definition.
    ///
    /// The built-in catalog is fixed, so a failure here is a programming
    /// defect; the daemon runs this once at startup.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.phases.is_empty() {
            return Err(CatalogError::EmptyPhases(self.name.clone()));
        }
        if self.duration_minutes <= 0.0 {
            return Err(CatalogError::NonPositiveTotal {
                scenario: self.name.clone(),
                duration: self.duration_minutes,
            });
        }
        for (index, phase) in self.phases.iter().enumerate() {
            if phase.duration_minutes <= 0.0 {
                return Err(CatalogError::NonPositiveDuration {
                    scenario: self.name.clone(),
                    index,
                    duration: phase.duration_minutes,
                });
            }
        }
        if self.base_replicas > self.max_replicas {
            return Err(CatalogError::ReplicaBounds {
                scenario: self.name.clone(),
                base: self.base_replicas,
                max: self.max_replicas,
            });
        }
        Ok(())
    }
}

// ── Service ────────────────────────────────────────────────────────

/// A simulated microservice and its relative resource cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    /// Unique name, used as the `service` metric label.
    pub name: String,
    /// Relative CPU cost multiplier (1.0 = the most expensive service).
    pub cpu_factor: f64,
    /// Baseline memory footprint per pod in megabytes.
    pub memory_base_mb: f64,
    /// Floor for the autoscaling simulator. 1 marks the designated
    /// low-priority service; every other service floors at 2.
    pub min_replicas: u32,
}

impl Service {
    /// Replica count this service boots with.
    ///
    /// The low-priority service starts at its floor instead of the
    /// scenario base.
    pub fn initial_replicas(&self, scenario: &Scenario) -> u32 {
        if self.min_replicas == 1 {
            1
        } else {
            scenario.base_replicas
        }
    }
}
