//! The built-in scenario catalog.
//!
//! Six fixed load profiles, from a light 100-user test up to a three-hour
//! soak. Selection is by name via the `SCENARIO` environment variable;
//! anything unrecognized silently falls back to the default so a demo
//! never fails to boot over a typo.

use tracing::{info, warn};

use crate::types::{Phase, Scenario};

/// Environment variable that selects the active scenario.
pub const SCENARIO_ENV: &str = "SCENARIO";

/// Name of the scenario used when `SCENARIO` is unset or unknown.
pub const DEFAULT_SCENARIO: &str = "stress_test";

fn phase(duration_minutes: f64, target_vus: u32, ramp: bool) -> Phase {
    Phase {
        duration_minutes,
        target_vus,
        ramp,
    }
}

/// Build the full scenario catalog.
pub fn builtin() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "100_users".to_string(),
            title: "Light Load Test - 100 Users".to_string(),
            duration_minutes: 10.0,
            phases: vec![
                phase(2.0, 20, true),    // ramp up
                phase(6.0, 100, false),  // steady state
                phase(2.0, 0, true),     // ramp down
            ],
            base_replicas: 2,
            max_replicas: 3,
            error_rate_base: 0.1,
            response_time_base_ms: 125.0,
        },
        Scenario {
            name: "1000_users".to_string(),
            title: "Medium Load Test - 1000 Users".to_string(),
            duration_minutes: 15.0,
            phases: vec![
                phase(3.0, 200, true),
                phase(9.0, 1000, false),
                phase(3.0, 0, true),
            ],
            base_replicas: 2,
            max_replicas: 6,
            error_rate_base: 0.5,
            response_time_base_ms: 185.0,
        },
        Scenario {
            name: "10000_users".to_string(),
            title: "Heavy Load Test - 10000 Users".to_string(),
            duration_minutes: 20.0,
            phases: vec![
                phase(4.0, 2000, true),
                phase(12.0, 10000, false),
                phase(4.0, 0, true),
            ],
            base_replicas: 2,
            max_replicas: 10,
            error_rate_base: 1.5,
            response_time_base_ms: 285.0,
        },
        Scenario {
            name: "stress_test".to_string(),
            title: "Stress Test with HPA Auto-Scaling".to_string(),
            duration_minutes: 17.0,
            phases: vec![
                phase(2.0, 50, false),   // baseline
                phase(3.0, 200, true),   // ramp to 200
                phase(2.0, 300, true),   // ramp to 300
                phase(3.0, 400, true),   // ramp to 400 (peak)
                phase(4.0, 400, false),  // sustain peak
                phase(3.0, 50, true),    // ramp down
            ],
            base_replicas: 2,
            max_replicas: 8,
            error_rate_base: 0.2,
            response_time_base_ms: 145.0,
        },
        Scenario {
            name: "spike_test".to_string(),
            title: "Spike Test - Sudden Traffic Burst".to_string(),
            duration_minutes: 8.0,
            phases: vec![
                phase(2.0, 50, false),   // baseline
                phase(0.2, 500, true),   // spike
                phase(3.0, 500, false),  // sustain spike
                phase(0.2, 50, true),    // drop
                phase(2.6, 50, false),   // recovery
            ],
            base_replicas: 2,
            max_replicas: 8,
            error_rate_base: 0.2,
            response_time_base_ms: 145.0,
        },
        Scenario {
            name: "soak_test".to_string(),
            title: "Soak Test - 3 Hour Stability".to_string(),
            duration_minutes: 180.0,
            phases: vec![
                phase(5.0, 50, true),
                phase(170.0, 50, false),
                phase(5.0, 0, true),
            ],
            base_replicas: 2,
            max_replicas: 2,
            error_rate_base: 0.05,
            response_time_base_ms: 125.0,
        },
    ]
}

/// Select a scenario by name, falling back to [`DEFAULT_SCENARIO`].
///
/// An unknown name is never fatal: dashboards being demoed should come up
/// regardless, so the fallback is logged and the default is used.
pub fn select(name: Option<&str>) -> Scenario {
    let catalog = builtin();
    let wanted = name.unwrap_or(DEFAULT_SCENARIO);

    if let Some(found) = catalog.iter().find(|s| s.name == wanted) {
        info!(scenario = %found.name, title = %found.title, "scenario selected");
        return found.clone();
    }

    warn!(
        requested = wanted,
        fallback = DEFAULT_SCENARIO,
        "unknown scenario, falling back to default"
    );
    catalog
        .into_iter()
        .find(|s| s.name == DEFAULT_SCENARIO)
        .expect("default scenario is always in the catalog")
}

/// Select the active scenario from the `SCENARIO` environment variable.
pub fn select_from_env() -> Scenario {
    let name = std::env::var(SCENARIO_ENV).ok();
    select(name.as_deref())
}
