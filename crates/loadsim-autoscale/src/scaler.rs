//! HPA-style autoscaling simulator.
//!
//! Compares each service's simulated CPU against fixed scale-up/scale-down
//! thresholds and adjusts its replica count, with a hard cooldown after
//! scale-ups and a longer spacing between scale-downs. All replica and
//! cooldown state sits behind a single mutex so a decision and its commit
//! are atomic with respect to concurrent scrapes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use loadsim_catalog::{Scenario, Service};
use loadsim_model::Clock;

/// CPU percentage above which a service scales up.
const SCALE_UP_CPU: f64 = 70.0;

/// CPU percentage below which a service may scale down.
const SCALE_DOWN_CPU: f64 = 50.0;

/// Seconds after a scale-up during which all scaling is suppressed.
const SCALE_UP_COOLDOWN_SECS: f64 = 30.0;

/// Minimum seconds between two scale-downs of the same service.
const SCALE_DOWN_SPACING_SECS: f64 = 300.0;

/// Outcome of one scaling evaluation, mainly for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAction {
    Up { from: u32, to: u32 },
    Down { from: u32, to: u32 },
    Hold,
}

/// Per-service scaling state.
///
/// The scale-up cooldown and the scale-down timestamp are deliberately two
/// separate fields; they are independent windows and must never clobber
/// each other.
#[derive(Debug, Clone, Copy)]
struct ServiceScaleState {
    replicas: u32,
    /// Epoch seconds until which all scaling is suppressed.
    cooldown_until: Option<f64>,
    /// Epoch seconds of the most recent scale-down, if any.
    last_scale_down: Option<f64>,
}

impl ServiceScaleState {
    fn new(replicas: u32) -> Self {
        Self {
            replicas,
            cooldown_until: None,
            last_scale_down: None,
        }
    }
}

/// The autoscaling simulator.
///
/// Created once at startup with every service at its initial replica
/// count; lives for the process lifetime. Replica counts always stay
/// within `[service.min_replicas, scenario.max_replicas]`.
pub struct Autoscaler {
    max_replicas: u32,
    clock: Arc<dyn Clock>,
    states: Mutex<HashMap<String, ServiceScaleState>>,
}

impl Autoscaler {
    /// Build the simulator with every service at its starting count.
    pub fn new(scenario: &Scenario, services: &[Service], clock: Arc<dyn Clock>) -> Self {
        let states = services
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    ServiceScaleState::new(s.initial_replicas(scenario)),
                )
            })
            .collect();

        Self {
            max_replicas: scenario.max_replicas,
            clock,
            states: Mutex::new(states),
        }
    }

    /// Current replica count for a service, without evaluating.
    ///
    /// Used by the resource model: CPU for this poll reflects the replica
    /// set that existed before this poll's scaling decision.
    pub fn replicas(&self, service: &Service) -> u32 {
        let mut states = self.lock_states();
        self.state_for(&mut states, service).replicas
    }

    /// Sum of replica counts across all tracked services.
    pub fn total_replicas(&self) -> u32 {
        let states = self.lock_states();
        states.values().map(|s| s.replicas).sum()
    }

    /// Evaluate one service against its current simulated CPU, mutating
    /// replica state, and return the (possibly updated) count.
    pub fn evaluate(&self, service: &Service, cpu: f64) -> u32 {
        let now = self.clock.now_secs();
        let mut states = self.lock_states();
        let state = self.state_for(&mut states, service);

        let action = Self::transition(state, service, cpu, now, self.max_replicas);
        match action {
            ScaleAction::Up { from, to } => {
                info!(service = %service.name, from, to, cpu, "scaled up");
            }
            ScaleAction::Down { from, to } => {
                info!(service = %service.name, from, to, cpu, "scaled down");
            }
            ScaleAction::Hold => {}
        }

        state.replicas
    }

    /// Pure transition function: applies one evaluation to `state`.
    fn transition(
        state: &mut ServiceScaleState,
        service: &Service,
        cpu: f64,
        now: f64,
        max_replicas: u32,
    ) -> ScaleAction {
        // An active scale-up cooldown freezes scaling in both directions.
        if let Some(deadline) = state.cooldown_until
            && now < deadline
        {
            return ScaleAction::Hold;
        }

        if cpu > SCALE_UP_CPU && state.replicas < max_replicas {
            // Step size grows with how far CPU overshoots the target,
            // like a proportional HPA.
            let step = (((cpu - SCALE_UP_CPU) / 15.0) as u32).max(1);
            let desired = (state.replicas + step).min(max_replicas);
            if desired > state.replicas {
                let from = state.replicas;
                state.replicas = desired;
                state.cooldown_until = Some(now + SCALE_UP_COOLDOWN_SECS);
                return ScaleAction::Up { from, to: desired };
            }
        } else if cpu < SCALE_DOWN_CPU && state.replicas > service.min_replicas {
            let spaced = state
                .last_scale_down
                .is_none_or(|t| now - t > SCALE_DOWN_SPACING_SECS);
            if spaced {
                let from = state.replicas;
                state.replicas -= 1;
                state.last_scale_down = Some(now);
                return ScaleAction::Down {
                    from,
                    to: state.replicas,
                };
            }
        }

        ScaleAction::Hold
    }

    fn lock_states(&self) -> std::sync::MutexGuard<'_, HashMap<String, ServiceScaleState>> {
        // A panic while holding the lock cannot corrupt the map (all
        // mutations are single writes), so a poisoned lock is still usable.
        self.states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_for<'a>(
        &self,
        states: &'a mut HashMap<String, ServiceScaleState>,
        service: &Service,
    ) -> &'a mut ServiceScaleState {
        states.entry(service.name.clone()).or_insert_with(|| {
            // The catalogs are fixed at boot, so a missing entry is a
            // wiring defect. Recover at the service floor.
            warn!(service = %service.name, "service missing from scale state");
            ServiceScaleState::new(service.min_replicas)
        })
    }
}
