//! Fleet sampler — one scrape, one self-consistent snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use loadsim_autoscale::Autoscaler;
use loadsim_catalog::{Scenario, Service};
use loadsim_model::{Clock, NoiseSource, derived, load, resources};

/// Everything simulated for one service on one scrape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceSample {
    pub service: String,
    pub cpu_percent: f64,
    pub memory_mb: f64,
    pub replicas: u32,
    pub response_time_ms: f64,
    pub error_rate_percent: f64,
    pub requests_per_second: f64,
}

/// Point-in-time snapshot of the whole simulated fleet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetSnapshot {
    pub scenario: String,
    pub virtual_users: u32,
    pub services: Vec<ServiceSample>,
    pub total_requests_per_second: f64,
    pub total_errors_per_second: f64,
    pub total_replicas: u32,
    pub avg_cpu_percent: f64,
}

/// Drives the simulation models in order and owns the autoscaler.
///
/// Shared across all scrape handlers; the only mutation on the sample
/// path happens inside [`Autoscaler::evaluate`], which is mutex-guarded.
pub struct FleetSampler {
    scenario: Scenario,
    services: Vec<Service>,
    clock: Arc<dyn Clock>,
    noise: Arc<dyn NoiseSource>,
    autoscaler: Autoscaler,
    /// Epoch seconds at process start; immutable once set.
    start_secs: f64,
}

impl FleetSampler {
    /// Build a sampler; records "now" as the scenario's start time.
    pub fn new(
        scenario: Scenario,
        services: Vec<Service>,
        clock: Arc<dyn Clock>,
        noise: Arc<dyn NoiseSource>,
    ) -> Self {
        let autoscaler = Autoscaler::new(&scenario, &services, clock.clone());
        let start_secs = clock.now_secs();
        Self {
            scenario,
            services,
            clock,
            noise,
            autoscaler,
            start_secs,
        }
    }

    /// The active scenario.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Simulate the fleet at the current instant.
    ///
    /// Per-service order matters: CPU is computed against the replica set
    /// the previous poll left behind, then fed to the autoscaler, whose
    /// decision is what latency/error/throughput see.
    pub fn sample(&self) -> FleetSnapshot {
        let elapsed_minutes = (self.clock.now_secs() - self.start_secs) / 60.0;
        let vus = load::virtual_users(&self.scenario, elapsed_minutes, self.noise.as_ref());

        let mut samples = Vec::with_capacity(self.services.len());
        let mut total_rps = 0.0;
        let mut total_errors = 0.0;
        let mut cpu_sum = 0.0;

        for service in &self.services {
            let noise = self.noise.as_ref();
            let prior_replicas = self.autoscaler.replicas(service);
            let cpu = resources::cpu_percent(service, vus, prior_replicas, noise);
            let replicas = self.autoscaler.evaluate(service, cpu);
            let memory = resources::memory_mb(service, vus, noise);
            let response_time = derived::response_time_ms(&self.scenario, vus, cpu, noise);
            let error_rate = derived::error_rate_percent(&self.scenario, vus, cpu, replicas, noise);
            let rps = derived::requests_per_second(service, vus, replicas, noise);

            total_rps += rps;
            total_errors += rps * error_rate / 100.0;
            cpu_sum += cpu;

            samples.push(ServiceSample {
                service: service.name.clone(),
                cpu_percent: cpu,
                memory_mb: memory,
                replicas,
                response_time_ms: response_time,
                error_rate_percent: error_rate,
                requests_per_second: rps,
            });
        }

        let avg_cpu = if samples.is_empty() {
            0.0
        } else {
            cpu_sum / samples.len() as f64
        };

        debug!(elapsed_minutes, vus, "fleet sampled");

        FleetSnapshot {
            scenario: self.scenario.name.clone(),
            virtual_users: vus,
            services: samples,
            total_requests_per_second: total_rps,
            total_errors_per_second: total_errors,
            total_replicas: self.autoscaler.total_replicas(),
            avg_cpu_percent: avg_cpu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadsim_catalog::{scenarios, services};
    use loadsim_model::{GaussianNoise, ManualClock, ZeroNoise};

    fn sampler_with_clock(name: &str) -> (FleetSampler, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0.0));
        let sampler = FleetSampler::new(
            scenarios::select(Some(name)),
            services::builtin(),
            clock.clone(),
            Arc::new(ZeroNoise),
        );
        (sampler, clock)
    }

    #[test]
    fn snapshot_covers_every_service() {
        let (sampler, _) = sampler_with_clock("stress_test");
        let snap = sampler.sample();
        assert_eq!(snap.services.len(), 8);
        assert_eq!(snap.scenario, "stress_test");
    }

    #[test]
    fn one_minute_into_stress_test_baseline_holds() {
        // stress_test opens with {duration: 2min, vus: 50, hold}; at one
        // minute in, 50 users keep CPU cool and no scale event has fired.
        let (sampler, clock) = sampler_with_clock("stress_test");
        clock.advance(60.0);

        let snap = sampler.sample();
        assert_eq!(snap.virtual_users, 50);
        for sample in &snap.services {
            let expected = if sample.service == "notification-service" {
                1
            } else {
                2
            };
            assert_eq!(
                sample.replicas, expected,
                "{} scaled unexpectedly",
                sample.service
            );
        }
    }

    #[test]
    fn sixty_seconds_in_with_noise_stays_near_fifty() {
        let clock = Arc::new(ManualClock::new(0.0));
        let sampler = FleetSampler::new(
            scenarios::select(Some("stress_test")),
            services::builtin(),
            clock.clone(),
            Arc::new(GaussianNoise::seeded(5)),
        );
        clock.advance(60.0);

        let snap = sampler.sample();
        // σ = max(1, 1): anything within ±6 is comfortably in bounds.
        assert!((44..=56).contains(&snap.virtual_users));
    }

    #[test]
    fn sustained_peak_scales_up_then_cooldown_holds() {
        // Jump into the sustained 400-user peak of stress_test
        // (minutes 10-14); the gateway's CPU pins and a scale-up fires.
        let (sampler, clock) = sampler_with_clock("stress_test");
        clock.set(11.0 * 60.0);

        let first = sampler.sample();
        let gateway = |snap: &FleetSnapshot| {
            snap.services
                .iter()
                .find(|s| s.service == "api-gateway")
                .unwrap()
                .clone()
        };
        let scaled = gateway(&first);
        assert!(scaled.replicas > 2, "expected a scale-up at peak load");

        // A second poll 10s later is inside the 30s cooldown: the count
        // must not move again.
        clock.advance(10.0);
        let second = sampler.sample();
        assert_eq!(gateway(&second).replicas, scaled.replicas);
    }

    #[test]
    fn totals_are_consistent_with_per_service_lines() {
        let (sampler, clock) = sampler_with_clock("stress_test");
        clock.set(60.0);
        let snap = sampler.sample();

        let rps_sum: f64 = snap.services.iter().map(|s| s.requests_per_second).sum();
        assert!((snap.total_requests_per_second - rps_sum).abs() < 1e-9);

        let cpu_avg: f64 =
            snap.services.iter().map(|s| s.cpu_percent).sum::<f64>() / snap.services.len() as f64;
        assert!((snap.avg_cpu_percent - cpu_avg).abs() < 1e-9);

        let replica_sum: u32 = snap.services.iter().map(|s| s.replicas).sum();
        assert_eq!(snap.total_replicas, replica_sum);
    }

    #[test]
    fn replica_bounds_hold_across_a_full_lap() {
        let (sampler, clock) = sampler_with_clock("stress_test");
        let max = sampler.scenario().max_replicas;
        // Poll every 15 simulated seconds across one full 17-minute lap.
        for _ in 0..(17 * 4) {
            let snap = sampler.sample();
            for s in &snap.services {
                let min = if s.service == "notification-service" { 1 } else { 2 };
                assert!(
                    (min..=max).contains(&s.replicas),
                    "{}: {} replicas out of [{min}, {max}]",
                    s.service,
                    s.replicas
                );
            }
            clock.advance(15.0);
        }
    }

    #[test]
    fn zero_load_tail_reads_flat() {
        // 100_users ends ramped down to 0; latency must equal the
        // baseline exactly and errors must be exactly zero.
        let (sampler, clock) = sampler_with_clock("100_users");
        clock.set(10.0 * 60.0 - 0.001); // end of the ramp-down
        let snap = sampler.sample();

        assert_eq!(snap.virtual_users, 0);
        for s in &snap.services {
            assert_eq!(s.response_time_ms, 125.0);
            assert_eq!(s.error_rate_percent, 0.0);
        }
    }
}
