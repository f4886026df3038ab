//! Derived-metrics model — latency, error rate, and throughput.
//!
//! These are downstream of the load and resource models: they consume the
//! virtual-user count, a service's simulated CPU, and its replica count,
//! and never touch shared state.

use loadsim_catalog::{Scenario, Service};

use crate::noise::NoiseSource;

/// CPU percentage above which latency starts degrading quadratically.
const CPU_TARGET: f64 = 70.0;

/// CPU percentage above which errors start climbing.
const ERROR_CPU_KNEE: f64 = 80.0;

/// Simulated P95 response time in milliseconds.
///
/// With no load, the scenario baseline is returned exactly — no noise —
/// so an idle system reads perfectly flat. Under load the baseline is
/// inflated by a linear load term and a quadratic CPU term, then
/// jittered by 10% and floored at 50 ms.
pub fn response_time_ms(
    scenario: &Scenario,
    vus: u32,
    cpu: f64,
    noise: &dyn NoiseSource,
) -> f64 {
    let base = scenario.response_time_base_ms;
    if vus == 0 {
        return base;
    }

    let load_factor = vus as f64 / 100.0;
    let cpu_factor = (cpu / CPU_TARGET).powi(2).max(1.0);
    let latency = base * (1.0 + load_factor * 0.3) * cpu_factor;

    (latency + noise.gauss(latency * 0.1)).max(50.0)
}

/// Simulated error rate in percent.
///
/// Exactly 0 with no load. Otherwise the scenario baseline, pushed up
/// when CPU exceeds 80% or when per-replica load exceeds 100 users,
/// jittered and clamped to `[0, 15]`.
pub fn error_rate_percent(
    scenario: &Scenario,
    vus: u32,
    cpu: f64,
    replicas: u32,
    noise: &dyn NoiseSource,
) -> f64 {
    if vus == 0 {
        return 0.0;
    }

    let mut rate = scenario.error_rate_base;
    if cpu > ERROR_CPU_KNEE {
        rate += (cpu - ERROR_CPU_KNEE) * 0.3;
    }
    let vus_per_replica = vus as f64 / replicas.max(1) as f64;
    if vus_per_replica > 100.0 {
        rate += (vus_per_replica - 100.0) * 0.02;
    }

    (rate + noise.gauss(0.2)).clamp(0.0, 15.0)
}

/// Simulated throughput for one service in requests per second.
///
/// Proportional to load and the service's cost share, split across its
/// replicas, with a small absolute jitter.
pub fn requests_per_second(
    service: &Service,
    vus: u32,
    replicas: u32,
    noise: &dyn NoiseSource,
) -> f64 {
    let rps = vus as f64 * 2.5 * service.cpu_factor / replicas.max(1) as f64;
    (rps + noise.gauss(5.0)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadsim_catalog::{scenarios, services};

    use crate::noise::{GaussianNoise, ZeroNoise};

    fn stress() -> Scenario {
        scenarios::select(Some("stress_test"))
    }

    #[test]
    fn idle_latency_is_exactly_baseline() {
        let s = stress();
        // Noisy source, but the zero-load branch must not consult it.
        let noise = GaussianNoise::seeded(1);
        assert_eq!(response_time_ms(&s, 0, 45.0, &noise), 145.0);
    }

    #[test]
    fn idle_error_rate_is_exactly_zero() {
        let s = stress();
        let noise = GaussianNoise::seeded(2);
        assert_eq!(error_rate_percent(&s, 0, 45.0, 2, &noise), 0.0);
    }

    #[test]
    fn latency_degrades_quadratically_past_cpu_target() {
        let s = stress();
        let at_target = response_time_ms(&s, 200, 70.0, &ZeroNoise);
        let past_target = response_time_ms(&s, 200, 90.0, &ZeroNoise);
        // (90/70)^2 ≈ 1.65x.
        assert!(past_target > at_target * 1.5);
    }

    #[test]
    fn cpu_below_target_does_not_discount_latency() {
        let s = stress();
        let low = response_time_ms(&s, 200, 30.0, &ZeroNoise);
        let at = response_time_ms(&s, 200, 70.0, &ZeroNoise);
        // cpu_factor floors at 1, so both see the same multiplier.
        assert_eq!(low, at);
    }

    #[test]
    fn error_rate_climbs_with_hot_cpu() {
        let s = stress();
        let cool = error_rate_percent(&s, 200, 60.0, 2, &ZeroNoise);
        let hot = error_rate_percent(&s, 200, 90.0, 2, &ZeroNoise);
        assert!(hot > cool);
        assert!((hot - (0.2 + 10.0 * 0.3 + 0.0)).abs() < 1e-9);
    }

    #[test]
    fn error_rate_climbs_with_overloaded_replicas() {
        let s = stress();
        // 400 users on 2 replicas = 200 per replica, 100 over the knee.
        let overloaded = error_rate_percent(&s, 400, 60.0, 2, &ZeroNoise);
        assert!((overloaded - (0.2 + 100.0 * 0.02)).abs() < 1e-9);
    }

    #[test]
    fn error_rate_clamped_to_fifteen() {
        let s = stress();
        let rate = error_rate_percent(&s, 10_000, 95.0, 1, &ZeroNoise);
        assert_eq!(rate, 15.0);
    }

    #[test]
    fn rps_splits_across_replicas() {
        let svc = services::builtin()
            .into_iter()
            .find(|s| s.name == "api-gateway")
            .unwrap();
        let two = requests_per_second(&svc, 400, 2, &ZeroNoise);
        let four = requests_per_second(&svc, 400, 4, &ZeroNoise);
        assert_eq!(two, 500.0);
        assert_eq!(four, 250.0);
    }

    #[test]
    fn rps_never_negative() {
        let svc = services::builtin().remove(0);
        let noise = GaussianNoise::seeded(11);
        for _ in 0..200 {
            assert!(requests_per_second(&svc, 0, 2, &noise) >= 0.0);
        }
    }
}
