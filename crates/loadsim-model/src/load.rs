//! Load model — derives the current virtual-user count.

use loadsim_catalog::Scenario;

use crate::noise::NoiseSource;
use crate::phase;

/// Relative jitter applied to the interpolated virtual-user count.
const VUS_NOISE_FRACTION: f64 = 0.02;

/// Current virtual-user count at `elapsed_minutes` into the scenario.
///
/// Ramp phases interpolate linearly from the previous phase's target
/// (0 for the first phase); hold phases sit at the target exactly.
/// Gaussian jitter with σ = max(1, 2% of the value) is re-sampled on
/// every call — two concurrent polls may legitimately disagree by a few
/// users, which is why this is not part of any shared state.
pub fn virtual_users(
    scenario: &Scenario,
    elapsed_minutes: f64,
    noise: &dyn NoiseSource,
) -> u32 {
    let (index, current, progress) = phase::resolve(scenario, elapsed_minutes);

    let vus = if current.ramp {
        let prev = if index > 0 {
            scenario.phases[index - 1].target_vus as f64
        } else {
            0.0
        };
        prev + (current.target_vus as f64 - prev) * progress
    } else {
        current.target_vus as f64
    };

    let jitter = noise.gauss((vus * VUS_NOISE_FRACTION).max(1.0));
    (vus + jitter).max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadsim_catalog::scenarios;

    use crate::noise::ZeroNoise;

    #[test]
    fn hold_phase_equals_target_without_noise() {
        let s = scenarios::select(Some("stress_test"));
        // Phase 0: 2 minutes holding at 50.
        assert_eq!(virtual_users(&s, 1.0, &ZeroNoise), 50);
    }

    #[test]
    fn ramp_interpolates_from_previous_target() {
        let s = scenarios::select(Some("stress_test"));
        // Phase 1 ramps 50 → 200 over 3 minutes; at minute 3.5 we are
        // halfway, so 125 users.
        assert_eq!(virtual_users(&s, 3.5, &ZeroNoise), 125);
    }

    #[test]
    fn first_phase_ramp_starts_from_zero() {
        let s = scenarios::select(Some("100_users"));
        // Phase 0 ramps 0 → 20 over 2 minutes.
        assert_eq!(virtual_users(&s, 1.0, &ZeroNoise), 10);
    }

    #[test]
    fn never_negative_with_noise() {
        let s = scenarios::select(Some("100_users"));
        let noise = crate::noise::GaussianNoise::seeded(99);
        // Ramp-down tail sits at 0 users; jitter must not underflow.
        for _ in 0..200 {
            let vus = virtual_users(&s, 9.9, &noise);
            assert!(vus < 20, "vus {vus} too far from 0");
        }
    }

    #[test]
    fn jitter_stays_near_target() {
        let s = scenarios::select(Some("stress_test"));
        let noise = crate::noise::GaussianNoise::seeded(7);
        // Holding at 50, sigma is max(1, 1.0) = 1: 6σ bound.
        for _ in 0..200 {
            let vus = virtual_users(&s, 1.0, &noise);
            assert!((44..=56).contains(&vus), "vus {vus} outside noise bounds");
        }
    }
}
