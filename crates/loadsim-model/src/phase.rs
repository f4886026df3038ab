//! Phase resolver — maps elapsed time onto the looping scenario timeline.

use loadsim_catalog::{Phase, Scenario};

/// Resolve where on the scenario timeline an elapsed time falls.
///
/// Elapsed time is reduced modulo the scenario's total duration so the
/// timeline loops indefinitely. Returns the phase index, the phase, and
/// fractional progress within it in `[0, 1]`.
///
/// Callers must pass a validated scenario (non-empty phases, positive
/// durations); the terminal clamp below only covers floating-point edge
/// effects where the reduced elapsed time lands exactly on the total.
pub fn resolve(scenario: &Scenario, elapsed_minutes: f64) -> (usize, &Phase, f64) {
    let elapsed = elapsed_minutes.rem_euclid(scenario.duration_minutes);

    let mut cumulative = 0.0;
    for (index, phase) in scenario.phases.iter().enumerate() {
        if elapsed < cumulative + phase.duration_minutes {
            let progress = (elapsed - cumulative) / phase.duration_minutes;
            return (index, phase, progress.clamp(0.0, 1.0));
        }
        cumulative += phase.duration_minutes;
    }

    // Accumulated rounding can leave `elapsed` at or past the sum of the
    // durations; report the end of the last phase rather than indexing out
    // of range.
    let last = scenario.phases.len() - 1;
    (last, &scenario.phases[last], 1.0)
}
