//! Resource model — per-service simulated CPU and memory.

use loadsim_catalog::Service;

use crate::noise::NoiseSource;

/// Idle CPU floor every pod burns regardless of traffic.
const BASE_CPU_PERCENT: f64 = 20.0;

/// Clamp bounds for the CPU gauge.
const CPU_MIN: f64 = 10.0;
const CPU_MAX: f64 = 95.0;

/// Clamp bounds for the memory gauge (MB).
const MEMORY_MIN_MB: f64 = 200.0;
const MEMORY_MAX_MB: f64 = 950.0;

/// Simulated CPU utilization for one pod of `service`, in percent.
///
/// Growth is super-linear in load (`lf^1.3` term) to mimic cache and
/// contention effects near saturation, and is divided by `replicas / 2`
/// so horizontal scaling visibly relieves per-pod load. `replicas` is the
/// count *before* this poll's scaling decision, matching how a real HPA
/// reads utilization that the previous replica set produced.
pub fn cpu_percent(
    service: &Service,
    vus: u32,
    replicas: u32,
    noise: &dyn NoiseSource,
) -> f64 {
    let mut cpu = BASE_CPU_PERCENT;
    if vus > 0 {
        let load_factor = (vus as f64 / 100.0) * service.cpu_factor;
        cpu += load_factor * 15.0 + load_factor.powf(1.3) * 5.0;
    }

    cpu /= replicas.max(1) as f64 / 2.0;
    cpu += noise.gauss(3.0);
    cpu.clamp(CPU_MIN, CPU_MAX)
}

/// Simulated memory usage for one pod of `service`, in megabytes.
///
/// Deliberately not divided by the replica count: a pod's footprint is
/// mostly its own heap and caches, only request volume moves it.
pub fn memory_mb(service: &Service, vus: u32, noise: &dyn NoiseSource) -> f64 {
    let mut memory = service.memory_base_mb;
    if vus > 0 {
        memory += (vus as f64 / 50.0) * 10.0;
    }
    memory += noise.gauss(15.0);
    memory.clamp(MEMORY_MIN_MB, MEMORY_MAX_MB)
}
