//! loadsim-model — the phase-driven load simulation model.
//!
//! Everything here is a pure function of (catalog, elapsed time, noise):
//! the phase resolver maps elapsed wall-clock time onto the looping
//! scenario timeline, the load model derives a virtual-user count from the
//! phase position, and the resource/derived models turn virtual users into
//! per-service CPU, memory, latency, error rate, and throughput.
//!
//! # Architecture
//!
//! ```text
//! Clock ──► elapsed minutes
//!               │
//!               ▼
//! phase::resolve() ──► load::virtual_users()
//!                            │
//!               ┌────────────┼──────────────────┐
//!               ▼            ▼                  ▼
//!     resources::cpu_percent  resources::memory_mb  derived::*
//! ```
//!
//! None of these functions hold state across polls; the one stateful
//! component (the autoscaling simulator) lives in `loadsim-autoscale`.
//! Time and randomness are injected via the [`Clock`] and [`NoiseSource`]
//! traits so tests can pin both.

pub mod clock;
pub mod derived;
pub mod load;
pub mod noise;
pub mod phase;
pub mod resources;

pub use clock::{Clock, ManualClock, SystemClock};
pub use noise::{GaussianNoise, NoiseSource, ZeroNoise};
