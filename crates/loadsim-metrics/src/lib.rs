//! loadsim-metrics — turns one scrape into one consistent snapshot.
//!
//! # Architecture
//!
//! ```text
//! FleetSampler
//!   └── sample() ← called per scrape
//!         ├── load model        → one virtual-user count
//!         ├── resource model    → per-service CPU / memory
//!         ├── autoscaler        → replica decision (the only mutation)
//!         └── derived metrics   → latency, error rate, throughput
//!
//! Prometheus exposition
//!   └── render_exposition() → text/plain for /metrics
//! ```
//!
//! A `FleetSnapshot` is internally consistent: every derived value within
//! it was computed from the same virtual-user draw and the same replica
//! decisions. Nothing here is retained between scrapes.

pub mod exposition;
pub mod sampler;

pub use exposition::render_exposition;
pub use sampler::{FleetSampler, FleetSnapshot, ServiceSample};
