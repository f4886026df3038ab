//! loadsim-autoscale — simulated horizontal pod autoscaler.
//!
//! The only component with cross-poll memory: per-service replica counts
//! and cooldown timestamps, mutated as simulated CPU crosses thresholds.
//!
//! # Scaling Algorithm
//!
//! ```text
//! per poll, per service, under one lock:
//!
//! if now < scale_up cooldown deadline:
//!     hold                              // suppresses both directions
//! else if cpu > 70 and replicas < max:
//!     step    = max(1, floor((cpu - 70) / 15))
//!     desired = min(max, replicas + step)
//!     commit; cooldown deadline = now + 30s
//! else if cpu < 50 and replicas > min:
//!     only if > 300s since this service's last scale-down:
//!         replicas -= 1; record timestamp
//! ```
//!
//! The scale-up cooldown and the scale-down spacing are tracked in two
//! separate fields and never reset each other.

pub mod scaler;

pub use scaler::{Autoscaler, ScaleAction};
