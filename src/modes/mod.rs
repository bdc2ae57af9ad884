//! Sequential measurement modes
//!
//! Each mode is a plain loop around [`Puller::pull`](crate::pull::Puller::pull).
//! Individual pull failures end up in the returned records; only the caller's
//! reporting (JSON encoding, file writes) can fail the whole mode.

pub mod ci;
pub mod compare;
pub mod warmup;

pub use ci::{ci, write_ci_report};
pub use compare::compare;
pub use warmup::warmup;
