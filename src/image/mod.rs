//! Image reference and pull output handling
//!
//! Neither submodule talks to a registry. [`registry`] derives a registry label
//! from the reference string alone, and [`progress`] scrapes whatever text the
//! container runtime printed while pulling.

pub mod progress;
pub mod registry;

pub use progress::{PullOutputStats, scrape_pull_output};
pub use registry::{DEFAULT_REGISTRY, classify_registry};
