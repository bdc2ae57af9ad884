//! Configuration for the runtime and the individual measurement modes
//!
//! These structs are built by the CLI layer and handed to the library entry
//! points, so nothing below `cli` reads flags or global state.

use crate::error::{PullTimeError, Result};
use std::env;
use std::time::Duration;

/// Environment variable consulted when `--runtime` is not given
pub const RUNTIME_ENV: &str = "PULLTIME_RUNTIME";

pub const DEFAULT_RUNTIME: &str = "docker";
pub const DEFAULT_CONCURRENCY: usize = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_ITERATIONS: usize = 3;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Which container runtime executable to drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub binary: String,
}

impl RuntimeConfig {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Pick the binary from an explicit flag, then an environment value, then the default
    pub fn resolve(flag: Option<String>, env_value: Option<String>) -> Self {
        flag.or(env_value)
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// [`RuntimeConfig::resolve`] against the process environment
    pub fn from_env(flag: Option<String>) -> Self {
        Self::resolve(flag, env::var(RUNTIME_ENV).ok())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

/// Settings for one concurrent benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Maximum number of pulls in flight at once
    pub concurrency: usize,
    /// Per-pull deadline
    pub timeout: Duration,
    /// Print the human-readable summary line before the JSON report
    pub summary: bool,
}

impl BenchmarkConfig {
    pub fn new(concurrency: usize, timeout: Duration) -> Self {
        Self {
            concurrency,
            timeout,
            summary: false,
        }
    }

    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(PullTimeError::Config(
                "Concurrency must be greater than 0".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(PullTimeError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_CONCURRENCY,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

/// Settings for the cold/warm cache analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupConfig {
    pub iterations: usize,
    /// Pause between iterations, after the cache has been cleared
    pub delay: Duration,
}

impl WarmupConfig {
    pub fn new(iterations: usize, delay: Duration) -> Self {
        Self { iterations, delay }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(PullTimeError::Config(
                "Iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WarmupConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, Duration::from_millis(DEFAULT_DELAY_MS))
    }
}
