//! Logging and diagnostic output
//!
//! This module provides the [`Logger`] used by every mode for progress and
//! diagnostic messages. Reports (JSON arrays, the `image` mode transcript) are
//! written to standard output by the caller; everything the logger emits goes
//! to standard error so the report stays machine-readable.

use std::time::{Duration, Instant};

/// Logger responsible for all diagnostic output
#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
    pub start_time: Option<Instant>,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            start_time: Some(Instant::now()),
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            start_time: Some(Instant::now()),
        }
    }

    /// Build a logger from the global CLI flags; `quiet` wins over `verbose`
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::new_quiet()
        } else {
            Self::new(verbose)
        }
    }

    /// Main section heading
    pub fn section(&self, title: &str) {
        if self.verbose && !self.quiet {
            eprintln!("\n=== {} ===", title);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("🐛 DEBUG: {}", self.stamp(message));
        }
    }

    /// Information message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("ℹ️  {}", message);
        }
    }

    /// Warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("⚠️  WARNING: {}", message);
        }
    }

    /// Step information
    pub fn step(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("▶️  {}", message);
        }
    }

    /// Detailed information (only shown in verbose mode)
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("   {}", self.stamp(message));
        }
    }

    /// Format duration in human-readable format
    pub fn format_duration(&self, duration: Duration) -> String {
        format_duration(duration)
    }

    fn stamp(&self, message: &str) -> String {
        match self.start_time {
            Some(start) => format!("[{:8.3}s] {}", start.elapsed().as_secs_f64(), message),
            None => message.to_string(),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Format a duration the way pull timings are shown to users.
///
/// Sub-second durations are shown in milliseconds, anything under a minute in
/// fractional seconds, and longer runs as `XmYs` / `XhYmZs`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{:.3}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
