//! Command-line argument parsing

use crate::config::{
    BenchmarkConfig, DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS, DEFAULT_ITERATIONS,
    DEFAULT_TIMEOUT_SECS, RuntimeConfig, WarmupConfig,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "pulltime")]
#[command(about = "A CLI tool to measure image pull time from remote registries")]
#[command(version)]
pub struct Cli {
    /// Container runtime executable
    #[arg(
        long = "runtime",
        short = 'r',
        global = true,
        help = "Container runtime binary to invoke (default: docker, or $PULLTIME_RUNTIME)"
    )]
    pub runtime: Option<String>,

    /// Verbose output
    #[arg(
        long = "verbose",
        short = 'v',
        global = true,
        help = "Enable verbose diagnostics on stderr"
    )]
    pub verbose: bool,

    /// Quiet output
    #[arg(long = "quiet", short = 'q', global = true, help = "Suppress diagnostics on stderr")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Measure pull time for a container image
    Image {
        /// Image reference to pull
        image: String,
    },

    /// Benchmark pull times for multiple container images and output JSON report
    Benchmark {
        /// Image references to pull
        #[arg(required = true)]
        images: Vec<String>,

        #[arg(
            long = "concurrent",
            short = 'c',
            default_value_t = DEFAULT_CONCURRENCY,
            help = "Number of concurrent pulls"
        )]
        concurrent: usize,

        #[arg(
            long = "timeout",
            short = 't',
            default_value_t = DEFAULT_TIMEOUT_SECS,
            help = "Timeout (seconds) for each pull"
        )]
        timeout: u64,

        #[arg(long = "summary", short = 's', help = "Print summary statistics")]
        summary: bool,
    },

    /// Compare pull times between a mirror and a remote registry, outputting a JSON report
    Compare {
        /// Image reference served by the mirror
        mirror: String,
        /// Same image from the remote registry
        remote: String,
    },

    /// Measure and export image pull time for CI/CD integration (JSON output)
    Ci {
        /// Image reference to pull
        image: String,

        #[arg(long = "output", help = "Write the JSON report to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Repeatedly pull and remove an image to measure cold and warm cache pull times
    Warmup {
        /// Image reference to pull
        image: String,

        #[arg(
            long = "iterations",
            short = 'n',
            default_value_t = DEFAULT_ITERATIONS,
            help = "Number of pull/remove iterations"
        )]
        iterations: usize,

        #[arg(
            long = "delay",
            short = 'd',
            default_value_t = DEFAULT_DELAY_MS,
            help = "Delay (ms) between iterations"
        )]
        delay: u64,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Runtime from `--runtime`, falling back to `$PULLTIME_RUNTIME`
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::from_env(self.runtime.clone())
    }
}

impl Commands {
    /// Benchmark settings, if this is the `benchmark` subcommand
    pub fn benchmark_config(&self) -> Option<BenchmarkConfig> {
        match self {
            Commands::Benchmark {
                concurrent,
                timeout,
                summary,
                ..
            } => Some(
                BenchmarkConfig::new(*concurrent, Duration::from_secs(*timeout))
                    .with_summary(*summary),
            ),
            _ => None,
        }
    }

    /// Warmup settings, if this is the `warmup` subcommand
    pub fn warmup_config(&self) -> Option<WarmupConfig> {
        match self {
            Commands::Warmup {
                iterations, delay, ..
            } => Some(WarmupConfig::new(*iterations, Duration::from_millis(*delay))),
            _ => None,
        }
    }
}
