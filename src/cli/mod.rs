//! Command line interface module
//!
//! Argument parsing lives in [`args`]; [`runner`] turns a parsed subcommand into
//! library calls and writes the resulting report.

pub mod args;
pub mod runner;

pub use args::{Cli, Commands};
pub use runner::Runner;
