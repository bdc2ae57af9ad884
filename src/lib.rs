//! pulltime library
//!
//! Measures container image pull latency by timing an external container
//! runtime's `pull` command. The library root exposes the building blocks the
//! `pulltime` binary is made of: the timed [`pull`] primitive, the concurrent
//! [`concurrency::BenchmarkRunner`], the sequential [`modes`], and the
//! [`report`] records they produce.

pub mod cli;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod modes;
pub mod pull;
pub mod report;
pub mod runtime;

pub use error::{PullTimeError, Result};
pub use pull::{PullResult, Puller};
