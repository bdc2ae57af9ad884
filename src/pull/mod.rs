//! Single timed pull
//!
//! [`Puller::pull`] is the primitive every mode is built from: run the
//! runtime's pull command, time it against the wall clock, and turn the outcome
//! into a [`PullResult`]. Failures never escape as errors; they are recorded on
//! the result so sibling pulls are unaffected.

use crate::image::{classify_registry, scrape_pull_output};
use crate::runtime::ContainerRuntime;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One measured pull attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullResult {
    pub image: String,
    pub registry: String,
    pub success: bool,
    pub pull_time_ms: u64,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_downloaded: Option<u64>,
    #[serde(rename = "layers", default, skip_serializing_if = "Option::is_none")]
    pub layer_count: Option<usize>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cmd_output: String,
}

/// Runs timed pulls against a container runtime
#[derive(Debug, Clone)]
pub struct Puller {
    runtime: ContainerRuntime,
}

impl Puller {
    pub fn new(runtime: ContainerRuntime) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &ContainerRuntime {
        &self.runtime
    }

    /// Pull `image`, optionally bounded by `timeout`.
    ///
    /// When the deadline passes first, the in-flight pull future is dropped,
    /// which kills the runtime process, and the result is marked failed. The
    /// pull mutates the host's image store, so repeating it may hit a warm
    /// cache.
    pub async fn pull(&self, image: &str, timeout: Option<Duration>) -> PullResult {
        let started_at = Utc::now();
        let start = Instant::now();

        let (output, error) = match timeout {
            Some(limit) => match tokio::time::timeout(limit, self.runtime.pull(image)).await {
                Ok(out) => (out.output, out.error),
                Err(_) => (
                    String::new(),
                    Some(format!("pull timed out after {}ms", limit.as_millis())),
                ),
            },
            None => {
                let out = self.runtime.pull(image).await;
                (out.output, out.error)
            }
        };

        let elapsed = start.elapsed();
        let finished_at = Utc::now();
        let stats = scrape_pull_output(&output);

        PullResult {
            image: image.to_string(),
            registry: classify_registry(image),
            success: error.is_none(),
            pull_time_ms: duration_millis(elapsed),
            start_time: format_timestamp(started_at),
            end_time: format_timestamp(finished_at),
            error,
            bytes_downloaded: stats.bytes_downloaded,
            layer_count: stats.layer_count,
            cmd_output: output,
        }
    }
}

/// RFC 3339, UTC, second precision
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn duration_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ProcessOutput, ProcessRunner};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedRunner(ProcessOutput);

    #[async_trait]
    impl ProcessRunner for FixedRunner {
        async fn run(&self, _program: &str, _args: &[String]) -> ProcessOutput {
            self.0.clone()
        }
    }

    struct HangingRunner;

    #[async_trait]
    impl ProcessRunner for HangingRunner {
        async fn run(&self, _program: &str, _args: &[String]) -> ProcessOutput {
            std::future::pending().await
        }
    }

    fn puller(runner: impl ProcessRunner + 'static) -> Puller {
        Puller::new(ContainerRuntime::new("docker", Arc::new(runner)))
    }

    #[tokio::test]
    async fn test_successful_pull_populates_scraped_fields() {
        let output = "abc: Pulling fs layer\ndef: Pulling fs layer\n5120B\n";
        let puller = puller(FixedRunner(ProcessOutput::success(output)));

        let result = puller.pull("ghcr.io/org/app:1", None).await;

        assert!(result.success);
        assert_eq!(result.error, None);
        assert_eq!(result.registry, "ghcr.io");
        assert_eq!(result.bytes_downloaded, Some(5120));
        assert_eq!(result.layer_count, Some(2));
        assert_eq!(result.cmd_output, output);
        assert!(result.start_time <= result.end_time);
    }

    #[tokio::test]
    async fn test_failed_pull_keeps_error_and_output() {
        let puller = puller(FixedRunner(ProcessOutput::failure(
            "Error response from daemon: manifest unknown\n",
            "exit status: 1",
        )));

        let result = puller.pull("nosuch/image", Some(Duration::from_secs(5))).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("exit status: 1"));
        assert_eq!(result.registry, "docker.io");
        assert!(result.cmd_output.contains("manifest unknown"));
        assert_eq!(result.layer_count, None);
    }

    #[tokio::test]
    async fn test_hanging_pull_times_out() {
        let puller = puller(HangingRunner);
        let start = Instant::now();

        let result = puller.pull("alpine", Some(Duration::from_millis(50))).await;

        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("timed out"));
        assert!(result.pull_time_ms >= 50);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timestamp_format() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T12:34:56.789+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(at), "2024-03-01T10:34:56Z");
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let result = PullResult {
            image: "alpine".into(),
            registry: "docker.io".into(),
            success: true,
            pull_time_ms: 12,
            start_time: "2024-01-01T00:00:00Z".into(),
            end_time: "2024-01-01T00:00:00Z".into(),
            error: None,
            bytes_downloaded: None,
            layer_count: Some(1),
            cmd_output: String::new(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("error").is_none());
        assert!(value.get("bytes_downloaded").is_none());
        assert!(value.get("cmd_output").is_none());
        assert_eq!(value["layers"], 1);
        assert_eq!(value["pull_time_ms"], 12);
    }
}
