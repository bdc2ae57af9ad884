//! Concurrent benchmark runner
//!
//! [`BenchmarkRunner`] fans a list of images out over tokio tasks. A
//! [`Semaphore`] sized to the configured concurrency is the admission gate; each
//! task holds its permit for the whole pull and until its result has been
//! appended to the shared collection. Workers are fully isolated: a failed or
//! timed-out pull is just another [`PullResult`], and no worker can cancel a
//! sibling.
//!
//! ```no_run
//! use pulltime::concurrency::BenchmarkRunner;
//! use pulltime::config::{BenchmarkConfig, RuntimeConfig};
//! use pulltime::logging::Logger;
//! use pulltime::pull::Puller;
//! use pulltime::runtime::ContainerRuntime;
//!
//! # async fn example() -> pulltime::Result<()> {
//! let puller = Puller::new(ContainerRuntime::from_config(&RuntimeConfig::default()));
//! let runner = BenchmarkRunner::new(puller, BenchmarkConfig::default(), Logger::new(false))?;
//! let results = runner.run(&["alpine:3.20".to_string(), "nginx:1.27".to_string()]).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::BenchmarkConfig;
use crate::error::{PullTimeError, Result};
use crate::logging::Logger;
use crate::pull::{PullResult, Puller};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};

pub struct BenchmarkRunner {
    puller: Puller,
    config: BenchmarkConfig,
    logger: Logger,
}

impl BenchmarkRunner {
    /// Create a runner; rejects an invalid configuration before anything is dispatched
    pub fn new(puller: Puller, config: BenchmarkConfig, logger: Logger) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            puller,
            config,
            logger,
        })
    }

    /// Pull every image and return one result per image, in completion order.
    ///
    /// Returns only after every dispatched pull has finished. An empty input
    /// performs no work.
    pub async fn run(&self, images: &[String]) -> Result<Vec<PullResult>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        self.logger.section("Benchmark");
        self.logger.info(&format!(
            "Pulling {} image(s) with concurrency {} (timeout {})",
            images.len(),
            self.config.concurrency,
            self.logger.format_duration(self.config.timeout)
        ));

        // More permits than images would never be used
        let slots = self.config.concurrency.min(images.len());
        let gate = Arc::new(Semaphore::new(slots));
        let results = Arc::new(Mutex::new(Vec::with_capacity(images.len())));

        let handles: Vec<_> = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let gate = Arc::clone(&gate);
                let results = Arc::clone(&results);
                let puller = self.puller.clone();
                let logger = self.logger.clone();
                let image = image.clone();
                let timeout = self.config.timeout;

                tokio::spawn(async move {
                    let _permit = gate.acquire_owned().await.map_err(|e| {
                        PullTimeError::Task(format!("Failed to acquire pull slot: {}", e))
                    })?;

                    logger.detail(&format!("[task-{}] pulling {}", index, image));
                    let result = puller.pull(&image, Some(timeout)).await;

                    match &result.error {
                        None => logger.detail(&format!(
                            "[task-{}] {} completed in {}ms",
                            index, image, result.pull_time_ms
                        )),
                        Some(err) => logger.warning(&format!("{} failed: {}", image, err)),
                    }

                    results.lock().await.push(result);
                    Ok::<_, PullTimeError>(())
                })
            })
            .collect();

        for outcome in join_all(handles).await {
            outcome??;
        }

        let results = std::mem::take(&mut *results.lock().await);
        let succeeded = results.iter().filter(|r| r.success).count();
        self.logger.info(&format!(
            "Benchmark finished: {}/{} pulls succeeded",
            succeeded,
            results.len()
        ));

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ContainerRuntime, ProcessOutput, ProcessRunner};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Sleeps for every pull while tracking how many pulls overlap
    #[derive(Default)]
    struct GaugeRunner {
        active: AtomicUsize,
        peak: AtomicUsize,
        finished: AtomicUsize,
    }

    #[async_trait]
    impl ProcessRunner for GaugeRunner {
        async fn run(&self, _program: &str, args: &[String]) -> ProcessOutput {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(40)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            self.finished.fetch_add(1, Ordering::SeqCst);

            if args.last().is_some_and(|image| image.starts_with("bad")) {
                ProcessOutput::failure("pull access denied", "exit status: 1")
            } else {
                ProcessOutput::success("Pulling fs layer\n")
            }
        }
    }

    fn runner_with(gauge: Arc<GaugeRunner>, concurrency: usize) -> BenchmarkRunner {
        let puller = Puller::new(ContainerRuntime::new("docker", gauge));
        let config = BenchmarkConfig::new(concurrency, Duration::from_secs(10));
        BenchmarkRunner::new(puller, config, Logger::new_quiet()).unwrap()
    }

    fn images(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_gate_bounds_in_flight_pulls() {
        let gauge = Arc::new(GaugeRunner::default());
        let runner = runner_with(gauge.clone(), 2);

        let results = runner
            .run(&images(&["a", "b", "c", "d", "e"]))
            .await
            .unwrap();

        assert_eq!(results.len(), 5);
        assert!(gauge.peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(gauge.peak.load(Ordering::SeqCst), 2);
        assert_eq!(gauge.finished.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_failures_do_not_affect_siblings() {
        let gauge = Arc::new(GaugeRunner::default());
        let runner = runner_with(gauge.clone(), 3);
        let input = images(&["ok-1", "bad-1", "ok-2", "bad-2"]);

        let results = runner.run(&input).await.unwrap();

        assert_eq!(results.len(), input.len());
        for image in &input {
            let result = results.iter().find(|r| &r.image == image).unwrap();
            assert_eq!(result.success, image.starts_with("ok"));
            if !result.success {
                assert_eq!(result.error.as_deref(), Some("exit status: 1"));
            } else {
                assert_eq!(result.layer_count, Some(1));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrency_one_is_sequential() {
        let gauge = Arc::new(GaugeRunner::default());
        let runner = runner_with(gauge.clone(), 1);

        let results = runner.run(&images(&["a", "b", "c"])).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(gauge.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_ample_concurrency_starts_every_pull_at_once() {
        let gauge = Arc::new(GaugeRunner::default());
        let runner = runner_with(gauge.clone(), 5);

        let results = runner.run(&images(&["a", "b", "c"])).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(gauge.peak.load(Ordering::SeqCst), 3);
        assert_eq!(gauge.finished.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unbounded_concurrency_value_is_accepted() {
        let gauge = Arc::new(GaugeRunner::default());
        let runner = runner_with(gauge.clone(), usize::MAX);

        let results = runner.run(&images(&["alpine", "nginx"])).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(gauge.peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_input_does_no_work() {
        let gauge = Arc::new(GaugeRunner::default());
        let runner = runner_with(gauge.clone(), 2);

        let results = runner.run(&[]).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(gauge.finished.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_concurrency_rejected_up_front() {
        let gauge = Arc::new(GaugeRunner::default());
        let puller = Puller::new(ContainerRuntime::new("docker", gauge));
        let config = BenchmarkConfig::new(0, Duration::from_secs(10));
        let outcome = BenchmarkRunner::new(puller, config, Logger::new_quiet());
        assert!(matches!(outcome, Err(PullTimeError::Config(_))));
    }
}
