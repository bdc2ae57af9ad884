//! Subcommand dispatch
//!
//! [`Runner`] owns the output sink so the full stdout transcript of a mode can
//! be captured in tests.

use crate::cli::args::Commands;
use crate::concurrency::BenchmarkRunner;
use crate::config::{BenchmarkConfig, WarmupConfig};
use crate::error::{PullTimeError, Result};
use crate::logging::{Logger, format_duration};
use crate::modes;
use crate::pull::Puller;
use crate::report::{Summary, to_json};
use crate::runtime::ContainerRuntime;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

pub struct Runner<W: Write = io::Stdout> {
    puller: Puller,
    logger: Logger,
    out: W,
}

impl Runner<io::Stdout> {
    pub fn new(runtime: ContainerRuntime, logger: Logger) -> Self {
        Self::with_output(runtime, logger, io::stdout())
    }
}

impl<W: Write> Runner<W> {
    pub fn with_output(runtime: ContainerRuntime, logger: Logger, out: W) -> Self {
        Self {
            puller: Puller::new(runtime),
            logger,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, command: Commands) -> Result<()> {
        self.logger.debug(&format!(
            "Using container runtime: {}",
            self.puller.runtime().binary()
        ));

        let benchmark = command.benchmark_config();
        let warmup = command.warmup_config();

        match command {
            Commands::Image { image } => self.run_image(&image).await,
            Commands::Benchmark { images, .. } => {
                let config = benchmark.unwrap_or_default();
                self.run_benchmark(&images, config).await
            }
            Commands::Compare { mirror, remote } => self.run_compare(&mirror, &remote).await,
            Commands::Ci { image, output } => self.run_ci(&image, output.as_deref()).await,
            Commands::Warmup { image, .. } => {
                let config = warmup.unwrap_or_default();
                self.run_warmup(&image, &config).await
            }
        }
    }

    async fn run_image(&mut self, image: &str) -> Result<()> {
        writeln!(self.out, "Pulling image: {}", image)?;
        let result = self.puller.pull(image, None).await;

        if let Some(reason) = result.error {
            if !result.cmd_output.is_empty() {
                self.logger.detail(&result.cmd_output);
            }
            return Err(PullTimeError::PullFailed {
                image: image.to_string(),
                reason,
            });
        }

        writeln!(
            self.out,
            "Image pull completed in: {}",
            format_duration(Duration::from_millis(result.pull_time_ms))
        )?;
        writeln!(self.out, "--- Runtime Output ---")?;
        writeln!(self.out, "{}", result.cmd_output)?;
        Ok(())
    }

    async fn run_benchmark(&mut self, images: &[String], config: BenchmarkConfig) -> Result<()> {
        let print_summary = config.summary;
        let runner = BenchmarkRunner::new(self.puller.clone(), config, self.logger.clone())?;
        let results = runner.run(images).await?;

        if print_summary {
            writeln!(self.out, "\n{}", Summary::from_results(&results))?;
        }
        writeln!(self.out, "{}", to_json(&results)?)?;
        Ok(())
    }

    async fn run_compare(&mut self, mirror: &str, remote: &str) -> Result<()> {
        let records = modes::compare(&self.puller, mirror, remote, &self.logger).await;
        writeln!(self.out, "{}", to_json(&records)?)?;
        Ok(())
    }

    async fn run_ci(&mut self, image: &str, output: Option<&Path>) -> Result<()> {
        let record = modes::ci(&self.puller, image, &self.logger).await;
        match output {
            Some(path) => {
                modes::write_ci_report(&record, path)?;
                writeln!(self.out, "Results written to {}", path.display())?;
            }
            None => writeln!(self.out, "{}", to_json(&record)?)?,
        }
        Ok(())
    }

    async fn run_warmup(&mut self, image: &str, config: &WarmupConfig) -> Result<()> {
        let records = modes::warmup(&self.puller, image, config, &self.logger).await?;
        writeln!(self.out, "{}", to_json(&records)?)?;
        Ok(())
    }
}
