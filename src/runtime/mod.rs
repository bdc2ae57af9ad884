//! Container runtime invocation
//!
//! The runtime is an opaque external executable. Everything that spawns a
//! process goes through the [`ProcessRunner`] trait so the pull logic and the
//! benchmark runner can be exercised against a scripted runner in tests.

use crate::config::RuntimeConfig;
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Captured outcome of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout and stderr in the order the chunks arrived, lossily decoded as UTF-8
    pub output: String,
    /// Failure cause; `None` means the process exited successfully
    pub error: Option<String>,
}

impl ProcessOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(output: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: Some(error.into()),
        }
    }
}

/// Narrow process-execution capability
///
/// Implementations must be cancel-safe: dropping the returned future before it
/// resolves has to stop the underlying process.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> ProcessOutput;
}

/// [`ProcessRunner`] backed by real subprocesses
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> ProcessOutput {
        let spawned = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return ProcessOutput::failure(
                    String::new(),
                    format!("failed to run {}: {}", program, e),
                );
            }
        };

        // Both pipes feed one buffer so output keeps its write order
        let combined = Mutex::new(Vec::new());
        tokio::join!(
            drain_into(child.stdout.take(), &combined),
            drain_into(child.stderr.take(), &combined),
        );
        let bytes = combined.into_inner().unwrap_or_else(PoisonError::into_inner);
        let output = String::from_utf8_lossy(&bytes).into_owned();

        match child.wait().await {
            Ok(status) if status.success() => ProcessOutput::success(output),
            Ok(status) => ProcessOutput::failure(output, status.to_string()),
            Err(e) => {
                ProcessOutput::failure(output, format!("failed to wait for {}: {}", program, e))
            }
        }
    }
}

async fn drain_into<R: AsyncRead + Unpin>(pipe: Option<R>, sink: &Mutex<Vec<u8>>) {
    let Some(mut pipe) = pipe else {
        return;
    };
    let mut buf = [0u8; 8192];
    loop {
        match pipe.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => sink
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(&buf[..n]),
        }
    }
}

/// A container runtime CLI such as `docker`, `podman` or `nerdctl`
#[derive(Clone)]
pub struct ContainerRuntime {
    binary: String,
    runner: Arc<dyn ProcessRunner>,
}

impl ContainerRuntime {
    pub fn new(binary: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    /// Runtime that spawns real processes for the configured binary
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.binary.clone(), Arc::new(CommandRunner))
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// `<runtime> pull <image>`
    pub async fn pull(&self, image: &str) -> ProcessOutput {
        let args = vec!["pull".to_string(), image.to_string()];
        self.runner.run(&self.binary, &args).await
    }

    /// `<runtime> rmi -f <image>`; callers treat failure as non-fatal
    pub async fn remove(&self, image: &str) -> ProcessOutput {
        let args = vec!["rmi".to_string(), "-f".to_string(), image.to_string()];
        self.runner.run(&self.binary, &args).await
    }
}

impl std::fmt::Debug for ContainerRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerRuntime")
            .field("binary", &self.binary)
            .finish_non_exhaustive()
    }
}
