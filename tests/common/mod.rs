use async_trait::async_trait;
use pulltime::runtime::{ContainerRuntime, ProcessOutput, ProcessRunner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fake runtime with a canned outcome per image reference
#[derive(Default)]
pub struct ScriptedRunner {
    outcomes: HashMap<String, ProcessOutput>,
    delays: HashMap<String, Duration>,
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, image: &str, outcome: ProcessOutput) -> Self {
        self.outcomes.insert(image.to_string(), outcome);
        self
    }

    pub fn with_delay(mut self, image: &str, delay: Duration) -> Self {
        self.delays.insert(image.to_string(), delay);
        self
    }

    pub fn into_runtime(self) -> (Arc<Self>, ContainerRuntime) {
        let runner = Arc::new(self);
        let runtime = ContainerRuntime::new("docker", runner.clone());
        (runner, runtime)
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, _program: &str, args: &[String]) -> ProcessOutput {
        self.calls.lock().unwrap().push(args.to_vec());
        let image = args.last().cloned().unwrap_or_default();

        if args.first().map(String::as_str) == Some("rmi") {
            return ProcessOutput::success(format!("Untagged: {}\n", image));
        }
        if let Some(delay) = self.delays.get(&image) {
            tokio::time::sleep(*delay).await;
        }
        self.outcomes
            .get(&image)
            .cloned()
            .unwrap_or_else(|| ProcessOutput::success("Status: Image is up to date\n"))
    }
}
