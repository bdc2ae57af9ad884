//! Report records and JSON rendering
//!
//! Every mode prints a JSON document built from the records in this module.
//! Optional fields are omitted rather than serialized as `null`.

pub mod summary;

pub use summary::Summary;

use crate::error::Result;
use crate::pull::PullResult;
use serde::{Deserialize, Serialize};

/// One side of a mirror-vs-remote comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareRecord {
    pub image: String,
    pub registry: String,
    pub pull_time_ms: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<PullResult> for CompareRecord {
    fn from(result: PullResult) -> Self {
        Self {
            image: result.image,
            registry: result.registry,
            pull_time_ms: result.pull_time_ms,
            success: result.success,
            error: result.error,
        }
    }
}

/// Single-pull record exported for CI pipelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiRecord {
    pub image: String,
    pub registry: String,
    pub success: bool,
    pub pull_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the pull finished
    pub timestamp: String,
}

impl From<PullResult> for CiRecord {
    fn from(result: PullResult) -> Self {
        Self {
            image: result.image,
            registry: result.registry,
            success: result.success,
            pull_time_ms: result.pull_time_ms,
            error: result.error,
            timestamp: result.end_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    Cold,
    Warm,
}

impl CacheState {
    /// The first iteration (1-based) runs against a cleared cache
    pub fn for_iteration(iteration: usize) -> Self {
        if iteration <= 1 {
            CacheState::Cold
        } else {
            CacheState::Warm
        }
    }
}

/// One iteration of a warmup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmupRecord {
    pub iteration: usize,
    pub pull_time_ms: u64,
    pub cache_state: CacheState,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WarmupRecord {
    pub fn from_result(iteration: usize, result: PullResult) -> Self {
        Self {
            iteration,
            pull_time_ms: result.pull_time_ms,
            cache_state: CacheState::for_iteration(iteration),
            success: result.success,
            error: result.error,
        }
    }
}

/// Pretty-print with two-space indentation
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_result() -> PullResult {
        PullResult {
            image: "registry.local:5000/app".into(),
            registry: "registry.local:5000".into(),
            success: false,
            pull_time_ms: 42,
            start_time: "2024-01-01T00:00:00Z".into(),
            end_time: "2024-01-01T00:00:01Z".into(),
            error: Some("exit status: 1".into()),
            bytes_downloaded: None,
            layer_count: None,
            cmd_output: "connection refused".into(),
        }
    }

    #[test]
    fn test_ci_record_uses_end_time() {
        let record = CiRecord::from(failed_result());
        assert_eq!(record.timestamp, "2024-01-01T00:00:01Z");
        assert_eq!(record.error.as_deref(), Some("exit status: 1"));
    }

    #[test]
    fn test_cache_state_labels() {
        assert_eq!(CacheState::for_iteration(1), CacheState::Cold);
        assert_eq!(CacheState::for_iteration(2), CacheState::Warm);
        assert_eq!(serde_json::to_string(&CacheState::Warm).unwrap(), "\"warm\"");
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let json = to_json(&vec![CompareRecord::from(failed_result())]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"image\": \"registry.local:5000/app\""));
        assert!(json.contains("\n    \"error\": \"exit status: 1\"\n"));
        assert!(!json.contains("cmd_output"));
    }
}
