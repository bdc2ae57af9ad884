//! Registry classification for image references

/// Label used for references that carry no registry host
pub const DEFAULT_REGISTRY: &str = "docker.io";

/// Derive the registry label for an image reference.
///
/// The component before the first `/` is treated as a registry host only when
/// it looks like `host[:port]`, i.e. it contains a `.` or a `:`. Everything
/// else (`ubuntu`, `library/ubuntu`, `grafana/loki:2.9`) belongs to the
/// default public registry. This is a heuristic, not a full reference parse.
pub fn classify_registry(image: &str) -> String {
    match image.split_once('/') {
        Some((prefix, _)) if prefix.contains('.') || prefix.contains(':') => prefix.to_string(),
        _ => DEFAULT_REGISTRY.to_string(),
    }
}
