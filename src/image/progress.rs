//! Best-effort scraping of runtime pull progress text
//!
//! The runtime's progress output is human-readable and unversioned. Lines that
//! do not match the legacy docker progress format are ignored, so an unknown
//! format yields empty stats rather than an error.

/// Marker printed once per layer when the runtime starts fetching it
const LAYER_MARKER: &str = "Pulling fs layer";

/// Confirmation line printed after a pull that fetched new content
const DOWNLOADED_PREFIX: &str = "Downloaded newer image for ";

/// Signals scraped from one pull's combined output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullOutputStats {
    pub bytes_downloaded: Option<u64>,
    pub layer_count: Option<usize>,
}

/// Scan pull output for a byte count and the number of fetched layers.
///
/// A line of the form `<integer>B` sets the byte count (last one wins). Each
/// `Pulling fs layer` line, with or without the `<layer-id>: ` prefix docker
/// prints, counts one layer. `layer_count` stays `None` when no layer lines
/// were seen.
pub fn scrape_pull_output(output: &str) -> PullOutputStats {
    let mut stats = PullOutputStats::default();
    let mut layers = 0usize;

    for line in output.lines() {
        let line = line.trim();
        if line.starts_with(DOWNLOADED_PREFIX) {
            continue;
        }
        if let Some(bytes) = parse_byte_line(line) {
            stats.bytes_downloaded = Some(bytes);
        }
        if is_layer_line(line) {
            layers += 1;
        }
    }

    if layers > 0 {
        stats.layer_count = Some(layers);
    }
    stats
}

fn parse_byte_line(line: &str) -> Option<u64> {
    let digits = line.strip_suffix('B')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn is_layer_line(line: &str) -> bool {
    line == LAYER_MARKER
        || line
            .strip_suffix(LAYER_MARKER)
            .is_some_and(|prefix| prefix.ends_with(": "))
}
