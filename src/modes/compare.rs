//! Mirror-vs-remote comparison

use crate::logging::Logger;
use crate::pull::Puller;
use crate::report::CompareRecord;

/// Pull `mirror` then `remote`, one after the other.
///
/// Always yields exactly two records in that order, whatever the outcome of
/// either pull.
pub async fn compare(
    puller: &Puller,
    mirror: &str,
    remote: &str,
    logger: &Logger,
) -> Vec<CompareRecord> {
    let mut records = Vec::with_capacity(2);
    for image in [mirror, remote] {
        logger.step(&format!("Pulling {}", image));
        let result = puller.pull(image, None).await;
        if let Some(err) = &result.error {
            logger.warning(&format!("{} failed: {}", image, err));
        }
        records.push(CompareRecord::from(result));
    }
    records
}
