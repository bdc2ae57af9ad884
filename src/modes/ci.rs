//! Single pull exported for CI pipelines

use crate::error::Result;
use crate::logging::Logger;
use crate::pull::Puller;
use crate::report::{CiRecord, to_json};
use std::path::Path;

pub async fn ci(puller: &Puller, image: &str, logger: &Logger) -> CiRecord {
    logger.step(&format!("Pulling {}", image));
    let result = puller.pull(image, None).await;
    if let Some(err) = &result.error {
        logger.warning(&format!("{} failed: {}", image, err));
    }
    CiRecord::from(result)
}

/// Write the record as pretty JSON to `path`, replacing any existing file
pub fn write_ci_report(record: &CiRecord, path: &Path) -> Result<()> {
    let json = to_json(record)?;
    std::fs::write(path, json)?;
    Ok(())
}
