//! Cold vs warm cache analysis

use crate::config::WarmupConfig;
use crate::error::Result;
use crate::logging::Logger;
use crate::pull::Puller;
use crate::report::WarmupRecord;

/// Pull `image` repeatedly, clearing the local copy around each cycle.
///
/// The cached image is removed before the first pull and again between every
/// pair of pulls, never after the last one. Removal is best-effort: a failed
/// `rmi` is logged and ignored, which can leave a warm cache behind the next
/// measurement. Iteration 1 is labelled cold, the rest warm.
pub async fn warmup(
    puller: &Puller,
    image: &str,
    config: &WarmupConfig,
    logger: &Logger,
) -> Result<Vec<WarmupRecord>> {
    config.validate()?;

    let mut records = Vec::with_capacity(config.iterations);
    clear_cache(puller, image, logger).await;

    for iteration in 1..=config.iterations {
        logger.step(&format!("Iteration {}/{}", iteration, config.iterations));
        let result = puller.pull(image, None).await;
        if let Some(err) = &result.error {
            logger.warning(&format!("Iteration {} failed: {}", iteration, err));
        }
        records.push(WarmupRecord::from_result(iteration, result));

        if iteration < config.iterations {
            clear_cache(puller, image, logger).await;
            if !config.delay.is_zero() {
                tokio::time::sleep(config.delay).await;
            }
        }
    }

    Ok(records)
}

async fn clear_cache(puller: &Puller, image: &str, logger: &Logger) {
    let out = puller.runtime().remove(image).await;
    if let Some(err) = out.error {
        logger.detail(&format!("Ignoring failed removal of {}: {}", image, err));
    }
}
