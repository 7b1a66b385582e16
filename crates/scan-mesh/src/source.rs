//! Scan source abstraction.

use async_trait::async_trait;
use polar_grid::ScanMetadata;

use crate::error::Result;

/// Raw payload handed over by the data-access layer: row-major sample codes
/// plus the scan geometry header. Shape validation happens when the payload
/// is turned into a `PolarScan`.
#[derive(Debug, Clone)]
pub struct RawScan {
    pub metadata: ScanMetadata,
    pub samples: Vec<u8>,
}

/// Asynchronous provider of decoded scan payloads, keyed by source id.
///
/// Fetching is the pipeline's only suspension point; implementations
/// typically wrap a network locator plus an archive decoder.
#[async_trait]
pub trait ScanSource: Send + Sync {
    async fn fetch(&self, source_id: &str) -> Result<RawScan>;
}
