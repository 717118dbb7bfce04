//! The downloader seam between the lifecycle controller and the external tool.

use async_trait::async_trait;

use crate::download::options::DownloadRequest;
use crate::download::outcome::DownloadOutcome;
use crate::error::Result;
use crate::output::CourseLog;

/// Something that can download a course into its working directory.
///
/// Implementations report per-course failures and user cancellation through
/// [`DownloadOutcome`]; an `Err` is reserved for problems with the local
/// environment (for example the course log becoming unwritable).
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(
        &self,
        request: &DownloadRequest<'_>,
        log: &mut CourseLog,
    ) -> Result<DownloadOutcome>;
}
