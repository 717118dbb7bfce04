//! Outcomes of a course download.

use std::fmt;

/// Why a course download failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The extractor could not access the course (not licensed, not found).
    ContentUnavailable(String),
    /// Any other failure (network, authentication, the downloader itself).
    DownloadError(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ContentUnavailable(msg) => write!(f, "content unavailable: {}", msg),
            FailureReason::DownloadError(msg) => write!(f, "download error: {}", msg),
        }
    }
}

/// Result of running the downloader for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed,
    Failed(FailureReason),
    /// Interrupted by the user.
    Canceled,
}

/// Final state of a course after the lifecycle controller ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseOutcome {
    /// Found in the finished root, nothing was downloaded.
    AlreadyFinished,
    Finished,
    Failed(FailureReason),
    Canceled,
}

impl CourseOutcome {
    /// Whether the batch should move on to the next course.
    pub fn continue_batch(&self) -> bool {
        !matches!(self, CourseOutcome::Canceled)
    }
}

impl From<DownloadOutcome> for CourseOutcome {
    fn from(outcome: DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Completed => CourseOutcome::Finished,
            DownloadOutcome::Failed(reason) => CourseOutcome::Failed(reason),
            DownloadOutcome::Canceled => CourseOutcome::Canceled,
        }
    }
}
