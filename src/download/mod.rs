//! Download module for course downloading.
//!
//! This module provides:
//! - Download settings and playlist slicing
//! - The downloader seam and its yt-dlp implementation
//! - The course lifecycle controller
//! - Sequential batch processing and statistics

pub mod batch;
pub mod lifecycle;
pub mod options;
pub mod outcome;
pub mod runner;
pub mod state;
pub mod ytdlp;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use batch::download_courses;
pub use lifecycle::CourseLifecycle;
pub use options::{DownloadRequest, DownloadSettings, PlaylistSelection};
pub use outcome::{CourseOutcome, DownloadOutcome, FailureReason};
pub use runner::Downloader;
pub use state::BatchSummary;
pub use ytdlp::YtDlp;
