//! course-dl - bulk course video downloader.
//!
//! This library drives an external media downloader (yt-dlp) over a list of
//! course identifiers and keeps every course directory in one of four
//! lifecycle roots.
//!
//! # Features
//!
//! - Course list parsing with playlist slicing (`course 3 8`)
//! - Credential resolution from flags, positional arguments or a prompt
//! - Per-course log files echoed to the console
//! - Idempotent re-runs: finished courses are skipped
//! - Ctrl+C cancels the current course and stops the batch
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use course_dl::{
//!     cli::Credentials,
//!     course::load_manifest,
//!     download::{download_courses, CourseLifecycle, DownloadSettings, YtDlp},
//!     fs::{prepare_cookie_file, CourseDirs},
//!     Config,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("course-dl.toml"))?;
//!     let root = config.root_directory();
//!     let courses = load_manifest(&config.manifest_path())?;
//!
//!     let settings = DownloadSettings::new(
//!         &config,
//!         Credentials::new("alice", "s3cret"),
//!         prepare_cookie_file(&root)?,
//!     );
//!     let downloader = YtDlp::locate(&config.downloader)?;
//!     let dirs = CourseDirs::new(&root);
//!     let lifecycle = CourseLifecycle {
//!         downloader: &downloader,
//!         config: &config,
//!         settings: &settings,
//!         dirs: &dirs,
//!     };
//!
//!     let summary = download_courses(&lifecycle, &courses).await?;
//!     println!("{} finished", summary.finished);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod course;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;

// Re-exports for convenience
pub use config::Config;
pub use course::Course;
pub use download::{
    download_courses, BatchSummary, CourseLifecycle, CourseOutcome, DownloadOutcome, Downloader,
    YtDlp,
};
pub use error::{Error, Result};
