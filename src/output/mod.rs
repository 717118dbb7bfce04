//! Output module for console output and logs.
//!
//! Provides:
//! - Colored console output
//! - Spinner for the downloader probe
//! - Batch statistics
//! - Per-course log files

pub mod console;
pub mod course_log;
pub mod progress;
pub mod stats;

pub use self::console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use course_log::CourseLog;
pub use progress::create_spinner;
pub use stats::print_batch_summary;
