//! Error types for the course-dl application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Username or password was not given")]
    MissingCredentials,

    // Manifest errors
    #[error("There is no course list at {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Invalid course list entry on line {line}: {message}")]
    ManifestLine { line: usize, message: String },

    // External tool errors
    #[error("Downloader '{0}' not found. Please install yt-dlp and ensure it's in your PATH.")]
    DownloaderNotFound(String),

    #[error("Downloader error: {0}")]
    Downloader(String),

    // Batch outcome errors
    #[error("Download requests were canceled by user")]
    Canceled,

    #[error("{0} course(s) failed")]
    CoursesFailed(usize),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was raised while setting up the run, before any
    /// course was attempted.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::MissingCredentials
                | Error::ManifestNotFound(_)
                | Error::ManifestLine { .. }
                | Error::DownloaderNotFound(_)
                | Error::TomlParse(_)
                | Error::UrlParse(_)
        )
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CANCELED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_COURSES_FAILED: i32 = 6;
}
