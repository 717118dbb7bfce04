//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Name of the course manifest looked up inside the root directory.
pub const MANIFEST_FILE_NAME: &str = "courselist.txt";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `courses/`, `cookies/` and the default manifest.
    pub root: Option<PathBuf>,

    /// Course manifest path. Defaults to `<root>/courselist.txt`.
    pub manifest: Option<PathBuf>,

    /// Course identifiers are appended to this URL.
    pub base_url: String,

    /// Name or path of the external downloader binary.
    pub downloader: String,

    pub download: DownloadConfig,
}

/// Options handed to the external downloader for every course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Minimum sleep between requests, in seconds.
    #[serde(default = "default_sleep_interval")]
    pub sleep_interval: u64,

    /// Random extra sleep on top of `sleep_interval`, in seconds.
    #[serde(default = "default_sleep_offset")]
    pub sleep_offset: u64,

    /// Download rate limit in bytes per second.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u64,

    #[serde(default = "default_output_template")]
    pub output_template: String,

    #[serde(default = "default_format")]
    pub format: String,

    /// Whether to download subtitles in every available language.
    #[serde(default = "default_true")]
    pub subtitles: bool,

    #[serde(default = "default_subtitles_format")]
    pub subtitles_format: String,

    #[serde(default = "default_true")]
    pub verbose: bool,

    #[serde(default = "default_true")]
    pub restrict_filenames: bool,
}

// These values keep the account clear of the platform's spam blocking.
// Change them at your own risk.
fn default_sleep_interval() -> u64 {
    40
}

fn default_sleep_offset() -> u64 {
    120
}

fn default_rate_limit() -> u64 {
    1_000_000
}

fn default_output_template() -> String {
    "%(playlist_index)s-%(chapter_number)s-%(title)s-%(resolution)s.%(ext)s".to_string()
}

fn default_format() -> String {
    "bestaudio/best".to_string()
}

fn default_subtitles_format() -> String {
    "srt".to_string()
}

fn default_base_url() -> String {
    "https://app.pluralsight.com/library/courses/".to_string()
}

fn default_downloader() -> String {
    "yt-dlp".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            manifest: None,
            base_url: default_base_url(),
            downloader: default_downloader(),
            download: DownloadConfig::default(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            sleep_interval: default_sleep_interval(),
            sleep_offset: default_sleep_offset(),
            rate_limit: default_rate_limit(),
            output_template: default_output_template(),
            format: default_format(),
            subtitles: true,
            subtitles_format: default_subtitles_format(),
            verbose: true,
            restrict_filenames: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective root directory as an absolute path.
    ///
    /// The downloader runs inside each course directory, so relative paths
    /// handed to it (such as the cookie file) would not resolve.
    pub fn root_directory(&self) -> PathBuf {
        let root = self.root.clone().unwrap_or_else(|| PathBuf::from("."));
        std::path::absolute(&root).unwrap_or(root)
    }

    /// Get the effective manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.root_directory().join(MANIFEST_FILE_NAME))
    }

    /// Build the playlist URL of a course.
    pub fn course_url(&self, course_id: &str) -> Result<Url> {
        let base = if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)?
        } else {
            Url::parse(&format!("{}/", self.base_url))?
        };
        Ok(base.join(course_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.downloader, "yt-dlp");
        assert_eq!(config.download.sleep_interval, 40);
        assert_eq!(config.download.sleep_offset, 120);
        assert_eq!(config.download.rate_limit, 1_000_000);
        assert!(config.download.subtitles);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            root = "/srv/courses"

            [download]
            rate_limit = 500000
            subtitles = false
            "#,
        )
        .unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/srv/courses")));
        assert_eq!(config.download.rate_limit, 500_000);
        assert!(!config.download.subtitles);
        assert_eq!(config.download.sleep_interval, 40);
        assert_eq!(config.download.format, "bestaudio/best");
        assert_eq!(config.base_url, default_base_url());
    }

    #[test]
    fn test_manifest_path_defaults_to_root() {
        let config = Config {
            root: Some(PathBuf::from("/srv/courses")),
            ..Default::default()
        };
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("/srv/courses/courselist.txt")
        );
    }

    #[test]
    fn test_course_url() {
        let mut config = Config::default();
        assert_eq!(
            config.course_url("python-fundamentals").unwrap().as_str(),
            "https://app.pluralsight.com/library/courses/python-fundamentals"
        );

        config.base_url = "https://example.com/courses".to_string();
        assert_eq!(
            config.course_url("rust-intro").unwrap().as_str(),
            "https://example.com/courses/rust-intro"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/course-dl.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
