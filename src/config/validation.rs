//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Upper bound for the sleep settings, in seconds.
const MAX_SLEEP_SECONDS: u64 = 60 * 60;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_base_url(&config.base_url)?;
    validate_downloader(&config.downloader)?;
    validate_rate_limit(config.download.rate_limit)?;
    validate_sleep(config.download.sleep_interval, config.download.sleep_offset)?;
    validate_non_empty("output_template", &config.download.output_template)?;
    validate_non_empty("format", &config.download.format)?;
    validate_non_empty("subtitles_format", &config.download.subtitles_format)?;

    Ok(())
}

/// Validate the base URL courses are appended to.
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if base_url.is_empty() {
        return Err(Error::MissingConfig("base_url".to_string()));
    }

    let url = Url::parse(base_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("Unsupported scheme '{}', expected http or https", url.scheme()),
        });
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: "Base URL must not contain a query or fragment".to_string(),
        });
    }

    Ok(())
}

/// Validate the downloader binary setting.
pub fn validate_downloader(downloader: &str) -> Result<()> {
    if downloader.trim().is_empty() {
        return Err(Error::MissingConfig("downloader".to_string()));
    }
    Ok(())
}

/// Validate the download rate limit.
pub fn validate_rate_limit(rate_limit: u64) -> Result<()> {
    if rate_limit == 0 {
        return Err(Error::ConfigValidation {
            field: "rate_limit".to_string(),
            message: "Rate limit must be greater than 0 bytes/s".to_string(),
        });
    }
    Ok(())
}

/// Validate the sleep interval and its random offset.
pub fn validate_sleep(interval: u64, offset: u64) -> Result<()> {
    if interval > MAX_SLEEP_SECONDS {
        return Err(Error::ConfigValidation {
            field: "sleep_interval".to_string(),
            message: format!(
                "Sleep interval must be at most {} seconds (got {})",
                MAX_SLEEP_SECONDS, interval
            ),
        });
    }

    if offset > MAX_SLEEP_SECONDS {
        return Err(Error::ConfigValidation {
            field: "sleep_offset".to_string(),
            message: format!(
                "Sleep offset must be at most {} seconds (got {})",
                MAX_SLEEP_SECONDS, offset
            ),
        });
    }

    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }
    Ok(())
}

/// Validate a course identifier (the platform's course slug).
///
/// The identifier becomes a directory name under every lifecycle root, so it
/// must be a single, safe path component.
pub fn validate_course_id(course_id: &str) -> std::result::Result<(), String> {
    if course_id.is_empty() {
        return Err("missing course identifier".to_string());
    }

    if course_id.contains("..") {
        return Err(format!("path traversal detected in '{}'", course_id));
    }

    let pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._~-]*$").map_err(|e| e.to_string())?;
    if !pattern.is_match(course_id) {
        return Err(format!(
            "course identifier '{}' contains invalid characters",
            course_id
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("ftp://example.com/courses/").is_err());
        assert!(validate_base_url("https://example.com/courses/?page=1").is_err());
        assert!(validate_base_url("http://localhost:8080/courses/").is_ok());
    }

    #[test]
    fn test_zero_rate_limit() {
        let mut config = Config::default();
        config.download.rate_limit = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_sleep_bounds() {
        assert!(validate_sleep(0, 0).is_ok());
        assert!(validate_sleep(40, 120).is_ok());
        assert!(validate_sleep(MAX_SLEEP_SECONDS + 1, 0).is_err());
        assert!(validate_sleep(40, MAX_SLEEP_SECONDS + 1).is_err());
    }

    #[test]
    fn test_empty_template() {
        let mut config = Config::default();
        config.download.output_template = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_valid_course_ids() {
        assert!(validate_course_id("python-fundamentals").is_ok());
        assert!(validate_course_id("aspdotnet-core-1-0-fundamentals").is_ok());
        assert!(validate_course_id("c_sharp.basics").is_ok());
    }

    #[test]
    fn test_invalid_course_ids() {
        assert!(validate_course_id("").is_err());
        assert!(validate_course_id("..").is_err());
        assert!(validate_course_id("foo/../bar").is_err());
        assert!(validate_course_id("path/to/course").is_err());
        assert!(validate_course_id("-flag").is_err());
        assert!(validate_course_id("white space").is_err());
    }
}
