//! Download options passed to the external downloader.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::cli::Credentials;
use crate::config::Config;

/// Placeholder written instead of the password in logged command lines.
const REDACTED: &str = "****";

/// Which playlist items of a course to download.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaylistSelection {
    /// The whole course.
    #[default]
    Full,
    /// Items 1 to `n`, inclusive.
    UpTo(u32),
    /// Items `start` to `end`, inclusive.
    Range { start: u32, end: u32 },
    /// Exactly these items, ascending.
    Items(Vec<u32>),
}

impl PlaylistSelection {
    /// Map the playlist indices of a manifest line to a selection.
    ///
    /// One index is an upper bound, two indices are an inclusive range and
    /// three or more are an explicit item list.
    pub fn from_indices(indices: &[u32]) -> Self {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();

        match sorted.as_slice() {
            [] => PlaylistSelection::Full,
            [end] => PlaylistSelection::UpTo(*end),
            [start, end] => PlaylistSelection::Range {
                start: *start,
                end: *end,
            },
            _ => PlaylistSelection::Items(sorted),
        }
    }

    /// Command line arguments restricting the playlist.
    pub fn args(&self) -> Vec<String> {
        match self {
            PlaylistSelection::Full => Vec::new(),
            PlaylistSelection::UpTo(end) => {
                vec!["--playlist-end".to_string(), end.to_string()]
            }
            PlaylistSelection::Range { start, end } => vec![
                "--playlist-start".to_string(),
                start.to_string(),
                "--playlist-end".to_string(),
                end.to_string(),
            ],
            PlaylistSelection::Items(items) => vec![
                "--playlist-items".to_string(),
                items
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ],
        }
    }
}

impl fmt::Display for PlaylistSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistSelection::Full => write!(f, "all video indices"),
            PlaylistSelection::UpTo(end) => write!(f, "video indices up to {}", end),
            PlaylistSelection::Range { start, end } => write!(
                f,
                "video indices from {} up to and including {}",
                start, end
            ),
            PlaylistSelection::Items(items) => write!(f, "specific video indices {:?}", items),
        }
    }
}

/// Process-wide download settings, fixed once the run has started.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub credentials: Credentials,
    pub sleep_interval: u64,
    pub max_sleep_interval: u64,
    pub rate_limit: u64,
    pub output_template: String,
    pub cookie_file: PathBuf,
    pub verbose: bool,
    pub restrict_filenames: bool,
    pub format: String,
    pub write_subtitles: bool,
    pub all_subtitles: bool,
    pub subtitles_format: String,
}

impl DownloadSettings {
    /// Build settings from the configuration.
    pub fn new(config: &Config, credentials: Credentials, cookie_file: PathBuf) -> Self {
        let download = &config.download;
        Self {
            credentials,
            sleep_interval: download.sleep_interval,
            max_sleep_interval: download.sleep_interval + download.sleep_offset,
            rate_limit: download.rate_limit,
            output_template: download.output_template.clone(),
            cookie_file,
            verbose: download.verbose,
            restrict_filenames: download.restrict_filenames,
            format: download.format.clone(),
            write_subtitles: download.subtitles,
            all_subtitles: download.subtitles,
            subtitles_format: download.subtitles_format.clone(),
        }
    }

    /// Arguments shared by every course.
    fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--username".into(),
            self.credentials.username.clone().into(),
            "--password".into(),
            self.credentials.password().into(),
            "--sleep-interval".into(),
            self.sleep_interval.to_string().into(),
            "--max-sleep-interval".into(),
            self.max_sleep_interval.to_string().into(),
            "--limit-rate".into(),
            self.rate_limit.to_string().into(),
            "--output".into(),
            self.output_template.clone().into(),
            "--cookies".into(),
            self.cookie_file.clone().into_os_string(),
            "--format".into(),
            self.format.clone().into(),
            "--newline".into(),
        ];

        if self.verbose {
            args.push("--verbose".into());
        }
        if self.restrict_filenames {
            args.push("--restrict-filenames".into());
        }
        if self.write_subtitles {
            args.push("--write-subs".into());
            args.push("--sub-format".into());
            args.push(self.subtitles_format.clone().into());
        }
        if self.all_subtitles {
            args.push("--sub-langs".into());
            args.push("all".into());
        }

        args
    }
}

/// Everything needed to download one course.
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    pub settings: &'a DownloadSettings,
    pub course_id: &'a str,
    pub url: Url,
    pub working_dir: PathBuf,
    pub selection: PlaylistSelection,
}

impl DownloadRequest<'_> {
    /// Full argument list for the downloader, ending with the course URL.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = self.settings.args();
        args.extend(self.selection.args().into_iter().map(OsString::from));
        args.push(self.url.as_str().into());
        args
    }

    /// Argument list safe for logging.
    pub fn display_args(&self) -> String {
        let mut redact_next = false;
        self.args()
            .iter()
            .map(|arg| {
                let arg = arg.to_string_lossy();
                if redact_next {
                    redact_next = false;
                    REDACTED.to_string()
                } else {
                    redact_next = arg == "--password";
                    arg.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(subtitles: bool) -> DownloadSettings {
        let mut config = Config::default();
        config.download.subtitles = subtitles;
        DownloadSettings::new(
            &config,
            Credentials::new("alice", "s3cret"),
            PathBuf::from("/data/cookies/cookies.txt"),
        )
    }

    fn request<'a>(settings: &'a DownloadSettings, selection: PlaylistSelection) -> DownloadRequest<'a> {
        DownloadRequest {
            settings,
            course_id: "rust-intro",
            url: Url::parse("https://app.pluralsight.com/library/courses/rust-intro").unwrap(),
            working_dir: PathBuf::from("/data/courses/_inprogress/rust-intro"),
            selection,
        }
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn value_after(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }

    #[test]
    fn test_selection_from_indices() {
        assert_eq!(PlaylistSelection::from_indices(&[]), PlaylistSelection::Full);
        assert_eq!(PlaylistSelection::from_indices(&[5]), PlaylistSelection::UpTo(5));
        assert_eq!(
            PlaylistSelection::from_indices(&[2, 7]),
            PlaylistSelection::Range { start: 2, end: 7 }
        );
        assert_eq!(
            PlaylistSelection::from_indices(&[1, 3, 9]),
            PlaylistSelection::Items(vec![1, 3, 9])
        );
        assert_eq!(
            PlaylistSelection::from_indices(&[9, 1, 3]),
            PlaylistSelection::from_indices(&[1, 3, 9])
        );
    }

    #[test]
    fn test_selection_args() {
        assert!(PlaylistSelection::Full.args().is_empty());
        assert_eq!(
            PlaylistSelection::UpTo(5).args(),
            vec!["--playlist-end", "5"]
        );
        assert_eq!(
            PlaylistSelection::Range { start: 2, end: 7 }.args(),
            vec!["--playlist-start", "2", "--playlist-end", "7"]
        );
        assert_eq!(
            PlaylistSelection::Items(vec![1, 3, 9]).args(),
            vec!["--playlist-items", "1,3,9"]
        );
    }

    #[test]
    fn test_request_args() {
        let settings = settings(true);
        let args = strings(request(&settings, PlaylistSelection::UpTo(4)).args());

        assert_eq!(value_after(&args, "--username").as_deref(), Some("alice"));
        assert_eq!(value_after(&args, "--password").as_deref(), Some("s3cret"));
        assert_eq!(value_after(&args, "--sleep-interval").as_deref(), Some("40"));
        assert_eq!(value_after(&args, "--max-sleep-interval").as_deref(), Some("160"));
        assert_eq!(value_after(&args, "--limit-rate").as_deref(), Some("1000000"));
        assert_eq!(value_after(&args, "--format").as_deref(), Some("bestaudio/best"));
        assert_eq!(value_after(&args, "--sub-format").as_deref(), Some("srt"));
        assert_eq!(value_after(&args, "--sub-langs").as_deref(), Some("all"));
        assert_eq!(value_after(&args, "--playlist-end").as_deref(), Some("4"));
        assert!(args.contains(&"--restrict-filenames".to_string()));
        assert!(!args.contains(&"--playlist-start".to_string()));
        assert_eq!(
            args.last().map(String::as_str),
            Some("https://app.pluralsight.com/library/courses/rust-intro")
        );
    }

    #[test]
    fn test_subtitles_disabled() {
        let settings = settings(false);
        let args = strings(request(&settings, PlaylistSelection::Full).args());

        assert!(!args.contains(&"--write-subs".to_string()));
        assert!(!args.contains(&"--sub-langs".to_string()));
    }

    #[test]
    fn test_display_args_redacts_password() {
        let settings = settings(true);
        let line = request(&settings, PlaylistSelection::Full).display_args();

        assert!(!line.contains("s3cret"));
        assert!(line.contains("--password ****"));
        assert!(line.contains("--username alice"));
    }
}
