//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::cli::credentials::CredentialArgs;
use crate::config::Config;

/// Bulk course video downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "course-dl",
    version,
    about = "Download e-learning courses listed in courselist.txt",
    long_about = "Downloads every course listed in courselist.txt through yt-dlp.\n\n\
                  Course folders move from courses/_inprogress to _finished, _failed or \
                  _canceled depending on the outcome. Finished courses are skipped on the next run."
)]
pub struct Args {
    /// Account username (alternative to --user).
    ///
    /// Values starting with '-' are accepted here and rejected later, so the
    /// run falls back to the interactive prompt instead of a usage error.
    #[arg(value_name = "USERNAME", allow_hyphen_values = true)]
    pub positional_username: Option<String>,

    /// Account password (alternative to --pass).
    #[arg(value_name = "PASSWORD", allow_hyphen_values = true)]
    pub positional_password: Option<String>,

    /// Account username. Used only together with --pass.
    #[arg(
        short = 'u',
        long = "user",
        visible_alias = "username",
        env = "COURSE_DL_USERNAME"
    )]
    pub username: Option<String>,

    /// Account password. Used only together with --user.
    #[arg(
        short = 'p',
        long = "pass",
        visible_alias = "password",
        env = "COURSE_DL_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Don't download subtitles.
    #[arg(
        short = 's',
        long = "sub",
        visible_alias = "subtitle",
        short_alias = 'S',
        aliases = ["SUB", "SUBTITLE"]
    )]
    pub no_subtitles: bool,

    /// Root directory holding courses/, cookies/ and courselist.txt.
    #[arg(short = 'd', long = "root")]
    pub root: Option<PathBuf>,

    /// Course list to read instead of <root>/courselist.txt.
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "course-dl.toml")]
    pub config: PathBuf,

    /// URL course identifiers are appended to.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Downloader command (e.g. "yt-dlp" or "python3 -m yt_dlp").
    #[arg(long)]
    pub downloader: Option<String>,

    /// Download rate limit in bytes per second.
    #[arg(long)]
    pub rate_limit: Option<u64>,

    /// Minimum seconds to sleep between requests.
    #[arg(long)]
    pub sleep_interval: Option<u64>,

    /// Random extra seconds added to the sleep interval.
    #[arg(long)]
    pub sleep_offset: Option<u64>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Credential values given on the command line.
    pub fn credential_args(&self) -> CredentialArgs {
        CredentialArgs {
            flag_username: self.username.clone(),
            flag_password: self.password.clone(),
            positional_username: self.positional_username.clone(),
            positional_password: self.positional_password.clone(),
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.root = Some(root.clone());
        }

        if let Some(manifest) = &self.manifest {
            config.manifest = Some(manifest.clone());
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        if let Some(downloader) = &self.downloader {
            config.downloader = downloader.clone();
        }

        if let Some(rate_limit) = self.rate_limit {
            config.download.rate_limit = rate_limit;
        }

        if let Some(interval) = self.sleep_interval {
            config.download.sleep_interval = interval;
        }

        if let Some(offset) = self.sleep_offset {
            config.download.sleep_offset = offset;
        }

        // Boolean flags (only override if set to non-default)
        if self.no_subtitles {
            config.download.subtitles = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("course-dl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_credentials() {
        let args = parse(&["alice", "s3cret"]);
        let creds = args.credential_args();
        assert_eq!(creds.positional_username.as_deref(), Some("alice"));
        assert_eq!(creds.positional_password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_hyphenated_positional_is_parsed() {
        let args = parse(&["alice", "-secret"]);
        let creds = args.credential_args();
        assert_eq!(creds.positional_username.as_deref(), Some("alice"));
        assert_eq!(creds.positional_password.as_deref(), Some("-secret"));
        assert!(!args.no_subtitles);
    }

    #[test]
    fn test_flag_aliases() {
        for (user_flag, pass_flag) in [("--user", "--pass"), ("--username", "--password"), ("-u", "-p")] {
            let args = parse(&[user_flag, "alice", pass_flag, "s3cret"]);
            assert_eq!(args.username.as_deref(), Some("alice"));
            assert_eq!(args.password.as_deref(), Some("s3cret"));
        }
    }

    #[test]
    fn test_subtitle_flags() {
        for flag in ["--sub", "--subtitle", "-s", "--SUB", "--SUBTITLE", "-S"] {
            assert!(parse(&[flag]).no_subtitles, "{flag}");
        }
        assert!(!parse(&[]).no_subtitles);
    }

    #[test]
    fn test_merge_into_config() {
        let args = parse(&[
            "--root",
            "/srv/courses",
            "--rate-limit",
            "250000",
            "--sleep-interval",
            "5",
            "-s",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.root, Some(PathBuf::from("/srv/courses")));
        assert_eq!(config.download.rate_limit, 250_000);
        assert_eq!(config.download.sleep_interval, 5);
        assert_eq!(config.download.sleep_offset, 120);
        assert!(!config.download.subtitles);
    }
}
