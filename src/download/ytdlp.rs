//! yt-dlp child process driver.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::download::options::DownloadRequest;
use crate::download::outcome::{DownloadOutcome, FailureReason};
use crate::download::runner::Downloader;
use crate::error::{Error, Result};
use crate::output::CourseLog;

/// Runs yt-dlp (or a compatible fork) as a child process.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
    base_args: Vec<OsString>,
}

impl YtDlp {
    /// Create a driver for an explicit program and leading arguments.
    pub fn new(program: impl Into<PathBuf>, base_args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// Resolve a downloader command such as `yt-dlp` or `python3 -m yt_dlp`
    /// against `PATH`.
    pub fn locate(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| Error::MissingConfig("downloader".to_string()))?;
        let program =
            which::which(name).map_err(|_| Error::DownloaderNotFound(name.to_string()))?;

        Ok(Self::new(program, parts.map(OsString::from).collect()))
    }

    /// Path of the resolved program.
    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.base_args);
        command
    }

    /// Ask the downloader for its version.
    pub async fn version(&self) -> Result<String> {
        let output = self
            .command()
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Downloader(format!(
                "{} --version exited with {}",
                self.program.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn download(
        &self,
        request: &DownloadRequest<'_>,
        log: &mut CourseLog,
    ) -> Result<DownloadOutcome> {
        tracing::debug!(
            "Running {} {}",
            self.program.display(),
            request.display_args()
        );

        let mut child = match self
            .command()
            .args(request.args())
            .current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return Ok(DownloadOutcome::Failed(FailureReason::DownloadError(
                    format!("failed to start {}: {}", self.program.display(), e),
                )));
            }
        };

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, tx));
        } else {
            drop(tx);
        }

        // Only a running download listens for Ctrl+C. Once the first listener
        // is installed, the default handler is gone and a Ctrl+C between
        // courses is ignored.
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut ctrl_c_available = true;
        let mut output_closed = false;
        let mut errors = ErrorLines::default();

        let status = loop {
            // The child shares our process group and sees the same SIGINT, so
            // Ctrl+C has to win over its exit.
            tokio::select! {
                biased;

                signal = &mut ctrl_c, if ctrl_c_available => match signal {
                    Ok(()) => break None,
                    Err(e) => {
                        tracing::warn!("Could not listen for Ctrl+C: {}", e);
                        ctrl_c_available = false;
                    }
                },
                line = rx.recv(), if !output_closed => match line {
                    Some(line) => {
                        errors.observe(&line);
                        log.line(&line).await?;
                    }
                    None => output_closed = true,
                },
                status = child.wait(), if output_closed => break Some(status?),
            }
        };

        match status {
            Some(status) => Ok(errors.into_outcome(status)),
            None => {
                tracing::info!("Received Ctrl+C, stopping {}", request.course_id);
                if let Err(e) = child.kill().await {
                    tracing::warn!("Failed to stop downloader: {}", e);
                }
                Ok(DownloadOutcome::Canceled)
            }
        }
    }
}

/// Forward every line of a child pipe into the channel.
async fn forward_lines<R>(reader: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!("Stopped reading downloader output: {}", e);
                break;
            }
        }
    }
}

/// Tracks `ERROR:` lines printed by the downloader.
#[derive(Debug, Default)]
struct ErrorLines {
    last: Option<String>,
    extractor_failed: bool,
    interrupted: bool,
}

impl ErrorLines {
    fn observe(&mut self, line: &str) {
        let Some(message) = line.strip_prefix("ERROR: ") else {
            return;
        };

        if message.starts_with("Interrupted by user") {
            self.interrupted = true;
        }

        // Extractor errors carry the extractor name: `ERROR: [pluralsight] id: ...`
        if message.starts_with('[') && message.contains(']') {
            self.extractor_failed = true;
        }
        self.last = Some(message.to_string());
    }

    fn into_outcome(self, status: ExitStatus) -> DownloadOutcome {
        if status.success() {
            return DownloadOutcome::Completed;
        }

        if self.interrupted || killed_by_sigint(status) {
            return DownloadOutcome::Canceled;
        }

        let message = self
            .last
            .unwrap_or_else(|| format!("downloader exited with {}", status));

        if self.extractor_failed {
            DownloadOutcome::Failed(FailureReason::ContentUnavailable(message))
        } else {
            DownloadOutcome::Failed(FailureReason::DownloadError(message))
        }
    }
}

#[cfg(unix)]
fn killed_by_sigint(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    // SIGINT
    status.signal() == Some(2)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: ExitStatus) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_lines_extractor() {
        let mut errors = ErrorLines::default();
        errors.observe("[pluralsight] Downloading course JSON");
        errors.observe("ERROR: [pluralsight] rust-intro: This course is not part of your plan");
        assert!(errors.extractor_failed);
        assert_eq!(
            errors.last.as_deref(),
            Some("[pluralsight] rust-intro: This course is not part of your plan")
        );
    }

    #[test]
    fn test_error_lines_generic() {
        let mut errors = ErrorLines::default();
        errors.observe("ERROR: unable to download video data: HTTP Error 403: Forbidden");
        assert!(!errors.extractor_failed);
        assert!(errors.last.is_some());
    }

    #[test]
    fn test_error_lines_interrupted() {
        let mut errors = ErrorLines::default();
        errors.observe("[download]  42.0% of 120.00MiB");
        errors.observe("ERROR: Interrupted by user");
        assert!(errors.interrupted);
        assert!(!errors.extractor_failed);
    }

    #[test]
    fn test_locate_missing_binary() {
        assert!(matches!(
            YtDlp::locate("definitely-not-a-real-downloader-binary"),
            Err(Error::DownloaderNotFound(_))
        ));
        assert!(matches!(YtDlp::locate("   "), Err(Error::MissingConfig(_))));
    }

    #[cfg(unix)]
    mod process {
        use super::super::*;
        use crate::cli::Credentials;
        use crate::config::Config;
        use crate::download::options::{DownloadSettings, PlaylistSelection};
        use url::Url;

        /// A shell script standing in for yt-dlp, run through `sh`.
        fn fake(dir: &std::path::Path, body: &str) -> YtDlp {
            let script = dir.join("fake-ytdlp.sh");
            std::fs::write(&script, body).unwrap();
            YtDlp::new("sh", vec![script.into_os_string()])
        }

        async fn run(body: &str) -> (DownloadOutcome, String) {
            let dir = tempfile::tempdir().unwrap();
            let work = dir.path().join("rust-intro");
            std::fs::create_dir(&work).unwrap();

            let settings = DownloadSettings::new(
                &Config::default(),
                Credentials::new("alice", "s3cret"),
                dir.path().join("cookies.txt"),
            );
            let request = DownloadRequest {
                settings: &settings,
                course_id: "rust-intro",
                url: Url::parse("https://example.com/courses/rust-intro").unwrap(),
                working_dir: work.clone(),
                selection: PlaylistSelection::Full,
            };

            let mut log = CourseLog::create(&work, "rust-intro").await.unwrap();
            let outcome = fake(dir.path(), body)
                .download(&request, &mut log)
                .await
                .unwrap();
            drop(log);

            let content = std::fs::read_to_string(work.join("rust-intro.log")).unwrap();
            (outcome, content)
        }

        #[tokio::test]
        async fn test_success() {
            let (outcome, log) = run("echo \"[download] 100% of 1.00MiB\"\nexit 0\n").await;
            assert_eq!(outcome, DownloadOutcome::Completed);
            assert!(log.contains("[download] 100% of 1.00MiB"));
        }

        #[tokio::test]
        async fn test_receives_course_url_last() {
            let (outcome, log) = run("for last; do :; done\necho \"url=$last\"\n").await;
            assert_eq!(outcome, DownloadOutcome::Completed);
            assert!(log.contains("url=https://example.com/courses/rust-intro"));
        }

        #[tokio::test]
        async fn test_extractor_error() {
            let (outcome, log) = run(
                "echo \"ERROR: [pluralsight] rust-intro: not available\" >&2\nexit 1\n",
            )
            .await;
            assert_eq!(
                outcome,
                DownloadOutcome::Failed(FailureReason::ContentUnavailable(
                    "[pluralsight] rust-intro: not available".to_string()
                ))
            );
            assert!(log.contains("ERROR: [pluralsight] rust-intro: not available"));
        }

        #[tokio::test]
        async fn test_generic_error() {
            let (outcome, _) = run("exit 2\n").await;
            assert!(matches!(
                outcome,
                DownloadOutcome::Failed(FailureReason::DownloadError(_))
            ));
        }

        #[tokio::test]
        async fn test_interrupted_child_is_canceled() {
            let (outcome, log) =
                run("echo \"ERROR: Interrupted by user\" >&2\nexit 1\n").await;
            assert_eq!(outcome, DownloadOutcome::Canceled);
            assert!(log.contains("Interrupted by user"));
        }

        #[test]
        fn test_sigint_exit_is_canceled() {
            use std::os::unix::process::ExitStatusExt;

            // Raw wait status of a process terminated by SIGINT.
            let status = ExitStatus::from_raw(2);
            assert_eq!(
                ErrorLines::default().into_outcome(status),
                DownloadOutcome::Canceled
            );
        }

        #[tokio::test]
        async fn test_version() {
            let dir = tempfile::tempdir().unwrap();
            let ytdlp = fake(dir.path(), "echo 2026.01.01\n");
            assert_eq!(ytdlp.version().await.unwrap(), "2026.01.01");
        }
    }
}
