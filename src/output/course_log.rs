//! Per-course log sink.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Log of a single course, written to `<course_id>.log` and echoed to stdout.
#[derive(Debug)]
pub struct CourseLog {
    path: PathBuf,
    file: File,
}

impl CourseLog {
    /// Create (or truncate) the log file for a course.
    pub async fn create(course_dir: &Path, course_id: &str) -> Result<Self> {
        let path = course_dir.join(format!("{}.log", course_id));
        let mut file = File::create(&path).await?;

        let header = format!(
            "# {} started {}\n",
            course_id,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        file.write_all(header.as_bytes()).await?;

        Ok(Self { path, file })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a line to stdout and to the log file.
    pub async fn line(&mut self, message: &str) -> Result<()> {
        println!("{}", message);
        self.file.write_all(message.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        self.file.flush().await?;
        Ok(())
    }

    /// Like [`CourseLog::line`], but a failing log file only produces a warning.
    pub async fn note(&mut self, message: &str) {
        if let Err(e) = self.line(message).await {
            tracing::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }
}
