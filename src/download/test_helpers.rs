//! Shared test helpers for driving the lifecycle without a real downloader.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::download::options::{DownloadRequest, PlaylistSelection};
use crate::download::outcome::DownloadOutcome;
use crate::download::runner::Downloader;
use crate::error::Result;
use crate::output::CourseLog;

/// What a [`ScriptedDownloader`] was asked to download.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub course_id: String,
    pub url: String,
    pub working_dir: PathBuf,
    pub selection: PlaylistSelection,
}

/// Returns pre-scripted outcomes in order and records every request.
///
/// Each call writes a `video.mp4` into the working directory so moves can be
/// checked. Once the script is exhausted every call completes.
pub(crate) struct ScriptedDownloader {
    outcomes: Mutex<VecDeque<DownloadOutcome>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedDownloader {
    pub(crate) fn new(outcomes: Vec<DownloadOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for ScriptedDownloader {
    async fn download(
        &self,
        request: &DownloadRequest<'_>,
        log: &mut CourseLog,
    ) -> Result<DownloadOutcome> {
        self.calls.lock().unwrap().push(RecordedCall {
            course_id: request.course_id.to_string(),
            url: request.url.to_string(),
            working_dir: request.working_dir.clone(),
            selection: request.selection.clone(),
        });

        log.line(&format!("[scripted] {}", request.url)).await?;
        tokio::fs::write(request.working_dir.join("video.mp4"), b"video").await?;

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(DownloadOutcome::Completed);
        Ok(outcome)
    }
}
