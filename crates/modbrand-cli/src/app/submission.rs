//! Image submission: stage a local file, upload it, reset on success.
//!
//! `Idle -> Staged -> Uploading -> Idle` on success, or back to `Staged`
//! (file kept for a retry) on failure.

use modbrand_client::{ApiError, Upload};
use modbrand_core::Logger;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::effects::Request;
use super::notice::Notice;

pub const SUBMIT_SUCCESS: &str = "Brand image submitted successfully!";
pub const SUBMIT_UNEXPECTED: &str = "An unexpected error occurred.";

/// What the UI shows for a staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub file_name: String,
    pub mime: String,
    pub size_bytes: usize,
}

impl Preview {
    fn of(upload: &Upload) -> Self {
        Self {
            file_name: upload.file_name.clone(),
            mime: upload.mime.clone(),
            size_bytes: upload.len(),
        }
    }
}

/// A file selected for upload together with its preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub upload: Upload,
    pub preview: Preview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Staged(StagedFile),
    Uploading(StagedFile),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    #[error("An upload is already in progress")]
    Busy,
    #[error("{0} is not an image")]
    NotImage(String),
    #[error("{0} is empty")]
    Empty(String),
}

#[derive(Debug)]
pub struct SubmissionWorkflow {
    state: SubmissionState,
    log: Logger,
}

impl SubmissionWorkflow {
    pub const fn new(log: Logger) -> Self {
        Self {
            state: SubmissionState::Idle,
            log,
        }
    }

    pub const fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub const fn staged(&self) -> Option<&StagedFile> {
        match &self.state {
            SubmissionState::Staged(f) | SubmissionState::Uploading(f) => Some(f),
            SubmissionState::Idle => None,
        }
    }

    pub const fn is_busy(&self) -> bool {
        matches!(self.state, SubmissionState::Uploading(_))
    }

    /// Submit is only enactable with a staged file and no upload running.
    pub const fn can_submit(&self) -> bool {
        matches!(self.state, SubmissionState::Staged(_))
    }

    /// Select a file, replacing any previously staged one.
    pub fn stage(&mut self, upload: Upload) -> Result<(), StageError> {
        if self.is_busy() {
            return Err(StageError::Busy);
        }
        if !upload.is_image() {
            return Err(StageError::NotImage(upload.file_name));
        }
        if upload.is_empty() {
            return Err(StageError::Empty(upload.file_name));
        }
        if let SubmissionState::Staged(previous) = &self.state {
            debug!(parent: self.log.span(), file = %previous.preview.file_name, "Discarding previous preview");
        }
        let preview = Preview::of(&upload);
        debug!(parent: self.log.span(), file = %preview.file_name, bytes = preview.size_bytes, "File staged");
        self.state = SubmissionState::Staged(StagedFile { upload, preview });
        Ok(())
    }

    /// Start the upload. A no-op unless a file is staged.
    pub fn submit(&mut self) -> Option<Request> {
        let state = std::mem::replace(&mut self.state, SubmissionState::Idle);
        match state {
            SubmissionState::Staged(file) => {
                info!(parent: self.log.span(), file = %file.preview.file_name, "Uploading brand image");
                let request = Request::Submit(file.upload.clone());
                self.state = SubmissionState::Uploading(file);
                Some(request)
            }
            other => {
                debug!(parent: self.log.span(), "Submit ignored: nothing staged or upload running");
                self.state = other;
                None
            }
        }
    }

    /// Apply the upload outcome and produce the notice to show.
    pub fn finish(&mut self, result: Result<(), ApiError>) -> Option<Notice> {
        let state = std::mem::replace(&mut self.state, SubmissionState::Idle);
        let SubmissionState::Uploading(file) = state else {
            warn!(parent: self.log.span(), "Upload completion without an upload in flight");
            self.state = state;
            return None;
        };
        match result {
            Ok(()) => {
                info!(parent: self.log.span(), file = %file.preview.file_name, "Brand image submitted");
                Some(Notice::success(SUBMIT_SUCCESS))
            }
            Err(err) => {
                warn!(parent: self.log.span(), error = %err, "Brand image upload failed");
                let notice = match err.server_text() {
                    Some(text) => Notice::error(format!("Upload failed: {text}")),
                    None => Notice::error(SUBMIT_UNEXPECTED),
                };
                self.state = SubmissionState::Staged(file);
                Some(notice)
            }
        }
    }
}
