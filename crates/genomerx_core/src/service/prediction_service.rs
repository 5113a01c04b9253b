//! Prediction upload gate and session history cache.
//!
//! # Responsibility
//! - Reject invalid uploads client-side before any network call.
//! - Gate against a second upload while one is outstanding.
//! - Hold the session-scoped history cache feeding dashboard aggregates.
//!
//! # Invariants
//! - A failed upload performs no store mutation; the view returns to its
//!   pre-upload state.
//! - The history cache is session-only and never persisted.

use crate::backend::{BackendError, PredictionBackend};
use crate::model::prediction::Prediction;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted upload file extensions, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["fasta", "fa", "csv", "pdf"];

/// Maximum accepted upload size (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Upload-path error taxonomy.
#[derive(Debug)]
pub enum UploadError {
    /// File extension outside the accepted set.
    InvalidFormat(String),
    /// File exceeds [`MAX_UPLOAD_BYTES`].
    FileTooLarge { size_bytes: u64 },
    /// Another upload is still outstanding in this view.
    UploadInProgress,
    /// Remote call failed; the view surfaces the message and resets.
    Backend(BackendError),
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(name) => {
                write!(f, "unsupported file format: `{name}` (expected fasta/fa/csv/pdf)")
            }
            Self::FileTooLarge { size_bytes } => {
                write!(f, "file is {size_bytes} bytes; maximum is {MAX_UPLOAD_BYTES}")
            }
            Self::UploadInProgress => write!(f, "an upload is already in progress"),
            Self::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for UploadError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

/// Validates name and size before any network call.
pub fn validate_upload(file_name: &str, size_bytes: u64) -> Result<(), UploadError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::InvalidFormat(file_name.to_string()));
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::FileTooLarge { size_bytes });
    }
    Ok(())
}

/// Aggregates derived from the history cache for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub total: usize,
    /// Count of multi-drug-resistant results.
    pub mdr_count: usize,
    /// Prediction count per detected pathogen.
    pub by_pathogen: BTreeMap<String, usize>,
}

/// Upload gate plus session-scoped prediction history.
pub struct PredictionService<B: PredictionBackend> {
    backend: B,
    history: Vec<Prediction>,
    upload_busy: bool,
}

impl<B: PredictionBackend> PredictionService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            history: Vec::new(),
            upload_busy: false,
        }
    }

    /// Whether an upload is outstanding (drives the view's busy indicator).
    pub fn is_uploading(&self) -> bool {
        self.upload_busy
    }

    /// Validates the pending file and claims the busy gate.
    ///
    /// The view calls this before handing the bytes to the transport; a
    /// second call while outstanding fails with `UploadInProgress`.
    pub fn begin_upload(&mut self, file_name: &str, size_bytes: u64) -> Result<(), UploadError> {
        if self.upload_busy {
            return Err(UploadError::UploadInProgress);
        }
        validate_upload(file_name, size_bytes)?;
        self.upload_busy = true;
        Ok(())
    }

    /// Releases the gate and prepends the completed prediction.
    pub fn record_success(&mut self, prediction: Prediction) {
        self.upload_busy = false;
        self.history.insert(0, prediction);
    }

    /// Releases the gate after a failed call; no state is mutated.
    pub fn record_failure(&mut self) {
        self.upload_busy = false;
    }

    /// Drives the full blocking upload flow through the gate.
    pub fn upload(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<Prediction, UploadError> {
        self.begin_upload(file_name, bytes.len() as u64)?;
        match self.backend.predict(file_name, bytes) {
            Ok(prediction) => {
                self.record_success(prediction.clone());
                Ok(prediction)
            }
            Err(err) => {
                self.record_failure();
                Err(err.into())
            }
        }
    }

    /// Seeds the cache from the service history endpoint.
    pub fn load_history(&mut self, limit: u32) -> Result<&[Prediction], UploadError> {
        let fetched = self.backend.history(limit)?;
        self.history = fetched;
        Ok(&self.history)
    }

    /// Completed predictions for the current session, newest first.
    pub fn history(&self) -> &[Prediction] {
        &self.history
    }

    /// Dashboard aggregates over the current cache.
    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary {
            total: self.history.len(),
            ..HistorySummary::default()
        };
        for prediction in &self.history {
            if prediction.mdr {
                summary.mdr_count += 1;
            }
            *summary
                .by_pathogen
                .entry(prediction.pathogen.clone())
                .or_insert(0) += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_upload, UploadError, MAX_UPLOAD_BYTES};

    #[test]
    fn accepted_extensions_are_case_insensitive() {
        for name in ["genome.fasta", "genome.FA", "table.Csv", "report.PDF"] {
            validate_upload(name, 1024).expect("accepted format");
        }
    }

    #[test]
    fn unknown_or_missing_extension_is_rejected() {
        for name in ["genome.txt", "genome", "archive.fasta.gz"] {
            let err = validate_upload(name, 1024).expect_err("rejected format");
            assert!(matches!(err, UploadError::InvalidFormat(_)));
        }
    }

    #[test]
    fn oversized_file_is_rejected_before_any_network_call() {
        let err = validate_upload("genome.fasta", MAX_UPLOAD_BYTES + 1)
            .expect_err("oversized upload must fail");
        assert!(matches!(err, UploadError::FileTooLarge { .. }));
        validate_upload("genome.fasta", MAX_UPLOAD_BYTES).expect("exact limit is accepted");
    }
}
