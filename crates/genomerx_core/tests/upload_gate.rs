use genomerx_core::{
    BackendError, Prediction, PredictionBackend, PredictionService, UploadError,
};
use std::cell::RefCell;

/// Scripted backend standing in for the remote AMR service.
struct StubBackend {
    responses: RefCell<Vec<Result<Prediction, BackendError>>>,
    history: Vec<Prediction>,
}

impl StubBackend {
    fn new(responses: Vec<Result<Prediction, BackendError>>, history: Vec<Prediction>) -> Self {
        Self {
            responses: RefCell::new(responses),
            history,
        }
    }
}

impl PredictionBackend for StubBackend {
    fn predict(&self, _file_name: &str, _bytes: Vec<u8>) -> Result<Prediction, BackendError> {
        self.responses
            .borrow_mut()
            .remove(0)
    }

    fn history(&self, limit: u32) -> Result<Vec<Prediction>, BackendError> {
        Ok(self.history.iter().take(limit as usize).cloned().collect())
    }
}

fn prediction(file_name: &str, pathogen: &str, mdr: bool) -> Prediction {
    Prediction {
        file_name: file_name.to_string(),
        date: "2025-03-01T10:00:00".to_string(),
        pid: 10_001,
        pathogen: pathogen.to_string(),
        antibiotics: Vec::new(),
        recommendations: Vec::new(),
        mdr,
        genes: Vec::new(),
    }
}

#[test]
fn successful_upload_lands_in_the_history_cache() {
    let backend = StubBackend::new(
        vec![Ok(prediction("sample.fasta", "Escherichia coli", false))],
        Vec::new(),
    );
    let mut service = PredictionService::new(backend);

    let result = service
        .upload("sample.fasta", b"ACGT".to_vec())
        .expect("upload");
    assert_eq!(result.pathogen, "Escherichia coli");
    assert_eq!(service.history().len(), 1);
    assert!(!service.is_uploading());
}

#[test]
fn failed_upload_surfaces_the_remote_message_and_mutates_nothing() {
    let backend = StubBackend::new(
        vec![Err(BackendError::Remote {
            status: 400,
            message: "Unsupported sequence alphabet".to_string(),
        })],
        Vec::new(),
    );
    let mut service = PredictionService::new(backend);

    let err = service
        .upload("sample.fasta", b"????".to_vec())
        .expect_err("remote failure");
    assert!(err.to_string().contains("Unsupported sequence alphabet"));
    assert!(service.history().is_empty());
    // The gate is released; the view may retry.
    assert!(!service.is_uploading());
}

#[test]
fn invalid_files_are_rejected_before_the_backend_is_reached() {
    // An empty script would panic if predict were ever called.
    let mut service = PredictionService::new(StubBackend::new(Vec::new(), Vec::new()));

    let err = service
        .upload("notes.txt", b"hello".to_vec())
        .expect_err("wrong extension");
    assert!(matches!(err, UploadError::InvalidFormat(_)));

    let oversized = vec![0_u8; (genomerx_core::MAX_UPLOAD_BYTES + 1) as usize];
    let err = service
        .upload("genome.fasta", oversized)
        .expect_err("oversized upload");
    assert!(matches!(err, UploadError::FileTooLarge { .. }));
}

#[test]
fn the_busy_gate_rejects_a_second_upload_while_one_is_outstanding() {
    let mut service = PredictionService::new(StubBackend::new(Vec::new(), Vec::new()));

    service
        .begin_upload("genome.fasta", 1024)
        .expect("first begin");
    let err = service
        .begin_upload("other.fasta", 1024)
        .expect_err("second begin while outstanding");
    assert!(matches!(err, UploadError::UploadInProgress));

    service.record_failure();
    service
        .begin_upload("other.fasta", 1024)
        .expect("gate reopens after the failure is recorded");
    service.record_success(prediction("other.fasta", "Klebsiella pneumoniae", true));
    assert_eq!(service.history().len(), 1);
}

#[test]
fn history_load_replaces_the_cache_and_feeds_the_summary() {
    let backend = StubBackend::new(
        Vec::new(),
        vec![
            prediction("a.fasta", "Escherichia coli", true),
            prediction("b.fasta", "Escherichia coli", false),
            prediction("c.fasta", "Klebsiella pneumoniae", true),
        ],
    );
    let mut service = PredictionService::new(backend);

    let loaded = service.load_history(2).expect("history fetch");
    assert_eq!(loaded.len(), 2);

    service.load_history(25).expect("full history fetch");
    let summary = service.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.mdr_count, 2);
    assert_eq!(summary.by_pathogen.get("Escherichia coli"), Some(&2));
    assert_eq!(summary.by_pathogen.get("Klebsiella pneumoniae"), Some(&1));
}
