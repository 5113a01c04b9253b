//! Remote prediction service contracts.
//!
//! # Responsibility
//! - Define the SPI the collaboration core consumes the AMR service
//!   through, keeping the transport an external collaborator.
//!
//! # Invariants
//! - The core never interprets prediction internals; documents pass
//!   through verbatim.

use crate::model::prediction::Prediction;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;

pub use client::HttpPredictionBackend;

pub type BackendResult<T> = Result<T, BackendError>;

/// Remote-call failure taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Non-2xx response; `message` is the response body text, surfaced
    /// to the user as-is.
    Remote { status: u16, message: String },
    /// Connection/transport failure before any response arrived.
    Transport(String),
    /// Response arrived but did not match the prediction wire shape.
    Decode(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote { status, message } => {
                write!(f, "prediction service returned {status}: {message}")
            }
            Self::Transport(message) => write!(f, "prediction service unreachable: {message}"),
            Self::Decode(message) => write!(f, "malformed prediction response: {message}"),
        }
    }
}

impl Error for BackendError {}

/// SPI for the remote AMR prediction service.
pub trait PredictionBackend {
    /// Uploads one genomic file and returns the prediction document.
    fn predict(&self, file_name: &str, bytes: Vec<u8>) -> BackendResult<Prediction>;

    /// Fetches the most recent completed predictions, newest first.
    fn history(&self, limit: u32) -> BackendResult<Vec<Prediction>>;
}
