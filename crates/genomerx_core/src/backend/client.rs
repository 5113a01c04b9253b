//! Blocking HTTP implementation of the prediction SPI.
//!
//! # Invariants
//! - A non-2xx response surfaces its body text as the error message.
//! - The initiating view blocks on these calls; the collaboration stores
//!   are never touched from this path.

use crate::backend::{BackendError, BackendResult, PredictionBackend};
use crate::model::prediction::Prediction;
use log::info;
use reqwest::blocking::{multipart, Client, Response};
use std::time::Instant;

const PREDICT_PATH: &str = "/api/v1/predict";
const HISTORY_PATH: &str = "/api/v1/history";

/// `reqwest`-backed prediction client.
pub struct HttpPredictionBackend {
    base_url: String,
    client: Client,
}

impl HttpPredictionBackend {
    /// Creates a client against the service base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn decode(response: Response) -> BackendResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .unwrap_or_else(|err| format!("unreadable response body: {err}"));
        Err(BackendError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

impl PredictionBackend for HttpPredictionBackend {
    fn predict(&self, file_name: &str, bytes: Vec<u8>) -> BackendResult<Prediction> {
        let started_at = Instant::now();
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}{PREDICT_PATH}", self.base_url))
            .multipart(form)
            .send()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let response = Self::decode(response)?;
        let prediction = response
            .json::<Prediction>()
            .map_err(|err| BackendError::Decode(err.to_string()))?;

        info!(
            "event=predict_upload module=backend status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(prediction)
    }

    fn history(&self, limit: u32) -> BackendResult<Vec<Prediction>> {
        let response = self
            .client
            .get(format!("{}{HISTORY_PATH}", self.base_url))
            .query(&[("limit", limit)])
            .send()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let response = Self::decode(response)?;
        response
            .json::<Vec<Prediction>>()
            .map_err(|err| BackendError::Decode(err.to_string()))
    }
}
