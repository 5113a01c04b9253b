//! Prediction document consumed from the remote AMR service.
//!
//! # Responsibility
//! - Mirror the backend wire shape verbatim (camelCase field names).
//! - Provide the (fileName, date) key used to attach annotations.
//!
//! # Invariants
//! - Documents are read-only to this core; nothing here mutates them.
//! - Percentages are 0–100 integers as emitted by the service.

use serde::{Deserialize, Serialize};

/// Per-antibiotic susceptibility scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntibioticScore {
    pub name: String,
    /// Percent probability the isolate is susceptible (0–100).
    pub susceptible: u8,
    /// Percent probability the isolate is resistant (0–100).
    pub resistant: u8,
}

/// One treatment recommendation with its confidence percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub confidence: u8,
}

/// One completed prediction, exactly as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub file_name: String,
    /// Service-side timestamp string; opaque here, part of the annotation key.
    pub date: String,
    /// Service-assigned prediction id.
    pub pid: i64,
    pub pathogen: String,
    pub antibiotics: Vec<AntibioticScore>,
    pub recommendations: Vec<Recommendation>,
    /// Multi-drug-resistance flag.
    pub mdr: bool,
    /// Detected resistance genes.
    pub genes: Vec<String>,
}

impl Prediction {
    /// Returns the composite annotation key for this document.
    pub fn annotation_key(&self) -> String {
        crate::model::annotation::annotation_key(&self.file_name, &self.date)
    }
}
