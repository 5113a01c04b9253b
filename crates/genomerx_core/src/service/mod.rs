//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the view-facing operations.
//! - Enforce capability and validation rules at every mutation entry
//!   point, so authorization holds even when a caller bypasses the view.
//!
//! # Invariants
//! - Services never reach into another component's store; cross-references
//!   resolve through the identity store.

pub mod annotation_service;
pub mod calendar_service;
pub mod chat_service;
pub mod identity_service;
pub mod prediction_service;
pub mod task_service;
