//! Domain model for the collaboration core.
//!
//! # Responsibility
//! - Define the precise shapes of every persisted or exchanged entity.
//! - Reject unrecognized role/status/priority values at parse time instead
//!   of carrying arbitrary strings.
//!
//! # Invariants
//! - Cross-references between entities are by account email, resolved
//!   through the identity store; the only embedded copy is the
//!   intentionally frozen `ChatMessage.user` snapshot.

pub mod account;
pub mod annotation;
pub mod chat;
pub mod event;
pub mod prediction;
pub mod session;
pub mod task;
