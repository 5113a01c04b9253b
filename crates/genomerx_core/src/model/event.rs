//! Calendar event domain model.
//!
//! # Invariants
//! - `date` is required; an event always falls on exactly one calendar day.
//! - `attendees` is a set; duplicates collapse at construction and on edit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable identifier for a calendar event.
pub type EventId = Uuid;

/// One date-indexed calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    /// Calendar day the event falls on (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Free-form start time label (e.g. `09:30`); may be empty.
    pub time_start: String,
    /// Free-form end time label; may be empty.
    pub time_end: String,
    pub location: String,
    /// Attendee account emails, deduplicated.
    pub attendees: BTreeSet<String>,
    pub description: String,
    /// Creator account email; informational only, since any
    /// calendar-eligible role may edit any event.
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}
