//! Calendar use-case service.
//!
//! # Responsibility
//! - Enforce the page-level role gate before any query or mutation runs.
//! - Provide the month-grid and upcoming-list projections views render.
//!
//! # Invariants
//! - `month_grid` always yields exactly 42 cells and starts on a Sunday.
//! - Attendee lists are deduplicated sets of normalized emails.
//! - Any permitted role may edit any event; there is no per-event owner
//!   restriction here, unlike tasks.

use crate::access::{assert_capability, AccessError, Capability};
use crate::model::account::{normalize_email, Account};
use crate::model::event::{CalendarEvent, EventId};
use crate::repo::calendar_repo::EventRepository;
use crate::repo::{RepoError, StateStore};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Cells in the fixed 6x7 month grid.
const MONTH_GRID_CELLS: i64 = 42;

/// Calendar error taxonomy.
#[derive(Debug)]
pub enum CalendarError {
    /// Actor's role is outside the calendar allow-list.
    Forbidden(AccessError),
    /// Create/update produced an empty title.
    EmptyTitle,
    EventNotFound(EventId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden(err) => write!(f, "{err}"),
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::EventNotFound(id) => write!(f, "calendar event not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Forbidden(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AccessError> for CalendarError {
    fn from(value: AccessError) -> Self {
        Self::Forbidden(value)
    }
}

impl From<RepoError> for CalendarError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for creating one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub time_start: String,
    pub time_end: String,
    pub location: String,
    pub attendees: Vec<String>,
    pub description: String,
}

/// Partial update for one event; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub description: Option<String>,
}

/// One cell of the 6x7 month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// Whether the cell falls inside the cursor's month.
    pub in_month: bool,
    /// Events whose date falls on this cell.
    pub events: Vec<CalendarEvent>,
}

/// Calendar facade over the event repository.
pub struct Calendar<S: StateStore> {
    repo: EventRepository<S>,
}

impl<S: StateStore> Calendar<S> {
    pub fn new(repo: EventRepository<S>) -> Self {
        Self { repo }
    }

    /// Lists all events; row-level filtering is not part of this component.
    pub fn list(&self, actor: &Account) -> Result<Vec<CalendarEvent>, CalendarError> {
        assert_capability(actor, Capability::AccessCalendar)?;
        Ok(self.repo.all().to_vec())
    }

    /// Creates one event dated on `draft.date`.
    pub fn create(
        &mut self,
        actor: &Account,
        draft: EventDraft,
        now_ms: i64,
    ) -> Result<CalendarEvent, CalendarError> {
        assert_capability(actor, Capability::AccessCalendar)?;
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(CalendarError::EmptyTitle);
        }

        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title,
            date: draft.date,
            time_start: draft.time_start,
            time_end: draft.time_end,
            location: draft.location,
            attendees: normalize_attendees(draft.attendees),
            description: draft.description,
            created_by: actor.email.clone(),
            created_at: now_ms,
            updated_at: now_ms,
        };
        self.repo.insert(event.clone())?;
        Ok(event)
    }

    /// Applies a partial edit; any calendar-eligible role may edit any event.
    pub fn update(
        &mut self,
        actor: &Account,
        id: EventId,
        patch: EventPatch,
        now_ms: i64,
    ) -> Result<CalendarEvent, CalendarError> {
        assert_capability(actor, Capability::AccessCalendar)?;
        if self.repo.get(id).is_none() {
            return Err(CalendarError::EventNotFound(id));
        }
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(CalendarError::EmptyTitle);
            }
        }

        let updated = self.repo.update(id, |event| {
            if let Some(title) = patch.title {
                event.title = title.trim().to_string();
            }
            if let Some(date) = patch.date {
                event.date = date;
            }
            if let Some(time_start) = patch.time_start {
                event.time_start = time_start;
            }
            if let Some(time_end) = patch.time_end {
                event.time_end = time_end;
            }
            if let Some(location) = patch.location {
                event.location = location;
            }
            if let Some(attendees) = patch.attendees {
                event.attendees = normalize_attendees(attendees);
            }
            if let Some(description) = patch.description {
                event.description = description;
            }
            event.updated_at = now_ms;
        })?;
        Ok(updated)
    }

    pub fn delete(&mut self, actor: &Account, id: EventId) -> Result<(), CalendarError> {
        assert_capability(actor, Capability::AccessCalendar)?;
        if self.repo.get(id).is_none() {
            return Err(CalendarError::EventNotFound(id));
        }
        self.repo.remove(id)?;
        Ok(())
    }

    /// Builds the fixed 42-cell grid for the month `cursor` falls in.
    ///
    /// The grid starts on the Sunday on/before the 1st and always spans
    /// complete weeks, so every date of the month appears exactly once.
    pub fn month_grid(
        &self,
        actor: &Account,
        cursor: NaiveDate,
    ) -> Result<Vec<MonthCell>, CalendarError> {
        assert_capability(actor, Capability::AccessCalendar)?;

        let first_of_month = cursor.with_day(1).unwrap_or(cursor);
        let lead_days = i64::from(first_of_month.weekday().num_days_from_sunday());
        let grid_start = first_of_month - Duration::days(lead_days);

        let cells = (0..MONTH_GRID_CELLS)
            .map(|offset| {
                let date = grid_start + Duration::days(offset);
                MonthCell {
                    date,
                    in_month: date.month() == cursor.month() && date.year() == cursor.year(),
                    events: self
                        .repo
                        .all()
                        .iter()
                        .filter(|event| event.date == date)
                        .cloned()
                        .collect(),
                }
            })
            .collect();
        Ok(cells)
    }

    /// Events dated on/after `from`, ascending by date, truncated to `limit`.
    pub fn upcoming(
        &self,
        actor: &Account,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        assert_capability(actor, Capability::AccessCalendar)?;

        let mut events: Vec<CalendarEvent> = self
            .repo
            .all()
            .iter()
            .filter(|event| event.date >= from)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.date);
        events.truncate(limit);
        Ok(events)
    }
}

fn normalize_attendees(attendees: Vec<String>) -> BTreeSet<String> {
    attendees
        .iter()
        .map(|email| normalize_email(email))
        .filter(|email| !email.is_empty())
        .collect()
}
