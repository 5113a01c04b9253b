//! Calendar event repository over the persisted `grx_events` payload.

use crate::model::event::{CalendarEvent, EventId};
use crate::repo::{load_or_default, persist, RepoError, RepoResult, StateStore};

const STATE_KEY: &str = "grx_events";

/// Persisted calendar event collection.
pub struct EventRepository<S: StateStore> {
    store: S,
    events: Vec<CalendarEvent>,
}

impl<S: StateStore> EventRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        let events = load_or_default(&store, STATE_KEY)?;
        Ok(Self { store, events })
    }

    pub fn all(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn insert(&mut self, event: CalendarEvent) -> RepoResult<()> {
        let mut next = self.events.clone();
        next.push(event);
        self.commit(next)
    }

    pub fn update(
        &mut self,
        id: EventId,
        mutate: impl FnOnce(&mut CalendarEvent),
    ) -> RepoResult<CalendarEvent> {
        let mut next = self.events.clone();
        let index = next
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| not_found(id))?;
        mutate(&mut next[index]);
        let updated = next[index].clone();
        self.commit(next)?;
        Ok(updated)
    }

    pub fn remove(&mut self, id: EventId) -> RepoResult<()> {
        let mut next = self.events.clone();
        let before = next.len();
        next.retain(|event| event.id != id);
        if next.len() == before {
            return Err(not_found(id));
        }
        self.commit(next)
    }

    fn commit(&mut self, next: Vec<CalendarEvent>) -> RepoResult<()> {
        persist(&self.store, STATE_KEY, &next)?;
        self.events = next;
        Ok(())
    }
}

fn not_found(id: EventId) -> RepoError {
    RepoError::NotFound {
        entity: "calendar event",
        id: id.to_string(),
    }
}
