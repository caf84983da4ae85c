// File: src/agenda.rs
use crate::error::{AgendaError, Result};
use crate::model::Event;
use chrono::NaiveDate;

/// A flat collection of events, queried per day.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    events: Vec<Event>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events that occur on the given day, in insertion order.
    pub fn events_in_day(&self, day: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.occurs_on_day(day)).collect()
    }

    /// Events whose title matches exactly. Titles are labels, not keys:
    /// several events may share one.
    pub fn find_by_title(&self, title: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.title() == title).collect()
    }

    pub fn find_by_uid(&self, uid: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.uid() == uid)
    }

    /// Tests whether the agenda has room for a non-repeating event: no other
    /// non-repeating event overlaps its half-open `[start, end)` interval.
    ///
    /// Repeating events are outside the supported subset and are rejected
    /// with [`AgendaError::UnsupportedOperation`]. Repeating events already
    /// in the agenda are ignored by the scan, as is the candidate itself if
    /// it was added beforehand.
    pub fn is_free_for(&self, event: &Event) -> Result<bool> {
        if event.has_repetition() {
            return Err(AgendaError::UnsupportedOperation(
                "free/busy check is limited to non-repeating events",
            ));
        }
        let start_a = event.start();
        let end_a = event.end();
        for other in &self.events {
            if other.uid() == event.uid() || other.has_repetition() {
                continue;
            }
            if start_a < other.end() && other.start() < end_a {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
