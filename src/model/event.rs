// File: src/model/event.rs
use crate::error::Result;
use crate::model::{Frequency, Repetition, Termination};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_uid() -> String {
    Uuid::new_v4().to_string()
}

/// A calendar event: a titled time span anchored at a start instant,
/// optionally repeating.
///
/// Titles are labels, not identifiers; every event carries its own uid.
/// The duration is never negative (a negative span is clamped to zero at
/// construction) and `start` is always defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "default_uid")]
    uid: String,
    title: String,
    start: NaiveDateTime,
    #[serde(with = "duration_seconds")]
    duration: Duration,
    repetition: Option<Repetition>,
}

impl Event {
    pub fn new(title: &str, start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            uid: default_uid(),
            title: title.to_string(),
            start,
            duration: duration.max(Duration::zero()),
            repetition: None,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub(crate) fn set_uid(&mut self, uid: String) {
        self.uid = uid;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start + self.duration
    }

    pub fn has_repetition(&self) -> bool {
        self.repetition.is_some()
    }

    pub fn repetition(&self) -> Option<&Repetition> {
        self.repetition.as_ref()
    }

    /// Enables, replaces, or disables repetition.
    ///
    /// The repetition is replaced wholesale: disabling and re-enabling
    /// starts from a fresh `Repetition`, discarding any previously recorded
    /// exceptions and termination.
    pub fn set_repetition(&mut self, frequency: Option<Frequency>) {
        self.repetition = frequency.map(Repetition::new);
    }

    /// Registers a date on which the repeating series does not occur.
    /// Does nothing for a non-repeating event.
    pub fn add_exception(&mut self, date: NaiveDate) {
        if let Some(rep) = self.repetition.as_mut() {
            rep.add_exception(date);
        }
    }

    /// Bounds the series at an inclusive termination date.
    /// Does nothing for a non-repeating event.
    pub fn set_termination_date(&mut self, termination_inclusive: NaiveDate) -> Result<()> {
        let start_date = self.start.date();
        if let Some(rep) = self.repetition.as_mut() {
            let t = Termination::from_date(start_date, rep.frequency(), termination_inclusive)?;
            rep.set_termination(t);
        }
        Ok(())
    }

    /// Bounds the series at a fixed number of occurrences (at least 1).
    /// Does nothing for a non-repeating event.
    pub fn set_termination_count(&mut self, number_of_occurrences: i64) -> Result<()> {
        let start_date = self.start.date();
        if let Some(rep) = self.repetition.as_mut() {
            let t = Termination::from_count(start_date, rep.frequency(), number_of_occurrences)?;
            rep.set_termination(t);
        }
        Ok(())
    }

    /// Number of occurrences of this event: 1 without repetition, -1 for an
    /// unbounded series, otherwise the termination's occurrence count.
    pub fn occurrence_count(&self) -> i64 {
        match &self.repetition {
            None => 1,
            Some(rep) => match rep.termination() {
                None => -1,
                Some(t) => t.number_of_occurrences(),
            },
        }
    }

    /// Inclusive termination date of the series, if one is set.
    pub fn termination_date(&self) -> Option<NaiveDate> {
        self.repetition
            .as_ref()?
            .termination()
            .map(|t| t.termination_date_inclusive())
    }

    /// Tests whether the event occurs on the given calendar day.
    ///
    /// An exception date wins over everything, including spillover from the
    /// previous occurrence. A non-repeating event covers every date of its
    /// `[start, start + duration]` span, both ends inclusive. For a
    /// repeating event, the occurrence aligned with `day` and the
    /// immediately preceding one (whose span may cross midnight into `day`)
    /// are both evaluated.
    pub fn occurs_on_day(&self, day: NaiveDate) -> bool {
        if let Some(rep) = &self.repetition
            && rep.is_exception(day)
        {
            return false;
        }

        let start_date = self.start.date();

        let Some(rep) = &self.repetition else {
            return day >= start_date && day <= self.end().date();
        };

        // No occurrence precedes the series anchor.
        if day < start_date {
            return false;
        }

        let idx = rep.frequency().units_between(start_date, day);
        for k in (idx - 1).max(0)..=idx {
            if self.candidate_covers(rep, k, day) {
                return true;
            }
        }
        false
    }

    /// Whether the occurrence at index `k` exists and covers `day`.
    fn candidate_covers(&self, rep: &Repetition, k: i64, day: NaiveDate) -> bool {
        let Some(occ_start) = rep.frequency().advance_datetime(self.start, k) else {
            return false;
        };
        if occ_start.date() > day {
            return false;
        }
        if let Some(term) = rep.termination() {
            // Either the date or the count may have been the recorded form
            // of the bound; both are checked.
            if occ_start.date() > term.termination_date_inclusive() {
                return false;
            }
            if k >= term.number_of_occurrences() {
                return false;
            }
        }
        // The occurrence itself may be cancelled even though `day` is not
        // the exception date (spillover from a cancelled occurrence).
        if rep.is_exception(occ_start.date()) {
            return false;
        }
        let Some(occ_end) = occ_start.checked_add_signed(self.duration) else {
            return false;
        };
        day >= occ_start.date() && day <= occ_end.date()
    }
}

mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Duration::try_seconds(seconds)
            .ok_or_else(|| serde::de::Error::custom("duration out of range"))
    }
}
