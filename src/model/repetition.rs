// File: src/model/repetition.rs
use crate::model::{Frequency, Termination};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Repetition data attached to an event: the spacing unit, the dates on
/// which the series does not occur, and an optional termination bound.
///
/// Owned exclusively by its event. The frequency is fixed at construction;
/// changing it means replacing the whole `Repetition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repetition {
    frequency: Frequency,
    exceptions: HashSet<NaiveDate>,
    termination: Option<Termination>,
}

impl Repetition {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            exceptions: HashSet::new(),
            termination: None,
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Registers a date on which the series does not occur. Idempotent.
    pub fn add_exception(&mut self, date: NaiveDate) {
        self.exceptions.insert(date);
    }

    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exceptions.contains(&date)
    }

    pub fn exceptions(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.exceptions.iter().copied()
    }

    /// Replaces the current termination bound.
    pub fn set_termination(&mut self, termination: Termination) {
        self.termination = Some(termination);
    }

    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Human-readable summary of the recurrence, e.g. "weekly" or
    /// "weekly, 10 times, until 2021-01-03".
    pub fn describe(&self) -> String {
        match &self.termination {
            None => self.frequency.to_string(),
            Some(t) => format!(
                "{}, {} times, until {}",
                self.frequency,
                t.number_of_occurrences(),
                t.termination_date_inclusive().format("%Y-%m-%d")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_exceptions_are_a_set() {
        let mut rep = Repetition::new(Frequency::Daily);
        assert!(!rep.is_exception(d(2023, 4, 1)));

        rep.add_exception(d(2023, 4, 1));
        rep.add_exception(d(2023, 4, 1));
        rep.add_exception(d(2023, 4, 8));

        assert!(rep.is_exception(d(2023, 4, 1)));
        assert!(rep.is_exception(d(2023, 4, 8)));
        assert!(!rep.is_exception(d(2023, 4, 2)));
        assert_eq!(rep.exceptions().count(), 2);
    }

    #[test]
    fn test_set_termination_replaces_previous_bound() {
        let start = d(2020, 11, 1);
        let mut rep = Repetition::new(Frequency::Weekly);
        assert!(rep.termination().is_none());

        rep.set_termination(Termination::from_count(start, rep.frequency(), 3).unwrap());
        rep.set_termination(Termination::from_count(start, rep.frequency(), 10).unwrap());
        assert_eq!(rep.termination().unwrap().number_of_occurrences(), 10);
    }

    #[test]
    fn test_describe() {
        let start = d(2020, 11, 1);
        let mut rep = Repetition::new(Frequency::Weekly);
        assert_eq!(rep.describe(), "weekly");

        rep.set_termination(Termination::from_count(start, rep.frequency(), 10).unwrap());
        assert_eq!(rep.describe(), "weekly, 10 times, until 2021-01-03");
    }
}
