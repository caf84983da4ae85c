// File: src/model/termination.rs
use crate::error::{AgendaError, Result};
use crate::model::Frequency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The bound on how many times a repeating event occurs, held in two
/// equivalent forms: an inclusive termination date and a positive occurrence
/// count. One form is supplied at construction, the other is derived, and
/// the pair never changes afterwards — changing the bound means building a
/// new `Termination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    termination_date_inclusive: NaiveDate,
    number_of_occurrences: i64,
}

impl Termination {
    /// Builds a termination ending on the given inclusive date.
    ///
    /// The occurrence count is derived as the number of whole frequency
    /// units between `start` and `termination_inclusive`, plus one for the
    /// first occurrence. A termination date before the start date is an
    /// inconsistent pair and is rejected.
    pub fn from_date(
        start: NaiveDate,
        frequency: Frequency,
        termination_inclusive: NaiveDate,
    ) -> Result<Self> {
        if termination_inclusive < start {
            return Err(AgendaError::InvalidArgument(format!(
                "termination date {} precedes start date {}",
                termination_inclusive, start
            )));
        }
        let number_of_occurrences = frequency.units_between(start, termination_inclusive) + 1;
        Ok(Self {
            termination_date_inclusive: termination_inclusive,
            number_of_occurrences,
        })
    }

    /// Builds a termination ending after a fixed number of occurrences
    /// (at least 1). The inclusive termination date is the start date
    /// advanced by `number_of_occurrences - 1` frequency units.
    pub fn from_count(
        start: NaiveDate,
        frequency: Frequency,
        number_of_occurrences: i64,
    ) -> Result<Self> {
        if number_of_occurrences < 1 {
            return Err(AgendaError::InvalidArgument(format!(
                "number of occurrences must be at least 1, got {}",
                number_of_occurrences
            )));
        }
        let termination_date_inclusive = frequency
            .advance_date(start, number_of_occurrences - 1)
            .ok_or_else(|| {
                AgendaError::InvalidArgument(format!(
                    "termination date out of range for {} occurrences from {}",
                    number_of_occurrences, start
                ))
            })?;
        Ok(Self {
            termination_date_inclusive,
            number_of_occurrences,
        })
    }

    pub fn termination_date_inclusive(&self) -> NaiveDate {
        self.termination_date_inclusive
    }

    pub fn number_of_occurrences(&self) -> i64 {
        self.number_of_occurrences
    }
}
