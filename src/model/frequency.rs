// File: src/model/frequency.rs
use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The calendar unit separating consecutive occurrences of a repeating event.
///
/// Date arithmetic is implemented per variant; every case is matched
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Advances a date by `units` whole units. Monthly advances clamp to the
    /// last day of shorter target months (Jan 31 + 1 month = Feb 28/29).
    /// Returns None when the result leaves chrono's representable range.
    pub fn advance_date(self, date: NaiveDate, units: i64) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => add_days_to_date(date, units),
            Frequency::Weekly => add_days_to_date(date, units.checked_mul(7)?),
            Frequency::Monthly => {
                let months = u32::try_from(units.unsigned_abs()).ok()?;
                if units >= 0 {
                    date.checked_add_months(Months::new(months))
                } else {
                    date.checked_sub_months(Months::new(months))
                }
            }
        }
    }

    /// Same as [`Frequency::advance_date`] but keeps the time-of-day of the
    /// anchor instant.
    pub fn advance_datetime(self, start: NaiveDateTime, units: i64) -> Option<NaiveDateTime> {
        match self {
            Frequency::Daily => start.checked_add_signed(Duration::try_days(units)?),
            Frequency::Weekly => start.checked_add_signed(Duration::try_days(units.checked_mul(7)?)?),
            Frequency::Monthly => {
                let months = u32::try_from(units.unsigned_abs()).ok()?;
                if units >= 0 {
                    start.checked_add_months(Months::new(months))
                } else {
                    start.checked_sub_months(Months::new(months))
                }
            }
        }
    }

    /// Whole units between two dates, truncating any partial unit toward
    /// zero. Negative when `to` precedes `from`.
    ///
    /// The monthly count uses a packed proleptic-month difference so it stays
    /// consistent with the clamping behavior of the monthly advance: the
    /// month delta is adjusted down by one when the day-of-month has not yet
    /// been reached.
    pub fn units_between(self, from: NaiveDate, to: NaiveDate) -> i64 {
        match self {
            Frequency::Daily => to.signed_duration_since(from).num_days(),
            Frequency::Weekly => to.signed_duration_since(from).num_days() / 7,
            Frequency::Monthly => {
                let from_months = i64::from(from.year()) * 12 + i64::from(from.month0());
                let to_months = i64::from(to.year()) * 12 + i64::from(to.month0());
                let packed = (to_months - from_months) * 32
                    + (i64::from(to.day()) - i64::from(from.day()));
                packed / 32
            }
        }
    }

    /// The RFC 5545 FREQ token for this frequency.
    pub fn ical_token(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
        }
    }

    /// Parses an RFC 5545 FREQ token, case-insensitively.
    pub fn from_ical_token(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "DAILY" => Some(Frequency::Daily),
            "WEEKLY" => Some(Frequency::Weekly),
            "MONTHLY" => Some(Frequency::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

fn add_days_to_date(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_and_weekly_advance() {
        assert_eq!(
            Frequency::Daily.advance_date(d(2020, 12, 30), 3),
            Some(d(2021, 1, 2))
        );
        assert_eq!(
            Frequency::Weekly.advance_date(d(2020, 11, 1), 9),
            Some(d(2021, 1, 3))
        );
    }

    #[test]
    fn test_monthly_advance_clamps_to_month_end() {
        assert_eq!(
            Frequency::Monthly.advance_date(d(2023, 1, 31), 1),
            Some(d(2023, 2, 28))
        );
        // Leap year keeps the 29th.
        assert_eq!(
            Frequency::Monthly.advance_date(d(2024, 1, 31), 1),
            Some(d(2024, 2, 29))
        );
        // Each index advances from the anchor, so the clamp does not stick.
        assert_eq!(
            Frequency::Monthly.advance_date(d(2023, 1, 31), 2),
            Some(d(2023, 3, 31))
        );
    }

    #[test]
    fn test_units_between_truncates_partial_units() {
        assert_eq!(Frequency::Daily.units_between(d(2020, 11, 1), d(2020, 11, 9)), 8);
        // 13 days is one whole week.
        assert_eq!(Frequency::Weekly.units_between(d(2020, 11, 1), d(2020, 11, 14)), 1);
        assert_eq!(Frequency::Weekly.units_between(d(2020, 11, 1), d(2021, 1, 5)), 9);
        // Jan 15 -> Mar 14 has not completed the second month.
        assert_eq!(Frequency::Monthly.units_between(d(2023, 1, 15), d(2023, 3, 14)), 1);
        assert_eq!(Frequency::Monthly.units_between(d(2023, 1, 15), d(2023, 3, 15)), 2);
    }

    #[test]
    fn test_units_between_negative_direction() {
        assert_eq!(Frequency::Daily.units_between(d(2020, 11, 9), d(2020, 11, 1)), -8);
        assert_eq!(Frequency::Monthly.units_between(d(2023, 3, 15), d(2023, 1, 15)), -2);
    }

    #[test]
    fn test_ical_token_round_trip() {
        use strum::IntoEnumIterator;
        for freq in Frequency::iter() {
            assert_eq!(Frequency::from_ical_token(freq.ical_token()), Some(freq));
        }
        assert_eq!(Frequency::from_ical_token("HOURLY"), None);
    }
}
