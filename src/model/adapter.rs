// File: src/model/adapter.rs
use crate::error::{AgendaError, Result};
use crate::model::{Event, Frequency};
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use icalendar::{Calendar, CalendarComponent, Component};

const DATETIME_FMT: &str = "%Y%m%dT%H%M%S";
const DATE_FMT: &str = "%Y%m%d";

impl Event {
    /// Serializes the event as an iCalendar VEVENT wrapped in a VCALENDAR.
    ///
    /// Instants are emitted as floating date-times (no zone designator).
    /// A terminated series is written with `COUNT`; exception dates become
    /// one date-valued `EXDATE` each, in ascending order.
    pub fn to_ics(&self) -> String {
        let mut vevent = icalendar::Event::new();
        vevent.uid(self.uid());
        vevent.summary(self.title());
        vevent.timestamp(Utc::now());
        vevent.add_property("DTSTART", self.start().format(DATETIME_FMT).to_string());
        vevent.add_property("DTEND", self.end().format(DATETIME_FMT).to_string());

        if let Some(rep) = self.repetition() {
            let mut rule = format!("FREQ={}", rep.frequency().ical_token());
            if let Some(term) = rep.termination() {
                rule.push_str(&format!(";COUNT={}", term.number_of_occurrences()));
            }
            vevent.add_property("RRULE", rule);

            let mut exdates: Vec<NaiveDate> = rep.exceptions().collect();
            exdates.sort();
            for date in exdates {
                let value = date.format(DATE_FMT).to_string();
                let mut prop = icalendar::Property::new("EXDATE", value.as_str());
                prop.add_parameter("VALUE", "DATE");
                vevent.append_multi_property(prop);
            }
        }

        let mut calendar = Calendar::new();
        calendar.push(vevent);
        calendar.to_string()
    }

    /// Parses the first VEVENT of an iCalendar stream back into an event.
    ///
    /// Accepts date-only or date-time DTSTART/DTEND values, `COUNT` or a
    /// date-valued `UNTIL` in the RRULE, and skips malformed EXDATE values
    /// with a warning rather than failing the whole import.
    pub fn from_ics(raw_ics: &str) -> Result<Self> {
        let calendar: Calendar = raw_ics
            .parse()
            .map_err(|e| AgendaError::InvalidCalendarData(format!("parse: {}", e)))?;

        let vevent = calendar
            .components
            .iter()
            .find_map(|c| match c {
                CalendarComponent::Event(e) => Some(e),
                _ => None,
            })
            .ok_or_else(|| AgendaError::InvalidCalendarData("no VEVENT found".to_string()))?;

        let title = vevent.get_summary().unwrap_or("").to_string();

        let start = vevent
            .properties()
            .get("DTSTART")
            .and_then(|p| parse_ics_datetime(p.value()))
            .ok_or_else(|| {
                AgendaError::InvalidCalendarData("missing or invalid DTSTART".to_string())
            })?;

        let duration = vevent
            .properties()
            .get("DTEND")
            .and_then(|p| parse_ics_datetime(p.value()))
            .map_or_else(Duration::zero, |end| end - start);

        let mut event = Event::new(&title, start, duration);
        if let Some(uid) = vevent.get_uid() {
            event.set_uid(uid.to_string());
        }

        if let Some(prop) = vevent.properties().get("RRULE") {
            let mut frequency = None;
            let mut count = None;
            let mut until = None;
            for part in prop.value().split(';') {
                let Some((key, value)) = part.split_once('=') else {
                    continue;
                };
                match key.trim().to_uppercase().as_str() {
                    "FREQ" => frequency = Frequency::from_ical_token(value.trim()),
                    "COUNT" => count = value.trim().parse::<i64>().ok(),
                    "UNTIL" => until = parse_ics_date(value.trim()),
                    other => log::debug!("ignoring RRULE part {}={}", other, value),
                }
            }
            let Some(frequency) = frequency else {
                return Err(AgendaError::InvalidCalendarData(
                    "RRULE without a supported FREQ".to_string(),
                ));
            };
            event.set_repetition(Some(frequency));
            if let Some(n) = count {
                event.set_termination_count(n)?;
            } else if let Some(date) = until {
                event.set_termination_date(date)?;
            }
        }

        let mut register_exdates = |value: &str| {
            for raw in value.split(',') {
                match parse_ics_date(raw.trim()) {
                    Some(date) => event.add_exception(date),
                    None => log::warn!("skipping malformed EXDATE value: {}", raw),
                }
            }
        };
        if let Some(props) = vevent.multi_properties().get("EXDATE") {
            for prop in props {
                register_exdates(prop.value());
            }
        }
        if let Some(prop) = vevent.properties().get("EXDATE") {
            register_exdates(prop.value());
        }

        Ok(event)
    }
}

fn parse_ics_datetime(val: &str) -> Option<NaiveDateTime> {
    if val.len() == 8 {
        NaiveDate::parse_from_str(val, DATE_FMT)
            .ok()?
            .and_hms_opt(0, 0, 0)
    } else {
        let fmt = if val.ends_with('Z') {
            "%Y%m%dT%H%M%SZ"
        } else {
            DATETIME_FMT
        };
        NaiveDateTime::parse_from_str(val, fmt).ok()
    }
}

fn parse_ics_date(val: &str) -> Option<NaiveDate> {
    parse_ics_datetime(val).map(|dt| dt.date())
}
