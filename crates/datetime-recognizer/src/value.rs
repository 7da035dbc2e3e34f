//! Resolved values returned by the parsers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::recurrence::Recurrence;
use crate::span::{Category, ExtractedSpan, Modifier};

/// A concrete calendar value: a point, a range, a length of time, a
/// repeating rule or a UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateRange { start: NaiveDate, end: NaiveDate },
    TimeRange { start: NaiveTime, end: NaiveTime },
    DateTimeRange { start: NaiveDateTime, end: NaiveDateTime },
    Duration { seconds: f64 },
    Recurrence(Recurrence),
    TimeZone(TimeZoneValue),
}

impl Resolution {
    /// The date of a `Date` resolution.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Resolution::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Resolution::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Resolution::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// `(start, end)` of a date range.
    pub fn as_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Resolution::DateRange { start, end } => Some((*start, *end)),
            _ => None,
        }
    }
}

/// A resolved UTC offset, optionally backed by an IANA zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeZoneValue {
    /// Offset from UTC in minutes (e.g. -300 for UTC-05:00).
    pub utc_offset_minutes: i32,
    /// The IANA timezone name when the phrase named a region.
    pub zone: Option<String>,
    /// Whether Daylight Saving Time is active at the reference moment.
    pub dst_active: bool,
}

/// Future and past readings of a span relative to the reference moment.
///
/// Fully specified expressions have a single reading; expressions such as a
/// bare weekday have one reading at or after the reference moment and one at
/// or before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "ambiguity", rename_all = "snake_case")]
pub enum Interpretation {
    Unambiguous { value: Resolution },
    Ambiguous { future: Resolution, past: Resolution },
}

impl Interpretation {
    /// Pair two readings, collapsing them when they agree.
    pub fn new(future: Resolution, past: Resolution) -> Self {
        if future == past {
            Interpretation::Unambiguous { value: future }
        } else {
            Interpretation::Ambiguous { future, past }
        }
    }

    pub fn single(value: Resolution) -> Self {
        Interpretation::Unambiguous { value }
    }

    pub fn future(&self) -> &Resolution {
        match self {
            Interpretation::Unambiguous { value } => value,
            Interpretation::Ambiguous { future, .. } => future,
        }
    }

    pub fn past(&self) -> &Resolution {
        match self {
            Interpretation::Unambiguous { value } => value,
            Interpretation::Ambiguous { past, .. } => past,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Interpretation::Ambiguous { .. })
    }
}

/// A span together with its canonical code and resolved readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedValue {
    pub category: Category,
    pub text: String,
    pub start: usize,
    pub length: usize,
    /// Canonical temporal code (see [`crate::timex`]).
    pub code: String,
    pub value: Interpretation,
    pub modifier: Option<Modifier>,
    pub time_zone: Option<TimeZoneValue>,
}

impl ResolvedValue {
    pub(crate) fn new(span: &ExtractedSpan, code: String, value: Interpretation) -> Self {
        Self {
            category: span.category,
            text: span.text.clone(),
            start: span.start,
            length: span.length,
            code,
            value,
            modifier: span.modifier,
            time_zone: None,
        }
    }

    pub fn future(&self) -> &Resolution {
        self.value.future()
    }

    pub fn past(&self) -> &Resolution {
        self.value.past()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.value.is_ambiguous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Resolution {
        Resolution::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_equal_readings_collapse() {
        let value = Interpretation::new(date(2016, 11, 15), date(2016, 11, 15));
        assert!(!value.is_ambiguous());
        assert_eq!(value.future(), value.past());
    }

    #[test]
    fn test_distinct_readings_stay_ambiguous() {
        let value = Interpretation::new(date(2016, 11, 15), date(2016, 10, 15));
        assert!(value.is_ambiguous());
        assert_eq!(value.past().as_date(), NaiveDate::from_ymd_opt(2016, 10, 15));
    }

    #[test]
    fn test_resolution_serializes_with_kind_tag() {
        let json = serde_json::to_value(date(2016, 11, 15)).unwrap();
        assert_eq!(json["kind"], "date");
        assert_eq!(json["value"], "2016-11-15");
    }
}
