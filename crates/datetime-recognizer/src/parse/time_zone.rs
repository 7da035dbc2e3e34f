use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use super::{unresolvable, TemporalParser};
use crate::config::{Configuration, ZoneSpec};
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::value::{Interpretation, Resolution, ResolvedValue, TimeZoneValue};

#[derive(Debug, Clone)]
pub struct TimeZoneParser {
    config: Arc<Configuration>,
}

impl TimeZoneParser {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    /// Resolve a zone phrase to its code (`UTC-05:00`) and offset. Region
    /// names take the offset in force at `reference` (read as UTC).
    pub(crate) fn resolve(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<(String, TimeZoneValue)> {
        if let Some(offset) = span.capture("offset") {
            let minutes =
                parse_offset(offset).ok_or_else(|| unresolvable(span, "bad UTC offset"))?;
            let value = TimeZoneValue {
                utc_offset_minutes: minutes,
                zone: None,
                dst_active: false,
            };
            return Ok((offset_code(minutes), value));
        }

        let phrase = span
            .capture("zone")
            .ok_or_else(|| unresolvable(span, "no zone"))?;
        let value = match self.config.locale().zone(phrase) {
            Some(ZoneSpec::Fixed(minutes)) => TimeZoneValue {
                utc_offset_minutes: minutes,
                zone: None,
                dst_active: false,
            },
            Some(ZoneSpec::Region(tz)) => region_value(tz, reference),
            None => return Err(unresolvable(span, "unknown time zone")),
        };
        Ok((offset_code(value.utc_offset_minutes), value))
    }
}

impl TemporalParser for TimeZoneParser {
    fn category(&self) -> Category {
        Category::TimeZone
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        let (code, value) = self.resolve(span, reference)?;
        let mut resolved = ResolvedValue::new(
            span,
            code,
            Interpretation::single(Resolution::TimeZone(value.clone())),
        );
        resolved.time_zone = Some(value);
        Ok(resolved)
    }
}

/// Offset and DST state of a region at a UTC moment. DST counts as active
/// when the offset differs from the one in force on January 1.
fn region_value(tz: Tz, reference: NaiveDateTime) -> TimeZoneValue {
    let current = tz.offset_from_utc_datetime(&reference).fix().local_minus_utc();
    let january = reference
        .date()
        .with_month(1)
        .and_then(|d| d.with_day(1))
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map_or(current, |jan1| {
            tz.offset_from_utc_datetime(&jan1).fix().local_minus_utc()
        });
    TimeZoneValue {
        utc_offset_minutes: current / 60,
        zone: Some(tz.name().to_string()),
        dst_active: current != january,
    }
}

/// "+8", "-05:00", "+0530", "- 3" → minutes east of UTC.
fn parse_offset(text: &str) -> Option<i32> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (sign, digits) = match compact.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if digits.len() > 2 => {
            let (h, m) = digits.split_at(digits.len() - 2);
            (h.parse().ok()?, m.parse().ok()?)
        }
        None => (digits.parse().ok()?, 0),
    };
    if hours > 14 || minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

/// `UTC-05:00`, `UTC+05:30`, `UTC+00:00`.
fn offset_code(minutes: i32) -> String {
    let sign = if minutes >= 0 { "+" } else { "-" };
    let abs = minutes.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
}
