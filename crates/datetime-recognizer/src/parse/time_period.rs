use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::time::TimeParser;
use super::{unresolvable, TemporalParser};
use crate::calendar::shift_days;
use crate::config::{Configuration, Meridiem};
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

/// A resolved time-of-day range. `end` may be earlier than `start` when the
/// range runs past midnight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClockRange {
    pub code: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ClockRange {
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// The range's moments when it starts on `day`.
    pub fn on(&self, day: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let end_day = if self.crosses_midnight() {
            shift_days(day, 1)?
        } else {
            day
        };
        Some((day.and_time(self.start), end_day.and_time(self.end)))
    }
}

#[derive(Debug, Clone)]
pub struct TimePeriodParser {
    config: Arc<Configuration>,
    time: TimeParser,
}

impl TimePeriodParser {
    pub fn new(config: Arc<Configuration>, time: TimeParser) -> Self {
        Self { config, time }
    }

    pub(crate) fn resolve(&self, span: &ExtractedSpan) -> Result<ClockRange> {
        let locale = self.config.locale();

        if let Some(band) = span.capture("band") {
            let band = locale
                .band(band)
                .ok_or_else(|| unresolvable(span, "unknown band"))?;
            let (start, end) = self.config.options().bands.range(band);
            return Ok(ClockRange {
                code: band.code().to_string(),
                start,
                end,
            });
        }

        let (start, end) = match span.children.as_slice() {
            [first, second] => (self.time.resolve(first)?, self.time.resolve(second)?),
            _ => self.hour_range(span)?,
        };
        Ok(clock_range(start, end))
    }

    /// "4-6pm", "from 10:30 to 11:45 am": the meridiem after the second hour
    /// covers both, unless that would put the first hour after the second.
    fn hour_range(&self, span: &ExtractedSpan) -> Result<(NaiveTime, NaiveTime)> {
        let locale = self.config.locale();
        let number = |name: &str| -> Result<u32> {
            match span.capture(name) {
                Some(text) => locale
                    .numbers()
                    .integer(text)
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| unresolvable(span, "bad clock field")),
                None => Ok(0),
            }
        };
        let (hour1, minute1) = (number("hour1")?, number("minute1")?);
        let (hour2, minute2) = (number("hour2")?, number("minute2")?);
        let meridiem = span
            .capture("meridiem")
            .and_then(|m| locale.meridiem(m))
            .ok_or_else(|| unresolvable(span, "no meridiem"))?;
        if hour1 > 12 || hour2 > 12 {
            return Err(unresolvable(span, "hour out of range for meridiem"));
        }

        let to_24 = |hour: u32, meridiem: Meridiem| match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, h) if h < 12 => h + 12,
            (_, h) => h,
        };
        let end_hour = to_24(hour2, meridiem);
        let mut start_hour = to_24(hour1, meridiem);
        if (start_hour, minute1) > (end_hour, minute2) && meridiem == Meridiem::Pm {
            start_hour = to_24(hour1, Meridiem::Am);
        }

        let start = NaiveTime::from_hms_opt(start_hour, minute1, 0);
        let end = NaiveTime::from_hms_opt(end_hour, minute2, 0);
        start
            .zip(end)
            .ok_or_else(|| unresolvable(span, "no such time of day"))
    }
}

/// Build the `(Tstart,Tend,PTn)` code; a range past midnight runs into the
/// next day.
pub(crate) fn clock_range(start: NaiveTime, end: NaiveTime) -> ClockRange {
    let mut seconds = (end - start).num_seconds();
    if seconds < 0 {
        seconds += 86_400;
    }
    ClockRange {
        code: timex::range(
            &timex::time(start),
            &timex::time(end),
            &timex::clock_seconds(seconds),
        ),
        start,
        end,
    }
}

impl TemporalParser for TimePeriodParser {
    fn category(&self) -> Category {
        Category::TimePeriod
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolvedValue> {
        let range = self.resolve(span)?;
        Ok(ResolvedValue::new(
            span,
            range.code,
            Interpretation::single(Resolution::TimeRange {
                start: range.start,
                end: range.end,
            }),
        ))
    }
}
