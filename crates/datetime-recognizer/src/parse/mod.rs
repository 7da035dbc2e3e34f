//! Parsers: extracted span + reference moment → resolved value.
//!
//! There is one parser per category. Parsers that build on others (a
//! date-time period reads its date and its time of day) hold their own
//! copies of exactly the parsers they need, wired once in
//! [`MergedParser::new`].

mod date;
mod date_period;
mod date_time;
mod duration;
mod holiday;
mod set;
mod time;
mod time_period;
mod time_zone;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

pub use date::DateParser;
pub use date_period::DatePeriodParser;
pub use date_time::{DateTimeParser, DateTimePeriodParser};
pub use duration::DurationParser;
pub use holiday::HolidayParser;
pub use set::SetParser;
pub use time::TimeParser;
pub use time_period::TimePeriodParser;
pub use time_zone::TimeZoneParser;

use crate::calendar::{first_of_month, shift, shift_days, shift_months, Unit};
use crate::config::Configuration;
use crate::error::{RecognizerError, Result};
use crate::locale::Locale;
use crate::span::{Category, ExtractedSpan};
use crate::value::ResolvedValue;

/// Resolve one category of span against a reference moment.
pub trait TemporalParser: Send + Sync {
    fn category(&self) -> Category;

    /// # Errors
    ///
    /// Returns [`RecognizerError::Unresolvable`] when the span's captures do
    /// not describe a calendar value.
    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue>;
}

/// Future and past readings together with the canonical code.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reading<T> {
    pub code: String,
    pub future: T,
    pub past: T,
}

impl<T: Clone> Reading<T> {
    pub fn fixed(code: String, value: T) -> Self {
        Self {
            code,
            future: value.clone(),
            past: value,
        }
    }
}

pub(crate) fn unresolvable(span: &ExtractedSpan, reason: &str) -> RecognizerError {
    RecognizerError::Unresolvable(format!("{} '{}': {reason}", span.category, span.text))
}

/// A quantity word or number: "a few" → 3, "2.5" → 2.5, "twenty" → 20.
pub(crate) fn quantity(locale: &dyn Locale, text: &str) -> Option<f64> {
    locale
        .quantifier(text)
        .or_else(|| locale.numbers().decimal(text))
}

pub(crate) fn day_number(locale: &dyn Locale, text: &str) -> Option<u32> {
    let numbers = locale.numbers();
    let day = numbers.ordinal(text).or_else(|| numbers.integer(text))?;
    u32::try_from(day).ok().filter(|d| (1..=31).contains(d))
}

pub(crate) fn month_number(locale: &dyn Locale, text: &str) -> Option<u32> {
    locale.month(text).or_else(|| {
        let month = locale.numbers().integer(text)?;
        u32::try_from(month).ok().filter(|m| (1..=12).contains(m))
    })
}

/// Two-digit years are expanded around the turn of the century.
pub(crate) fn year_number(locale: &dyn Locale, text: &str) -> Option<i32> {
    let year = i32::try_from(locale.numbers().integer(text)?).ok()?;
    if text.len() <= 2 {
        Some(crate::calendar::expand_year(year))
    } else {
        Some(year)
    }
}

/// Shift a date by a possibly fractional number of calendar units.
/// Fractions are converted to whole days.
pub(crate) fn shift_date(date: NaiveDate, unit: Unit, amount: f64) -> Option<NaiveDate> {
    if amount.fract() == 0.0 && !unit.is_clock() {
        return shift(date, unit, amount as i64);
    }
    let days = (amount * unit.seconds() / 86_400.0).round();
    if !days.is_finite() {
        return None;
    }
    shift_days(date, days as i64)
}

/// Shift a moment by a number of units: clock units exactly, calendar units
/// by calendar arithmetic keeping the time of day.
pub(crate) fn shift_moment(moment: NaiveDateTime, unit: Unit, amount: f64) -> Option<NaiveDateTime> {
    if unit.is_clock() || amount.fract() != 0.0 {
        let seconds = amount * unit.seconds();
        if !seconds.is_finite() {
            return None;
        }
        let delta = TimeDelta::try_milliseconds((seconds * 1000.0).round() as i64)?;
        return moment.checked_add_signed(delta);
    }
    Some(shift(moment.date(), unit, amount as i64)?.and_time(moment.time()))
}

/// The candidates `at` produces around `today` (one per year) that fall
/// nearest on each side: first at or after, last at or before.
pub(crate) fn nearest_by_year<F>(today: NaiveDate, at: F) -> Option<(NaiveDate, NaiveDate)>
where
    F: Fn(i32) -> Option<NaiveDate>,
{
    let year = today.year();
    let candidates: Vec<NaiveDate> = (year - 8..=year + 8).filter_map(at).collect();
    nearest(today, &candidates)
}

/// Like [`nearest_by_year`] for a day number in every month around `today`.
pub(crate) fn nearest_by_month(today: NaiveDate, day: u32) -> Option<(NaiveDate, NaiveDate)> {
    let this_month = first_of_month(today.year(), today.month())?;
    let candidates: Vec<NaiveDate> = (-12..=12)
        .filter_map(|offset| shift_months(this_month, offset))
        .filter_map(|month| NaiveDate::from_ymd_opt(month.year(), month.month(), day))
        .collect();
    nearest(today, &candidates)
}

fn nearest(today: NaiveDate, sorted: &[NaiveDate]) -> Option<(NaiveDate, NaiveDate)> {
    let future = sorted.iter().find(|d| **d >= today)?;
    let past = sorted.iter().rev().find(|d| **d <= today)?;
    Some((*future, *past))
}

// ── Merged parser ───────────────────────────────────────────────────────────

/// Dispatches each span to its category's parser and attaches any time zone
/// the merge step absorbed into it.
pub struct MergedParser {
    parsers: HashMap<Category, Box<dyn TemporalParser>>,
    time_zone: TimeZoneParser,
}

impl MergedParser {
    pub fn new(config: Arc<Configuration>) -> Self {
        let date = DateParser::new(Arc::clone(&config));
        let time = TimeParser::new(Arc::clone(&config));
        let duration = DurationParser::new(Arc::clone(&config));
        let holiday = HolidayParser::new(Arc::clone(&config));
        let time_period = TimePeriodParser::new(Arc::clone(&config), time.clone());
        let date_time = DateTimeParser::new(Arc::clone(&config), date.clone(), time.clone());
        let date_period = DatePeriodParser::new(Arc::clone(&config), date.clone(), holiday.clone());
        let date_time_period = DateTimePeriodParser::new(
            Arc::clone(&config),
            date.clone(),
            time.clone(),
            time_period.clone(),
            date_time.clone(),
        );
        let set = SetParser::new(Arc::clone(&config), time.clone(), time_period.clone());
        let time_zone = TimeZoneParser::new(Arc::clone(&config));

        let all: Vec<Box<dyn TemporalParser>> = vec![
            Box::new(date),
            Box::new(time),
            Box::new(duration),
            Box::new(holiday),
            Box::new(time_period),
            Box::new(date_time),
            Box::new(date_period),
            Box::new(date_time_period),
            Box::new(set),
            Box::new(time_zone.clone()),
        ];
        let parsers = all.into_iter().map(|p| (p.category(), p)).collect();
        Self { parsers, time_zone }
    }

    /// Resolve one span.
    ///
    /// # Errors
    ///
    /// Returns [`RecognizerError::Unresolvable`] when the span cannot be
    /// resolved.
    pub fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        let parser = self
            .parsers
            .get(&span.category)
            .ok_or_else(|| unresolvable(span, "no parser for category"))?;
        let mut value = parser.parse(span, reference)?;
        if span.category != Category::TimeZone {
            if let Some(zone) = attached_zone(span) {
                value.time_zone = Some(self.time_zone.resolve(zone, reference)?.1);
            }
        }
        Ok(value)
    }

    /// Resolve every span, skipping those that cannot be resolved.
    pub fn parse_all(&self, spans: &[ExtractedSpan], reference: NaiveDateTime) -> Vec<ResolvedValue> {
        spans
            .iter()
            .filter_map(|span| match self.parse(span, reference) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, start = span.start, "skipping span");
                    None
                }
            })
            .collect()
    }
}

/// A time-zone span absorbed anywhere inside `span`.
fn attached_zone(span: &ExtractedSpan) -> Option<&ExtractedSpan> {
    span.children.iter().find_map(|child| {
        if child.category == Category::TimeZone {
            Some(child)
        } else {
            attached_zone(child)
        }
    })
}
