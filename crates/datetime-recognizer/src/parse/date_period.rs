//! Day-granular periods.
//!
//! Every period is computed half-open, `[start, end)`, and only converted
//! to the configured end convention when emitted. Unit periods ("next 3
//! days", "Q1") keep their unit length in the code; explicit ranges use the
//! day difference of the emitted boundaries.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use super::date::DateParser;
use super::holiday::HolidayParser;
use super::{
    month_number, quantity, unresolvable, year_number, Reading, TemporalParser,
};
use crate::calendar::{
    days_between, days_from_week_start, first_of_month, last_day_of_month, quarter_start, shift,
    shift_days, shift_months, week_start_of, Unit,
};
use crate::config::Configuration;
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

type Days = (NaiveDate, NaiveDate);

/// Emitted (start, end) readings of a date period.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DayRange {
    pub code: String,
    pub future: Days,
    pub past: Days,
}

#[derive(Debug, Clone)]
pub struct DatePeriodParser {
    config: Arc<Configuration>,
    date: DateParser,
    holiday: HolidayParser,
}

impl DatePeriodParser {
    pub fn new(config: Arc<Configuration>, date: DateParser, holiday: HolidayParser) -> Self {
        Self {
            config,
            date,
            holiday,
        }
    }

    pub(crate) fn resolve(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let out_of_range = || unresolvable(span, "out of range");
        if !span.children.is_empty() {
            return self.explicit(span, today);
        }
        if let Some(unit) = span.capture("todate") {
            return self.to_date(span, unit, today);
        }
        if let Some(decade) = span.capture("decade") {
            return self.decade(span, decade, today);
        }
        if let Some(century) = span.capture("century") {
            let n = self
                .config
                .locale()
                .numbers()
                .ordinal(century)
                .and_then(|n| i32::try_from(n).ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| unresolvable(span, "bad century"))?;
            let start = NaiveDate::from_ymd_opt((n - 1) * 100, 1, 1).ok_or_else(out_of_range)?;
            let end = shift(start, Unit::Century, 1).ok_or_else(out_of_range)?;
            return self.unit_period(span, (start, end), &timex::duration(&[(1.0, Unit::Century)]));
        }
        if span.has("season") {
            return self.season(span, today);
        }
        if span.has("quarter") {
            return self.quarter(span, today);
        }
        if span.has("ordinal") {
            return self.week_of_month(span, today);
        }
        if span.has("amount") {
            return self.next_units(span, today);
        }
        if let Some(unit) = span.capture("unit") {
            return self.swift_unit(span, unit, today);
        }
        if span.has("month") {
            return self.month(span, today);
        }
        if let Some(year) = span.capture("year") {
            let year = year_number(self.config.locale(), year)
                .ok_or_else(|| unresolvable(span, "bad year"))?;
            let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
            let end = shift(start, Unit::Year, 1).ok_or_else(out_of_range)?;
            let emitted = self.emit((start, end)).ok_or_else(out_of_range)?;
            return Ok(fixed(timex::year(year), emitted));
        }
        Err(unresolvable(span, "no period fields"))
    }

    /// Convert a half-open range to the configured end convention.
    fn emit(&self, (start, end): Days) -> Option<Days> {
        if self.config.options().inclusive_end {
            Some((start, shift_days(end, -1)?))
        } else {
            Some((start, end))
        }
    }

    fn unit_period(&self, span: &ExtractedSpan, range: Days, duration: &str) -> Result<DayRange> {
        let emitted = self
            .emit(range)
            .ok_or_else(|| unresolvable(span, "out of range"))?;
        Ok(fixed(range_code(emitted, duration), emitted))
    }

    /// Two resolved points, optionally sharing an anchoring period.
    fn explicit(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let (first, second, anchor) = match span.children.as_slice() {
            [first, second] => (first, second, None),
            [first, second, anchor] => (
                first,
                second,
                Some(
                    self.date
                        .anchor(anchor, today)
                        .ok_or_else(|| unresolvable(anchor, "not an anchoring period"))?,
                ),
            ),
            _ => return Err(unresolvable(span, "a range needs two endpoints")),
        };
        let point = |child: &ExtractedSpan, from: NaiveDate| -> Result<Reading<NaiveDate>> {
            match child.category {
                Category::Holiday => self.holiday.resolve(child, from),
                _ => self.date.resolve_anchored(child, from, anchor),
            }
        };
        let start = point(first, today)?;
        let end = point(second, today)?;

        // The end is the first reading of the second endpoint on or after
        // the start; failing that, the endpoint is re-read from the start.
        let close = |start: NaiveDate| -> Result<NaiveDate> {
            if let Some(end) = [end.past, end.future].into_iter().find(|e| *e >= start) {
                return Ok(end);
            }
            Some(point(second, start)?.future)
                .filter(|e| *e >= start)
                .ok_or_else(|| unresolvable(span, "range ends before it starts"))
        };
        let pair = |s: NaiveDate| -> Result<Days> {
            let e = close(s)?;
            shift_days(e, 1)
                .and_then(|after| self.emit((s, after)))
                .ok_or_else(|| unresolvable(span, "out of range"))
        };
        let future = pair(start.future)?;
        let past = pair(start.past)?;
        let code = range_code(future, &timex::days(days_between(future.0, future.1)));
        Ok(DayRange { code, future, past })
    }

    /// "this week", "next weekend", "last month", "this quarter".
    fn swift_unit(&self, span: &ExtractedSpan, unit_word: &str, today: NaiveDate) -> Result<DayRange> {
        let locale = self.config.locale();
        let out_of_range = || unresolvable(span, "out of range");
        let swift = match span.capture("swift") {
            Some(word) => locale
                .swift(word)
                .ok_or_else(|| unresolvable(span, "unknown swift"))?,
            None => 0,
        };
        let week_start = self.config.options().week_start;
        let this_week = week_start_of(today, week_start).ok_or_else(out_of_range)?;

        let Some(unit) = locale.unit(unit_word) else {
            // the one non-unit period word: the weekend of the target week
            let monday = shift_days(this_week, swift * 7 + days_from_week_start(Weekday::Mon, week_start))
                .ok_or_else(out_of_range)?;
            let saturday = shift_days(monday, 5).ok_or_else(out_of_range)?;
            let end = shift_days(saturday, 2).ok_or_else(out_of_range)?;
            let emitted = self.emit((saturday, end)).ok_or_else(out_of_range)?;
            return Ok(fixed(timex::weekend(monday), emitted));
        };

        let (year, month) = (today.year(), today.month());
        let period = |start: Option<NaiveDate>, length: Unit| -> Option<Days> {
            let start = shift(start?, length, swift)?;
            Some((start, shift(start, length, 1)?))
        };
        match unit {
            Unit::Week => {
                let range = period(Some(this_week), Unit::Week).ok_or_else(out_of_range)?;
                let monday = shift_days(range.0, days_from_week_start(Weekday::Mon, week_start))
                    .ok_or_else(out_of_range)?;
                let emitted = self.emit(range).ok_or_else(out_of_range)?;
                Ok(fixed(timex::iso_week(monday), emitted))
            }
            Unit::Month => {
                let range = period(first_of_month(year, month), Unit::Month).ok_or_else(out_of_range)?;
                let emitted = self.emit(range).ok_or_else(out_of_range)?;
                Ok(fixed(timex::month(Some(range.0.year()), range.0.month()), emitted))
            }
            Unit::Year => {
                let range = period(NaiveDate::from_ymd_opt(year, 1, 1), Unit::Year).ok_or_else(out_of_range)?;
                let emitted = self.emit(range).ok_or_else(out_of_range)?;
                Ok(fixed(timex::year(range.0.year()), emitted))
            }
            Unit::Quarter => {
                let quarter = (month - 1) / 3 + 1;
                let range = period(quarter_start(year, quarter), Unit::Quarter).ok_or_else(out_of_range)?;
                self.unit_period(span, range, &timex::duration(&[(1.0, Unit::Quarter)]))
            }
            Unit::Decade => {
                let range = period(NaiveDate::from_ymd_opt(year - year.rem_euclid(10), 1, 1), Unit::Decade)
                    .ok_or_else(out_of_range)?;
                self.unit_period(span, range, &timex::duration(&[(1.0, Unit::Decade)]))
            }
            Unit::Century => {
                let range = period(NaiveDate::from_ymd_opt(year - year.rem_euclid(100), 1, 1), Unit::Century)
                    .ok_or_else(out_of_range)?;
                self.unit_period(span, range, &timex::duration(&[(1.0, Unit::Century)]))
            }
            _ => Err(unresolvable(span, "not a calendar period")),
        }
    }

    /// "the next 3 days" starts tomorrow; "the past 3 days" ends with
    /// today excluded.
    fn next_units(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let locale = self.config.locale();
        let out_of_range = || unresolvable(span, "out of range");
        let amount = span
            .capture("amount")
            .and_then(|a| quantity(locale, a))
            .filter(|a| a.fract() == 0.0 && *a > 0.0)
            .ok_or_else(|| unresolvable(span, "bad amount"))?;
        let unit = span
            .capture("unit")
            .and_then(|u| locale.unit(u))
            .ok_or_else(|| unresolvable(span, "unknown unit"))?;
        let swift = span
            .capture("swift")
            .and_then(|s| locale.swift(s))
            .ok_or_else(|| unresolvable(span, "unknown swift"))?;

        let count = amount as i64;
        let range = if swift < 0 {
            (shift(today, unit, -count).ok_or_else(out_of_range)?, today)
        } else {
            let start = shift_days(today, 1).ok_or_else(out_of_range)?;
            (start, shift(start, unit, count).ok_or_else(out_of_range)?)
        };
        self.unit_period(span, range, &timex::duration(&[(amount, unit)]))
    }

    /// "year to date": from the start of the unit through today.
    fn to_date(&self, span: &ExtractedSpan, unit_word: &str, today: NaiveDate) -> Result<DayRange> {
        let out_of_range = || unresolvable(span, "out of range");
        let start = match self.config.locale().unit(unit_word) {
            Some(Unit::Year) => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Some(Unit::Month) => first_of_month(today.year(), today.month()),
            Some(Unit::Week) => week_start_of(today, self.config.options().week_start),
            _ => None,
        }
        .ok_or_else(out_of_range)?;
        let emitted = self
            .emit((start, shift_days(today, 1).ok_or_else(out_of_range)?))
            .ok_or_else(out_of_range)?;
        Ok(fixed(
            range_code(emitted, &timex::days(days_between(emitted.0, emitted.1))),
            emitted,
        ))
    }

    fn month(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let locale = self.config.locale();
        let out_of_range = || unresolvable(span, "out of range");
        let month = span
            .capture("month")
            .and_then(|m| month_number(locale, m))
            .ok_or_else(|| unresolvable(span, "bad month"))?;
        let in_year = |year: i32| -> Option<Days> {
            let start = first_of_month(year, month)?;
            Some((start, shift_months(start, 1)?))
        };

        let year = match (span.capture("year"), span.capture("swift")) {
            (Some(year), _) => Some(year_number(locale, year).ok_or_else(|| unresolvable(span, "bad year"))?),
            (None, Some(swift)) => {
                let swift = locale.swift(swift).ok_or_else(|| unresolvable(span, "unknown swift"))?;
                Some(today.year() + swift as i32)
            }
            (None, None) => None,
        };
        match year {
            Some(year) => {
                let emitted = self.emit(in_year(year).ok_or_else(out_of_range)?).ok_or_else(out_of_range)?;
                Ok(fixed(timex::month(Some(year), month), emitted))
            }
            None => {
                let (future, past) = self.around(today, in_year).ok_or_else(out_of_range)?;
                Ok(DayRange {
                    code: timex::month(None, month),
                    future,
                    past,
                })
            }
        }
    }

    fn quarter(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let locale = self.config.locale();
        let out_of_range = || unresolvable(span, "out of range");
        let quarter = match span.capture("quarter") {
            Some("last") => Some(4),
            Some(text) => locale
                .numbers()
                .ordinal(text)
                .or_else(|| locale.numbers().integer(text))
                .and_then(|q| u32::try_from(q).ok()),
            None => None,
        }
        .filter(|q| (1..=4).contains(q))
        .ok_or_else(|| unresolvable(span, "bad quarter"))?;
        let in_year = |year: i32| -> Option<Days> {
            let start = quarter_start(year, quarter)?;
            Some((start, shift_months(start, 3)?))
        };
        let length = timex::duration(&[(1.0, Unit::Quarter)]);

        match self.explicit_year(span, today)? {
            Some(year) => self.unit_period(span, in_year(year).ok_or_else(out_of_range)?, &length),
            None => {
                let (future, past) = self.around(today, in_year).ok_or_else(out_of_range)?;
                let placeholder = |d: NaiveDate| timex::date(None, Some(d.month()), Some(d.day()));
                let code = timex::range(&placeholder(future.0), &placeholder(future.1), &length);
                Ok(DayRange { code, future, past })
            }
        }
    }

    /// "the 3rd week of July": weeks counted from the one holding the 1st.
    fn week_of_month(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let locale = self.config.locale();
        let out_of_range = || unresolvable(span, "out of range");
        let week_start = self.config.options().week_start;
        let ordinal = match span.capture("ordinal") {
            Some("last") => -1,
            Some(text) => locale
                .numbers()
                .ordinal(text)
                .filter(|n| (1..=5).contains(n))
                .ok_or_else(|| unresolvable(span, "bad week ordinal"))?,
            None => return Err(unresolvable(span, "no week ordinal")),
        };
        let month = span
            .capture("month")
            .and_then(|m| month_number(locale, m))
            .ok_or_else(|| unresolvable(span, "bad month"))?;
        let in_year = |year: i32| -> Option<Days> {
            let start = if ordinal < 0 {
                week_start_of(last_day_of_month(year, month)?, week_start)?
            } else {
                shift_days(week_start_of(first_of_month(year, month)?, week_start)?, 7 * (ordinal - 1))?
            };
            Some((start, shift_days(start, 7)?))
        };
        let week_number = |start: NaiveDate| -> Option<u32> {
            let first_week = week_start_of(first_of_month(start.year(), month)?, week_start)?;
            u32::try_from(days_between(first_week, start) / 7 + 1).ok()
        };

        let year = span
            .capture("year")
            .map(|y| year_number(locale, y).ok_or_else(|| unresolvable(span, "bad year")))
            .transpose()?;
        let (future, past, year_code) = match year {
            Some(year) => {
                let range = in_year(year).ok_or_else(out_of_range)?;
                (range, range, Some(year))
            }
            None => {
                let (future, past) = self.around_raw(today, in_year).ok_or_else(out_of_range)?;
                (future, past, None)
            }
        };
        let week = week_number(future.0).ok_or_else(out_of_range)?;
        Ok(DayRange {
            code: timex::week_of_month(year_code, month, week),
            future: self.emit(future).ok_or_else(out_of_range)?,
            past: self.emit(past).ok_or_else(out_of_range)?,
        })
    }

    /// Meteorological seasons; winter runs from December into the next year.
    fn season(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<DayRange> {
        let out_of_range = || unresolvable(span, "out of range");
        let season = span
            .capture("season")
            .and_then(|s| self.config.locale().season(s))
            .ok_or_else(|| unresolvable(span, "unknown season"))?;
        let in_year = |year: i32| -> Option<Days> {
            let start = first_of_month(year, season.start_month())?;
            Some((start, shift_months(start, 3)?))
        };
        match self.explicit_year(span, today)? {
            Some(year) => {
                let emitted = self.emit(in_year(year).ok_or_else(out_of_range)?).ok_or_else(out_of_range)?;
                Ok(fixed(timex::season(Some(year), season.code()), emitted))
            }
            None => {
                let (future, past) = self.around(today, in_year).ok_or_else(out_of_range)?;
                Ok(DayRange {
                    code: timex::season(None, season.code()),
                    future,
                    past,
                })
            }
        }
    }

    /// "the 90s" is the most recent nineties not after the reference year.
    fn decade(&self, span: &ExtractedSpan, text: &str, today: NaiveDate) -> Result<DayRange> {
        let out_of_range = || unresolvable(span, "out of range");
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let value: i32 = digits.parse().map_err(|_| unresolvable(span, "bad decade"))?;
        let year = if digits.len() == 2 {
            if 2000 + value <= today.year() {
                2000 + value
            } else {
                1900 + value
            }
        } else {
            value
        };
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
        let end = shift(start, Unit::Decade, 1).ok_or_else(out_of_range)?;
        self.unit_period(span, (start, end), &timex::duration(&[(1.0, Unit::Decade)]))
    }

    /// A year given outright ("2018") or relative to today ("next year").
    fn explicit_year(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Option<i32>> {
        let locale = self.config.locale();
        if let Some(year) = span.capture("year") {
            return year_number(locale, year)
                .map(Some)
                .ok_or_else(|| unresolvable(span, "bad year"));
        }
        if let Some(swift) = span.capture("swift") {
            let swift = locale.swift(swift).ok_or_else(|| unresolvable(span, "unknown swift"))?;
            return Ok(Some(today.year() + swift as i32));
        }
        Ok(None)
    }

    /// Emitted future/past readings of a yearly period.
    fn around<F>(&self, today: NaiveDate, in_year: F) -> Option<(Days, Days)>
    where
        F: Fn(i32) -> Option<Days>,
    {
        let (future, past) = self.around_raw(today, in_year)?;
        Some((self.emit(future)?, self.emit(past)?))
    }

    /// The occurrence not yet over (future) and the one already begun
    /// (past); an occurrence containing today is both.
    fn around_raw<F>(&self, today: NaiveDate, in_year: F) -> Option<(Days, Days)>
    where
        F: Fn(i32) -> Option<Days>,
    {
        let year = today.year();
        let candidates: Vec<Days> = (year - 1..=year + 1).filter_map(in_year).collect();
        let future = candidates.iter().find(|(_, end)| *end > today)?;
        let past = candidates.iter().rev().find(|(start, _)| *start <= today)?;
        Some((*future, *past))
    }
}

fn fixed(code: String, days: Days) -> DayRange {
    DayRange {
        code,
        future: days,
        past: days,
    }
}

fn range_code((start, end): Days, duration: &str) -> String {
    timex::range(&timex::full_date(start), &timex::full_date(end), duration)
}

impl TemporalParser for DatePeriodParser {
    fn category(&self) -> Category {
        Category::DatePeriod
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        let range = self.resolve(span, reference.date())?;
        let value = |(start, end): Days| Resolution::DateRange { start, end };
        Ok(ResolvedValue::new(
            span,
            range.code,
            Interpretation::new(value(range.future), value(range.past)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStartDay;
    use crate::config::ResolveOptions;
    use crate::extract::Extractor;
    use crate::merge::MergedExtractor;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse_with(text: &str, config: Arc<Configuration>) -> DayRange {
        let spans = MergedExtractor::new(Arc::clone(&config)).extract(text);
        assert_eq!(spans.len(), 1, "spans of {text:?}: {spans:?}");
        assert_eq!(spans[0].category, Category::DatePeriod, "{text:?}");
        let parser = DatePeriodParser::new(
            Arc::clone(&config),
            DateParser::new(Arc::clone(&config)),
            HolidayParser::new(config),
        );
        parser.resolve(&spans[0], date(2016, 11, 7)).unwrap()
    }

    fn parse(text: &str) -> DayRange {
        parse_with(text, Configuration::english().unwrap())
    }

    fn exclusive() -> Arc<Configuration> {
        Configuration::english_with_options(ResolveOptions {
            inclusive_end: false,
            ..ResolveOptions::default()
        })
        .unwrap()
    }

    // ── Explicit range tests ──

    #[test]
    fn test_anchored_day_range_inclusive() {
        let range = parse("from the 4th to the 22nd this month");
        assert_eq!(range.code, "(2016-11-04,2016-11-22,P18D)");
        assert_eq!(range.future, (date(2016, 11, 4), date(2016, 11, 22)));
    }

    #[test]
    fn test_anchored_day_range_exclusive() {
        let range = parse_with("from the 4th to the 22nd this month", exclusive());
        assert_eq!(range.code, "(2016-11-04,2016-11-23,P19D)");
    }

    #[test]
    fn test_month_day_range() {
        let range = parse("from March 1, 2017 to March 5, 2017");
        assert_eq!(range.code, "(2017-03-01,2017-03-05,P4D)");
    }

    #[test]
    fn test_inverted_range_is_unresolvable() {
        let config = Configuration::english().unwrap();
        let spans = MergedExtractor::new(Arc::clone(&config)).extract("from 11/22/2016 to 11/04/2016");
        let parser = DatePeriodParser::new(
            Arc::clone(&config),
            DateParser::new(Arc::clone(&config)),
            HolidayParser::new(config),
        );
        assert!(parser.resolve(&spans[0], date(2016, 11, 7)).is_err());
    }

    #[test]
    fn test_weekday_range_within_the_week() {
        let range = parse("from Monday to Friday");
        assert_eq!(range.code, "(2016-11-07,2016-11-11,P4D)");
        assert_eq!(range.future, (date(2016, 11, 7), date(2016, 11, 11)));
        assert_eq!(range.past, (date(2016, 11, 7), date(2016, 11, 11)));
    }

    #[test]
    fn test_weekday_range_wraps_into_next_week() {
        let range = parse("from Friday to Monday");
        assert_eq!(range.code, "(2016-11-11,2016-11-14,P3D)");
        assert_eq!(range.past, (date(2016, 11, 4), date(2016, 11, 7)));
    }

    #[test]
    fn test_unanchored_day_range_keeps_both_readings_ordered() {
        let range = parse("from the 4th to the 22nd");
        assert_eq!(range.future, (date(2016, 12, 4), date(2016, 12, 22)));
        assert_eq!(range.past, (date(2016, 11, 4), date(2016, 11, 22)));
    }

    // ── Swift unit tests ──

    #[test]
    fn test_this_week() {
        let range = parse("this week");
        assert_eq!(range.code, "2016-W45");
        assert_eq!(range.future, (date(2016, 11, 7), date(2016, 11, 13)));
        let range = parse_with("this week", exclusive());
        assert_eq!(range.future, (date(2016, 11, 7), date(2016, 11, 14)));
    }

    #[test]
    fn test_this_week_sunday_start() {
        let config = Configuration::english_with_options(ResolveOptions {
            week_start: WeekStartDay::Sunday,
            ..ResolveOptions::default()
        })
        .unwrap();
        let range = parse_with("this week", config);
        assert_eq!(range.future, (date(2016, 11, 6), date(2016, 11, 12)));
        assert_eq!(range.code, "2016-W45");
    }

    #[test]
    fn test_weekend_and_month() {
        assert_eq!(parse("this weekend").code, "2016-W45-WE");
        assert_eq!(parse("this weekend").future, (date(2016, 11, 12), date(2016, 11, 13)));
        assert_eq!(parse("next month").code, "2016-12");
        assert_eq!(parse("last year").code, "2015");
    }

    #[test]
    fn test_quarters() {
        let range = parse("next quarter");
        assert_eq!(range.code, "(2017-01-01,2017-03-31,P3M)");
        assert_eq!(parse("Q1 2018").code, "(2018-01-01,2018-03-31,P3M)");
        assert_eq!(
            parse("the third quarter of next year").future,
            (date(2017, 7, 1), date(2017, 9, 30))
        );
    }

    #[test]
    fn test_quarter_without_year_is_ambiguous() {
        let range = parse("Q1");
        assert_eq!(range.code, "(XXXX-01-01,XXXX-03-31,P3M)");
        assert_eq!(range.future.0, date(2017, 1, 1));
        assert_eq!(range.past.0, date(2016, 1, 1));
    }

    // ── Unit count tests ──

    #[test]
    fn test_next_and_past_days() {
        let range = parse("the next 3 days");
        assert_eq!(range.code, "(2016-11-08,2016-11-10,P3D)");
        let range = parse("the past 3 days");
        assert_eq!(range.future, (date(2016, 11, 4), date(2016, 11, 6)));
    }

    #[test]
    fn test_to_date() {
        let range = parse("month to date");
        assert_eq!(range.future, (date(2016, 11, 1), date(2016, 11, 7)));
    }

    // ── Named period tests ──

    #[test]
    fn test_month_year_and_bare_month() {
        assert_eq!(parse("March 2017").code, "2017-03");
        let range = parse("in January");
        assert_eq!(range.code, "XXXX-01");
        assert_eq!(range.future.0, date(2017, 1, 1));
        assert_eq!(range.past.0, date(2016, 1, 1));
        let current = parse("November");
        assert_eq!(current.future, current.past);
    }

    #[test]
    fn test_month_of_swift_year() {
        let range = parse("March of next year");
        assert_eq!(range.code, "2017-03");
        assert_eq!(range.future, (date(2017, 3, 1), date(2017, 3, 31)));
        assert_eq!(parse("May of this year").code, "2016-05");
    }

    #[test]
    fn test_year() {
        assert_eq!(parse("in 2016").code, "2016");
    }

    #[test]
    fn test_week_of_month() {
        let range = parse("the 3rd week of July 2016");
        assert_eq!(range.code, "2016-07-W03");
        assert_eq!(range.future.0, date(2016, 7, 11));
    }

    #[test]
    fn test_seasons() {
        assert_eq!(parse("summer 2016").code, "2016-SU");
        let winter = parse("this winter");
        assert_eq!(winter.future, (date(2016, 12, 1), date(2017, 2, 28)));
    }

    #[test]
    fn test_decades_and_centuries() {
        assert_eq!(parse("the 90s").future.0, date(1990, 1, 1));
        assert_eq!(parse("the 2010s").code, "(2010-01-01,2019-12-31,P10Y)");
        assert_eq!(parse("the 21st century").future.0, date(2000, 1, 1));
    }
}
