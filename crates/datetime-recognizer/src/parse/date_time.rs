use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::date::DateParser;
use super::time::TimeParser;
use super::time_period::{clock_range, TimePeriodParser};
use super::{quantity, shift_moment, unresolvable, Reading, TemporalParser};
use crate::calendar::shift_days;
use crate::config::Configuration;
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

// ── Points ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DateTimeParser {
    config: Arc<Configuration>,
    date: DateParser,
    time: TimeParser,
}

impl DateTimeParser {
    pub fn new(config: Arc<Configuration>, date: DateParser, time: TimeParser) -> Self {
        Self { config, date, time }
    }

    pub(crate) fn resolve(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Reading<NaiveDateTime>> {
        if span.has("now") {
            return Ok(Reading::fixed(timex::PRESENT_REF.to_string(), reference));
        }

        if let [date, time] = span.children.as_slice() {
            let day = self.date.resolve(date, reference.date())?;
            let clock = self.time.resolve(time)?;
            return Ok(Reading {
                code: format!("{}{}", day.code, timex::time(clock)),
                future: day.future.and_time(clock),
                past: day.past.and_time(clock),
            });
        }

        let locale = self.config.locale();
        let amount = span
            .capture("amount")
            .and_then(|a| quantity(locale, a))
            .ok_or_else(|| unresolvable(span, "bad amount"))?;
        let unit = span
            .capture("unit")
            .and_then(|u| locale.unit(u))
            .ok_or_else(|| unresolvable(span, "unknown unit"))?;
        let direction = span
            .capture("direction")
            .and_then(|d| locale.direction(d))
            .ok_or_else(|| unresolvable(span, "unknown direction"))?;
        let moment = shift_moment(reference, unit, amount * direction as f64)
            .ok_or_else(|| unresolvable(span, "out of range"))?;
        Ok(Reading::fixed(timex::full_date_time(moment), moment))
    }
}

impl TemporalParser for DateTimeParser {
    fn category(&self) -> Category {
        Category::DateTime
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        let reading = self.resolve(span, reference)?;
        Ok(ResolvedValue::new(
            span,
            reading.code,
            Interpretation::new(
                Resolution::DateTime(reading.future),
                Resolution::DateTime(reading.past),
            ),
        ))
    }
}

// ── Periods ─────────────────────────────────────────────────────────────────

type Moments = (NaiveDateTime, NaiveDateTime);

#[derive(Debug, Clone)]
pub struct DateTimePeriodParser {
    config: Arc<Configuration>,
    date: DateParser,
    time: TimeParser,
    time_period: TimePeriodParser,
    date_time: DateTimeParser,
}

impl DateTimePeriodParser {
    pub fn new(
        config: Arc<Configuration>,
        date: DateParser,
        time: TimeParser,
        time_period: TimePeriodParser,
        date_time: DateTimeParser,
    ) -> Self {
        Self {
            config,
            date,
            time,
            time_period,
            date_time,
        }
    }

    pub(crate) fn resolve(
        &self,
        span: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Reading<Moments>> {
        let locale = self.config.locale();
        let today = reference.date();

        if let Some(phrase) = span.capture("relband") {
            let (offset, band) = locale
                .relative_band(phrase)
                .ok_or_else(|| unresolvable(span, "unknown time of day"))?;
            let day = shift_days(today, offset).ok_or_else(|| unresolvable(span, "out of range"))?;
            let (start, end) = self.config.options().bands.range(band);
            let moments = clock_range(start, end).on(day).ok_or_else(|| unresolvable(span, "out of range"))?;
            return Ok(Reading::fixed(
                format!("{}{}", timex::full_date(day), band.code()),
                moments,
            ));
        }

        if span.has("unit") {
            return self.clock_units(span, reference);
        }

        match span.children.as_slice() {
            [date, period] if period.category == Category::TimePeriod => {
                let day = self.date.resolve(date, today)?;
                let range = self.time_period.resolve(period)?;
                let moments = |d: NaiveDate| range.on(d);
                let future = moments(day.future).ok_or_else(|| unresolvable(span, "out of range"))?;
                let past = moments(day.past).ok_or_else(|| unresolvable(span, "out of range"))?;
                let code = if period.has("band") {
                    format!("{}{}", day.code, range.code)
                } else {
                    moments_code(future)
                };
                Ok(Reading { code, future, past })
            }
            [first, second] => self.between(span, first, second, reference),
            _ => Err(unresolvable(span, "no period fields")),
        }
    }

    /// "the next 3 hours", "the last minute".
    fn clock_units(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<Reading<Moments>> {
        let locale = self.config.locale();
        let amount = match span.capture("amount") {
            Some(text) => quantity(locale, text).ok_or_else(|| unresolvable(span, "bad amount"))?,
            None => 1.0,
        };
        let unit = span
            .capture("unit")
            .and_then(|u| locale.unit(u))
            .ok_or_else(|| unresolvable(span, "unknown unit"))?;
        let swift = span
            .capture("swift")
            .and_then(|s| locale.swift(s))
            .ok_or_else(|| unresolvable(span, "unknown swift"))?;

        let sign = if swift < 0 { -1.0 } else { 1.0 };
        let other = shift_moment(reference, unit, sign * amount)
            .ok_or_else(|| unresolvable(span, "out of range"))?;
        let moments = if swift < 0 {
            (other, reference)
        } else {
            (reference, other)
        };
        let code = timex::range(
            &timex::full_date_time(moments.0),
            &timex::full_date_time(moments.1),
            &timex::duration(&[(amount, unit)]),
        );
        Ok(Reading::fixed(code, moments))
    }

    /// Two endpoints fused by a range connector. A bare time as the second
    /// endpoint falls on the first endpoint's day, or the day after when it
    /// would otherwise precede the start.
    fn between(
        &self,
        span: &ExtractedSpan,
        first: &ExtractedSpan,
        second: &ExtractedSpan,
        reference: NaiveDateTime,
    ) -> Result<Reading<Moments>> {
        let start = match first.category {
            Category::DateTime => self.date_time.resolve(first, reference)?,
            Category::Date => {
                let day = self.date.resolve(first, reference.date())?;
                Reading {
                    code: day.code,
                    future: day.future.and_time(NaiveTime::MIN),
                    past: day.past.and_time(NaiveTime::MIN),
                }
            }
            _ => return Err(unresolvable(first, "not a range start")),
        };
        let end = |from: NaiveDateTime| -> Result<NaiveDateTime> {
            match second.category {
                Category::Time => {
                    let clock = self.time.resolve(second)?;
                    let same_day = from.date().and_time(clock);
                    if same_day >= from {
                        Ok(same_day)
                    } else {
                        shift_days(from.date(), 1)
                            .map(|d| d.and_time(clock))
                            .ok_or_else(|| unresolvable(second, "out of range"))
                    }
                }
                Category::DateTime => {
                    // follow the start's reading so an ambiguous pair stays paired
                    let reading = self.date_time.resolve(second, reference)?;
                    Ok(if from == start.past && start.future != start.past {
                        reading.past
                    } else {
                        reading.future
                    })
                }
                _ => Err(unresolvable(second, "not a range end")),
            }
        };

        let future = (start.future, end(start.future)?);
        let past = (start.past, end(start.past)?);
        if future.1 < future.0 || past.1 < past.0 {
            return Err(unresolvable(span, "range ends before it starts"));
        }
        Ok(Reading {
            code: moments_code(future),
            future,
            past,
        })
    }
}

/// A clock range placed on `day`; one that runs past midnight ends the
/// next day.
fn moments_code((start, end): Moments) -> String {
    timex::range(
        &timex::full_date_time(start),
        &timex::full_date_time(end),
        &timex::clock_seconds((end - start).num_seconds()),
    )
}

impl TemporalParser for DateTimePeriodParser {
    fn category(&self) -> Category {
        Category::DateTimePeriod
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        let reading = self.resolve(span, reference)?;
        let value = |(start, end): Moments| Resolution::DateTimeRange { start, end };
        Ok(ResolvedValue::new(
            span,
            reading.code,
            Interpretation::new(value(reading.future), value(reading.past)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extractor;
    use crate::merge::MergedExtractor;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn reference() -> NaiveDateTime {
        at(2016, 11, 7, 0, 0)
    }

    fn single(text: &str, category: Category) -> (Arc<Configuration>, ExtractedSpan) {
        let config = Configuration::english().unwrap();
        let spans = MergedExtractor::new(Arc::clone(&config)).extract(text);
        assert_eq!(spans.len(), 1, "spans of {text:?}: {spans:?}");
        assert_eq!(spans[0].category, category, "{text:?}");
        (config, spans[0].clone())
    }

    fn point(text: &str) -> Reading<NaiveDateTime> {
        let (config, span) = single(text, Category::DateTime);
        DateTimeParser::new(
            Arc::clone(&config),
            DateParser::new(Arc::clone(&config)),
            TimeParser::new(config),
        )
        .resolve(&span, reference())
        .unwrap()
    }

    fn period(text: &str) -> Reading<Moments> {
        let (config, span) = single(text, Category::DateTimePeriod);
        let date = DateParser::new(Arc::clone(&config));
        let time = TimeParser::new(Arc::clone(&config));
        let parser = DateTimePeriodParser::new(
            Arc::clone(&config),
            date.clone(),
            time.clone(),
            TimePeriodParser::new(Arc::clone(&config), time.clone()),
            DateTimeParser::new(config, date, time),
        );
        parser.resolve(&span, reference()).unwrap()
    }

    // ── Point tests ──

    #[test]
    fn test_now() {
        let reading = point("right now");
        assert_eq!(reading.code, "PRESENT_REF");
        assert_eq!(reading.future, reference());
    }

    #[test]
    fn test_clock_offsets() {
        assert_eq!(point("in 3 hours").code, "2016-11-07T03:00:00");
        assert_eq!(point("5 minutes ago").future, at(2016, 11, 6, 23, 55));
    }

    #[test]
    fn test_date_and_time() {
        let reading = point("tomorrow at 4pm");
        assert_eq!(reading.code, "2016-11-08T16");
        assert_eq!(reading.future, at(2016, 11, 8, 16, 0));
    }

    #[test]
    fn test_ambiguous_weekday_with_time() {
        let reading = point("Friday at 9:30am");
        assert_eq!(reading.code, "XXXX-WXX-5T09:30");
        assert_eq!(reading.future, at(2016, 11, 11, 9, 30));
        assert_eq!(reading.past, at(2016, 11, 4, 9, 30));
    }

    // ── Period tests ──

    #[test]
    fn test_tonight() {
        let reading = period("tonight");
        assert_eq!(reading.code, "2016-11-07TNI");
        assert_eq!(reading.future, (at(2016, 11, 7, 20, 0), at(2016, 11, 7, 23, 59)));
    }

    #[test]
    fn test_tomorrow_morning() {
        assert_eq!(period("tomorrow morning").code, "2016-11-08TMO");
    }

    #[test]
    fn test_next_hours() {
        assert_eq!(
            period("the next 3 hours").code,
            "(2016-11-07T00:00:00,2016-11-07T03:00:00,PT3H)"
        );
        let last = period("the last 30 minutes");
        assert_eq!(last.future, (at(2016, 11, 6, 23, 30), reference()));
    }

    #[test]
    fn test_date_with_band() {
        let reading = period("Friday morning");
        assert_eq!(reading.code, "XXXX-WXX-5TMO");
        assert_eq!(reading.future.0, at(2016, 11, 11, 8, 0));
        assert_eq!(reading.past.0, at(2016, 11, 4, 8, 0));
    }

    #[test]
    fn test_date_with_hour_range() {
        let reading = period("tomorrow from 2 to 4pm");
        assert_eq!(
            reading.code,
            "(2016-11-08T14:00:00,2016-11-08T16:00:00,PT2H)"
        );
    }

    #[test]
    fn test_date_time_range_with_bare_end_time() {
        let reading = period("from tomorrow at 10pm to 2am");
        assert_eq!(reading.future, (at(2016, 11, 8, 22, 0), at(2016, 11, 9, 2, 0)));
        assert_eq!(
            reading.code,
            "(2016-11-08T22:00:00,2016-11-09T02:00:00,PT4H)"
        );
    }
}
