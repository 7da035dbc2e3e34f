use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::{
    day_number, month_number, nearest_by_month, nearest_by_year, quantity, shift_date,
    unresolvable, year_number, Reading, TemporalParser,
};
use crate::calendar::{
    days_from_week_start, find_nth_weekday_in_month, first_of_month, next_weekday_on_or_after,
    prev_weekday_on_or_before, shift_days, shift_months, week_start_of, weekday_by_swift, Unit,
};
use crate::config::Configuration;
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

/// The year (and possibly month) a period such as "this month" or
/// "March 2017" lends to day numbers that lack them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Anchor {
    pub year: i32,
    pub month: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct DateParser {
    config: Arc<Configuration>,
}

impl DateParser {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    pub(crate) fn resolve(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Reading<NaiveDate>> {
        if span.pattern == "anchored_date" {
            let [date, anchor] = span.children.as_slice() else {
                return Err(unresolvable(span, "anchored date needs a date and an anchor"));
            };
            let anchor = self
                .anchor(anchor, today)
                .ok_or_else(|| unresolvable(anchor, "not an anchoring period"))?;
            return self.resolve_anchored(date, today, Some(anchor));
        }
        self.resolve_anchored(span, today, None)
    }

    /// The anchor a month- or year-granular date period provides.
    pub(crate) fn anchor(&self, span: &ExtractedSpan, today: NaiveDate) -> Option<Anchor> {
        let locale = self.config.locale();
        let month = || month_number(locale, span.capture("month")?);
        let swift = || locale.swift(span.capture("swift")?);
        match span.pattern {
            "swift_unit" => match locale.unit(span.capture("unit")?)? {
                Unit::Month => {
                    let month = shift_months(first_of_month(today.year(), today.month())?, swift()?)?;
                    Some(Anchor {
                        year: month.year(),
                        month: Some(month.month()),
                    })
                }
                Unit::Year => Some(Anchor {
                    year: today.year() + i32::try_from(swift()?).ok()?,
                    month: None,
                }),
                _ => None,
            },
            "month_year" => Some(Anchor {
                year: year_number(locale, span.capture("year")?)?,
                month: Some(month()?),
            }),
            "month_swift_year" => Some(Anchor {
                year: today.year() + i32::try_from(swift()?).ok()?,
                month: Some(month()?),
            }),
            "month" => Some(Anchor {
                year: today.year(),
                month: Some(month()?),
            }),
            "year" => Some(Anchor {
                year: year_number(locale, span.capture("year")?)?,
                month: None,
            }),
            _ => None,
        }
    }

    pub(crate) fn resolve_anchored(
        &self,
        span: &ExtractedSpan,
        today: NaiveDate,
        anchor: Option<Anchor>,
    ) -> Result<Reading<NaiveDate>> {
        let locale = self.config.locale();

        if let Some(phrase) = span.capture("relday") {
            let offset = locale
                .relative_day(phrase)
                .ok_or_else(|| unresolvable(span, "unknown relative day"))?;
            let date = shift_days(today, offset).ok_or_else(|| unresolvable(span, "out of range"))?;
            return Ok(Reading::fixed(timex::full_date(date), date));
        }

        if let (Some(amount), Some(unit), Some(direction)) = (
            span.capture("amount"),
            span.capture("unit"),
            span.capture("direction"),
        ) {
            let amount = quantity(locale, amount).ok_or_else(|| unresolvable(span, "bad amount"))?;
            let unit = locale.unit(unit).ok_or_else(|| unresolvable(span, "unknown unit"))?;
            let sign = locale
                .direction(direction)
                .ok_or_else(|| unresolvable(span, "unknown direction"))?;
            let date = shift_date(today, unit, amount * sign as f64)
                .ok_or_else(|| unresolvable(span, "out of range"))?;
            return Ok(Reading::fixed(timex::full_date(date), date));
        }

        if span.has("ordinal") {
            return self.ordinal_weekday(span, today);
        }

        if let Some(weekday) = span.capture("weekday") {
            let weekday = locale
                .weekday(weekday)
                .ok_or_else(|| unresolvable(span, "unknown weekday"))?;
            if let Some(swift) = span.capture("weekswift") {
                let swift = locale.swift(swift).ok_or_else(|| unresolvable(span, "unknown swift"))?;
                let week_start = self.config.options().week_start;
                let date = week_start_of(today, week_start)
                    .and_then(|start| {
                        shift_days(start, swift * 7 + days_from_week_start(weekday, week_start))
                    })
                    .ok_or_else(|| unresolvable(span, "out of range"))?;
                return Ok(Reading::fixed(timex::full_date(date), date));
            }
            if let Some(swift) = span.capture("swift") {
                let swift = locale.swift(swift).ok_or_else(|| unresolvable(span, "unknown swift"))?;
                let date = weekday_by_swift(today, weekday, swift)
                    .ok_or_else(|| unresolvable(span, "out of range"))?;
                return Ok(Reading::fixed(timex::full_date(date), date));
            }
            if !span.has("day") {
                let future = next_weekday_on_or_after(today, weekday);
                let past = prev_weekday_on_or_before(today, weekday);
                let (Some(future), Some(past)) = (future, past) else {
                    return Err(unresolvable(span, "out of range"));
                };
                return Ok(Reading {
                    code: timex::weekday(weekday),
                    future,
                    past,
                });
            }
        }

        let day = match span.capture("day") {
            Some(day) => day_number(locale, day).ok_or_else(|| unresolvable(span, "bad day"))?,
            None => return Err(unresolvable(span, "no day, weekday or offset")),
        };
        let mut month = span
            .capture("month")
            .map(|m| month_number(locale, m).ok_or_else(|| unresolvable(span, "bad month")))
            .transpose()?;
        let mut year = span
            .capture("year")
            .map(|y| year_number(locale, y).ok_or_else(|| unresolvable(span, "bad year")))
            .transpose()?;
        if let Some(anchor) = anchor {
            year = year.or(Some(anchor.year));
            month = month.or(anchor.month);
        }

        match (year, month) {
            (Some(year), Some(month)) => {
                let date = NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or_else(|| unresolvable(span, "no such day"))?;
                Ok(Reading::fixed(timex::full_date(date), date))
            }
            (None, Some(month)) => {
                let (future, past) =
                    nearest_by_year(today, |y| NaiveDate::from_ymd_opt(y, month, day))
                        .ok_or_else(|| unresolvable(span, "no such day"))?;
                Ok(Reading {
                    code: timex::date(None, Some(month), Some(day)),
                    future,
                    past,
                })
            }
            (None, None) => {
                let (future, past) =
                    nearest_by_month(today, day).ok_or_else(|| unresolvable(span, "no such day"))?;
                Ok(Reading {
                    code: timex::date(None, None, Some(day)),
                    future,
                    past,
                })
            }
            (Some(_), None) => Err(unresolvable(span, "a year without a month")),
        }
    }

    /// "the first Monday of March", "the last Friday of next month".
    fn ordinal_weekday(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Reading<NaiveDate>> {
        let locale = self.config.locale();
        let ordinal = match span.capture("ordinal") {
            Some("last") => -1,
            Some(word) => locale
                .numbers()
                .ordinal(word)
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| unresolvable(span, "bad ordinal"))?,
            None => return Err(unresolvable(span, "no ordinal")),
        };
        let weekday = span
            .capture("weekday")
            .and_then(|w| locale.weekday(w))
            .ok_or_else(|| unresolvable(span, "unknown weekday"))?;

        if let Some(swift) = span.capture("swift") {
            let swift = locale.swift(swift).ok_or_else(|| unresolvable(span, "unknown swift"))?;
            let month = first_of_month(today.year(), today.month())
                .and_then(|m| shift_months(m, swift))
                .ok_or_else(|| unresolvable(span, "out of range"))?;
            let date = find_nth_weekday_in_month(month.year(), month.month(), weekday, ordinal)
                .ok_or_else(|| unresolvable(span, "no such weekday in month"))?;
            let code = timex::nth_weekday(Some(month.year()), month.month(), weekday, ordinal);
            return Ok(Reading::fixed(code, date));
        }

        let month = span
            .capture("month")
            .and_then(|m| month_number(locale, m))
            .ok_or_else(|| unresolvable(span, "bad month"))?;
        match span.capture("year") {
            Some(year) => {
                let year = year_number(locale, year).ok_or_else(|| unresolvable(span, "bad year"))?;
                let date = find_nth_weekday_in_month(year, month, weekday, ordinal)
                    .ok_or_else(|| unresolvable(span, "no such weekday in month"))?;
                Ok(Reading::fixed(
                    timex::nth_weekday(Some(year), month, weekday, ordinal),
                    date,
                ))
            }
            None => {
                let (future, past) = nearest_by_year(today, |y| {
                    find_nth_weekday_in_month(y, month, weekday, ordinal)
                })
                .ok_or_else(|| unresolvable(span, "no such weekday in month"))?;
                Ok(Reading {
                    code: timex::nth_weekday(None, month, weekday, ordinal),
                    future,
                    past,
                })
            }
        }
    }
}

impl TemporalParser for DateParser {
    fn category(&self) -> Category {
        Category::Date
    }

    fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        let reading = self.resolve(span, reference.date())?;
        Ok(ResolvedValue::new(
            span,
            reading.code,
            Interpretation::new(
                Resolution::Date(reading.future),
                Resolution::Date(reading.past),
            ),
        ))
    }
}
