use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::{nearest_by_year, unresolvable, year_number, Reading, TemporalParser};
use crate::config::Configuration;
use crate::error::Result;
use crate::holiday::HolidayResolver;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

#[derive(Debug, Clone)]
pub struct HolidayParser {
    config: Arc<Configuration>,
    resolver: HolidayResolver,
}

impl HolidayParser {
    pub fn new(config: Arc<Configuration>) -> Self {
        let resolver = HolidayResolver::new(Arc::clone(&config));
        Self { config, resolver }
    }

    pub(crate) fn resolve(&self, span: &ExtractedSpan, today: NaiveDate) -> Result<Reading<NaiveDate>> {
        let locale = self.config.locale();
        let name = span
            .capture("holiday")
            .ok_or_else(|| unresolvable(span, "no holiday name"))?;
        let rule = self
            .resolver
            .rule(name)
            .ok_or_else(|| unresolvable(span, "unknown holiday"))?;

        let explicit_year = match (span.capture("year"), span.capture("swift")) {
            (Some(year), _) => {
                Some(year_number(locale, year).ok_or_else(|| unresolvable(span, "bad year"))?)
            }
            (None, Some(swift)) => {
                let swift = locale.swift(swift).ok_or_else(|| unresolvable(span, "unknown swift"))?;
                Some(today.year() + i32::try_from(swift).map_err(|_| unresolvable(span, "bad swift"))?)
            }
            (None, None) => None,
        };

        if let Some(year) = explicit_year {
            let date = rule
                .date(year)
                .ok_or_else(|| unresolvable(span, "holiday does not fall in that year"))?;
            return Ok(Reading::fixed(timex::full_date(date), date));
        }

        let (future, past) = nearest_by_year(today, |y| rule.date(y))
            .ok_or_else(|| unresolvable(span, "holiday out of range"))?;
        // Only a fixed holiday keeps its month and day from year to year.
        let code = if rule.is_fixed() {
            timex::date(None, Some(future.month()), Some(future.day()))
        } else {
            timex::full_date(future)
        };
        Ok(Reading { code, future, past })
    }
}

impl TemporalParser for HolidayParser {
    fn category(&self) -> Category {
        Category::Holiday
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
