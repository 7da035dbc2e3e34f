use std::sync::Arc;

use chrono::NaiveDateTime;

use super::time::TimeParser;
use super::time_period::TimePeriodParser;
use super::{quantity, unresolvable, TemporalParser};
use crate::calendar::Unit;
use crate::config::Configuration;
use crate::error::Result;
use crate::recurrence::Recurrence;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

#[derive(Debug, Clone)]
pub struct SetParser {
    config: Arc<Configuration>,
    time: TimeParser,
    time_period: TimePeriodParser,
}

impl SetParser {
    pub fn new(config: Arc<Configuration>, time: TimeParser, time_period: TimePeriodParser) -> Self {
        Self {
            config,
            time,
            time_period,
        }
    }

    pub(crate) fn resolve(&self, span: &ExtractedSpan) -> Result<Recurrence> {
        if let [set, anchor] = span.children.as_slice() {
            let rule = self.resolve(set)?;
            return self.anchored(rule, anchor);
        }

        let locale = self.config.locale();
        let multiplier = if span.has("other") {
            locale
                .multiplier("other")
                .ok_or_else(|| unresolvable(span, "unknown multiplier"))?
        } else {
            1.0
        };

        if let Some(word) = span.capture("frequency") {
            let (amount, unit) = locale
                .frequency(word)
                .ok_or_else(|| unresolvable(span, "unknown frequency"))?;
            return Ok(Recurrence {
                band: locale.band(word),
                ..Recurrence::every(amount, unit)
            });
        }
        if let Some(word) = span.capture("weekday") {
            let weekday = locale
                .weekday(word)
                .ok_or_else(|| unresolvable(span, "unknown weekday"))?;
            return Ok(Recurrence {
                weekday: Some(weekday),
                ..Recurrence::every(multiplier, Unit::Week)
            });
        }
        if let Some(word) = span.capture("band") {
            let band = locale
                .band(word)
                .ok_or_else(|| unresolvable(span, "unknown band"))?;
            return Ok(Recurrence {
                band: Some(band),
                ..Recurrence::every(1.0, Unit::Day)
            });
        }

        let unit = span
            .capture("unit")
            .and_then(|u| locale.unit(u))
            .ok_or_else(|| unresolvable(span, "unknown unit"))?;
        let amount = match span.capture("amount") {
            Some(text) => quantity(locale, text)
                .filter(|a| *a > 0.0)
                .ok_or_else(|| unresolvable(span, "bad amount"))?,
            None => 1.0,
        };
        Ok(Recurrence::every(amount * multiplier, unit))
    }

    /// Pin a rule to the time of day or weekday it was said with.
    fn anchored(&self, rule: Recurrence, anchor: &ExtractedSpan) -> Result<Recurrence> {
        let locale = self.config.locale();
        match anchor.category {
            Category::Time => Ok(Recurrence {
                time: Some(self.time.resolve(anchor)?),
                ..rule
            }),
            Category::TimePeriod => {
                if let Some(band) = anchor.capture("band").and_then(|b| locale.band(b)) {
                    Ok(Recurrence {
                        band: Some(band),
                        ..rule
                    })
                } else {
                    let range = self.time_period.resolve(anchor)?;
                    Ok(Recurrence {
                        time: Some(range.start),
                        ..rule
                    })
                }
            }
            Category::Date => {
                let weekday = anchor
                    .capture("weekday")
                    .and_then(|w| locale.weekday(w))
                    .ok_or_else(|| unresolvable(anchor, "not a weekday"))?;
                Ok(Recurrence {
                    weekday: Some(weekday),
                    ..rule
                })
            }
            Category::DateTime => match anchor.children.as_slice() {
                [day, time] => {
                    let rule = self.anchored(rule, day)?;
                    self.anchored(rule, time)
                }
                _ => Err(unresolvable(anchor, "not a weekday and time")),
            },
            _ => Err(unresolvable(anchor, "not a recurrence anchor")),
        }
    }
}

/// `XXXX-WXX-1T16` for a weekly weekday rule, `T16` or `TMO` for a daily
/// rule with a time of day, the interval (`P2W`) otherwise.
fn recurrence_code(rule: &Recurrence) -> String {
    let clock = rule
        .time
        .map(timex::time)
        .or_else(|| rule.band.map(|b| b.code().to_string()));
    match (rule.weekday, rule.unit, rule.amount == 1.0) {
        (Some(weekday), Unit::Week, true) => {
            format!("{}{}", timex::weekday(weekday), clock.unwrap_or_default())
        }
        (None, Unit::Day, true) => clock.unwrap_or_else(|| rule.interval_code()),
        _ => rule.interval_code(),
    }
}

impl TemporalParser for SetParser {
    fn category(&self) -> Category {
        Category::Set
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolvedValue> {
        let rule = self.resolve(span)?;
        Ok(ResolvedValue::new(
            span,
            recurrence_code(&rule),
            Interpretation::single(Resolution::Recurrence(rule)),
        ))
    }
}
