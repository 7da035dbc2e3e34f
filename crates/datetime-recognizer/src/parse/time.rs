use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use super::{unresolvable, TemporalParser};
use crate::config::{BandKind, Configuration, Meridiem};
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

#[derive(Debug, Clone)]
pub struct TimeParser {
    config: Arc<Configuration>,
}

impl TimeParser {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    /// Normalize the span's clock fields to a 24-hour time of day.
    pub(crate) fn resolve(&self, span: &ExtractedSpan) -> Result<NaiveTime> {
        let locale = self.config.locale();

        if let Some(special) = span.capture("special") {
            return locale
                .special_time(special)
                .ok_or_else(|| unresolvable(span, "unknown special time"));
        }

        let hour_text = span
            .capture("hour")
            .ok_or_else(|| unresolvable(span, "no hour"))?;
        let mut hour = match locale.special_time(hour_text) {
            Some(t) => i64::from(t.hour()),
            None => locale
                .numbers()
                .integer(hour_text)
                .ok_or_else(|| unresolvable(span, "bad hour"))?,
        };
        let mut minute = self.field(span, "minute")?;
        let second = self.field(span, "second")?;

        if let Some(fraction) = span.capture("fraction") {
            let minutes = self
                .fraction_minutes(fraction)
                .ok_or_else(|| unresolvable(span, "bad fraction of hour"))?;
            let relation = span
                .capture("relation")
                .and_then(|r| locale.hour_relation(r))
                .ok_or_else(|| unresolvable(span, "unknown hour relation"))?;
            if relation >= 0 {
                minute = minutes;
            } else {
                hour = (hour + 23) % 24;
                minute = 60 - minutes;
            }
        }

        let meridiem = span.capture("meridiem").and_then(|m| locale.meridiem(m));
        let band = span.capture("band").and_then(|b| locale.band(b));
        hour = match (meridiem, band) {
            (Some(meridiem), _) => apply_meridiem(hour, meridiem)
                .ok_or_else(|| unresolvable(span, "hour out of range for meridiem"))?,
            (None, Some(band)) => self.apply_band(hour, band),
            (None, None) => hour,
        };

        let to_u32 = |v: i64| u32::try_from(v).ok();
        to_u32(hour)
            .zip(to_u32(minute))
            .zip(to_u32(second))
            .and_then(|((h, m), s)| NaiveTime::from_hms_opt(h, m, s))
            .ok_or_else(|| unresolvable(span, "no such time of day"))
    }

    fn field(&self, span: &ExtractedSpan, name: &str) -> Result<i64> {
        match span.capture(name) {
            Some(text) => self
                .config
                .locale()
                .numbers()
                .integer(text)
                .ok_or_else(|| unresolvable(span, "bad clock field")),
            None => Ok(0),
        }
    }

    /// "half" → 30, "ten" → 10, "20 minutes" → 20.
    fn fraction_minutes(&self, fraction: &str) -> Option<i64> {
        let locale = self.config.locale();
        if let Some(minutes) = locale.minutes_fraction(fraction) {
            return Some(i64::from(minutes));
        }
        let count = fraction
            .trim_end_matches("minutes")
            .trim_end_matches("minute")
            .trim();
        locale.numbers().integer(count).filter(|m| (1..60).contains(m))
    }

    /// Move an hour written on a 12-hour dial into the band when the
    /// afternoon reading falls inside it ("8 in the evening" → 20).
    fn apply_band(&self, hour: i64, band: BandKind) -> i64 {
        if band == BandKind::Night && hour == 12 {
            return 0;
        }
        if !(1..12).contains(&hour) {
            return hour;
        }
        let (start, end) = self.config.options().bands.range(band);
        let shifted = hour + 12;
        if shifted >= i64::from(start.hour()) && shifted <= i64::from(end.hour()) {
            shifted
        } else {
            hour
        }
    }
}

fn apply_meridiem(hour: i64, meridiem: Meridiem) -> Option<i64> {
    match (meridiem, hour) {
        (_, h) if !(0..=12).contains(&h) => None,
        (Meridiem::Am, 12) => Some(0),
        (Meridiem::Pm, h) if h < 12 => Some(h + 12),
        (_, h) => Some(h),
    }
}

impl TemporalParser for TimeParser {
    fn category(&self) -> Category {
        Category::Time
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolvedValue> {
        let time = self.resolve(span)?;
        Ok(ResolvedValue::new(
            span,
            timex::time(time),
            Interpretation::single(Resolution::Time(time)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Extractor, SpanExtractor};

    fn resolve(text: &str) -> Result<NaiveTime> {
        let config = Configuration::english().unwrap();
        let spans = SpanExtractor::new(Arc::clone(&config), Category::Time).extract(text);
        assert_eq!(spans.len(), 1, "spans of {text:?}: {spans:?}");
        TimeParser::new(config).resolve(&spans[0])
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // ── Meridiem tests ──

    #[test]
    fn test_pm_adds_twelve() {
        assert_eq!(resolve("at 4pm").unwrap(), hm(16, 0));
        assert_eq!(resolve("at 4:30 p.m.").unwrap(), hm(16, 30));
    }

    #[test]
    fn test_twelve_am_is_midnight() {
        assert_eq!(resolve("12am").unwrap(), hm(0, 0));
        assert_eq!(resolve("12pm").unwrap(), hm(12, 0));
    }

    #[test]
    fn test_hour_word_with_meridiem() {
        assert_eq!(resolve("seven pm").unwrap(), hm(19, 0));
    }

    #[test]
    fn test_meridiem_rejects_24_hour_clock() {
        assert!(resolve("16:00 pm").is_err());
    }

    // ── Band tests ──

    #[test]
    fn test_band_moves_hour() {
        assert_eq!(resolve("8 in the evening").unwrap(), hm(20, 0));
        assert_eq!(resolve("9 in the morning").unwrap(), hm(9, 0));
        assert_eq!(resolve("11 at night").unwrap(), hm(23, 0));
    }

    // ── Fraction tests ──

    #[test]
    fn test_half_past_and_quarter_to() {
        assert_eq!(resolve("half past four pm").unwrap(), hm(16, 30));
        assert_eq!(resolve("a quarter to 5").unwrap(), hm(4, 45));
        assert_eq!(resolve("ten past 3").unwrap(), hm(3, 10));
        assert_eq!(resolve("quarter to midnight").unwrap(), hm(23, 45));
    }

    // ── Plain clock tests ──

    #[test]
    fn test_clock_with_seconds() {
        assert_eq!(
            resolve("at 16:30:20").unwrap(),
            NaiveTime::from_hms_opt(16, 30, 20).unwrap()
        );
    }

    #[test]
    fn test_special_and_at_hour() {
        assert_eq!(resolve("at noon").unwrap(), hm(12, 0));
        assert_eq!(resolve("meet at 4").unwrap(), hm(4, 0));
    }

    #[test]
    fn test_invalid_clock_is_unresolvable() {
        assert!(resolve("at 27:15").is_err());
    }

    #[test]
    fn test_code_trims_precision() {
        let config = Configuration::english().unwrap();
        let spans = SpanExtractor::new(Arc::clone(&config), Category::Time).extract("at 4pm");
        let value = TimeParser::new(config)
            .parse(&spans[0], NaiveDateTime::MIN)
            .unwrap();
        assert_eq!(value.code, "T16");
    }
}
