use std::sync::Arc;

use chrono::NaiveDateTime;

use super::{quantity, unresolvable, TemporalParser};
use crate::calendar::Unit;
use crate::config::Configuration;
use crate::error::Result;
use crate::span::{Category, ExtractedSpan};
use crate::timex;
use crate::value::{Interpretation, Resolution, ResolvedValue};

#[derive(Debug, Clone)]
pub struct DurationParser {
    config: Arc<Configuration>,
}

impl DurationParser {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    /// The (magnitude, unit) components of a simple or joined duration.
    pub(crate) fn components(&self, span: &ExtractedSpan) -> Result<Vec<(f64, Unit)>> {
        if !span.children.is_empty() {
            let mut all = Vec::new();
            for child in &span.children {
                all.extend(self.components(child)?);
            }
            return Ok(all);
        }

        let locale = self.config.locale();
        let unit = span
            .capture("unit")
            .and_then(|u| locale.unit(u))
            .ok_or_else(|| unresolvable(span, "unknown unit"))?;

        let mut amount = if span.has("whole") {
            1.0
        } else {
            match span.capture("amount") {
                Some(text) => quantity(locale, text).ok_or_else(|| unresolvable(span, "bad amount"))?,
                None => 0.0,
            }
        };
        if span.has("half") {
            amount += 0.5;
        }
        if amount <= 0.0 {
            return Err(unresolvable(span, "no magnitude"));
        }
        Ok(vec![(amount, unit)])
    }
}

impl TemporalParser for DurationParser {
    fn category(&self) -> Category {
        Category::Duration
    }

    fn parse(&self, span: &ExtractedSpan, _reference: NaiveDateTime) -> Result<ResolvedValue> {
        let components = self.components(span)?;
        let seconds = components
            .iter()
            .map(|(amount, unit)| amount * unit.seconds())
            .sum();
        Ok(ResolvedValue::new(
            span,
            timex::duration(&components),
            Interpretation::single(Resolution::Duration { seconds }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Extractor, SpanExtractor};

    fn parse(text: &str) -> (String, f64) {
        let config = Configuration::english().unwrap();
        let spans = SpanExtractor::new(Arc::clone(&config), Category::Duration).extract(text);
        assert_eq!(spans.len(), 1, "spans of {text:?}: {spans:?}");
        let value = DurationParser::new(config)
            .parse(&spans[0], NaiveDateTime::MIN)
            .unwrap();
        match value.future() {
            Resolution::Duration { seconds } => (value.code.clone(), *seconds),
            other => panic!("not a duration: {other:?}"),
        }
    }

    #[test]
    fn test_days() {
        assert_eq!(parse("I leave for 3 days"), ("P3D".to_string(), 259_200.0));
    }

    #[test]
    fn test_quantifiers() {
        assert_eq!(parse("a few hours").0, "PT3H");
        assert_eq!(parse("an hour").1, 3_600.0);
        assert_eq!(parse("a couple of weeks").0, "P2W");
    }

    #[test]
    fn test_half() {
        assert_eq!(parse("2 and a half hours"), ("PT2.5H".to_string(), 9_000.0));
        assert_eq!(parse("half an hour"), ("PT0.5H".to_string(), 1_800.0));
        assert_eq!(parse("3.5 years").0, "P3.5Y");
    }

    #[test]
    fn test_whole_unit() {
        assert_eq!(parse("all day"), ("P1D".to_string(), 86_400.0));
    }

    #[test]
    fn test_joined_components() {
        assert_eq!(parse("2 hours 30 minutes"), ("PT2H30M".to_string(), 9_000.0));
        assert_eq!(parse("1 day, 2 hours and 5 minutes").0, "P1DT2H5M");
    }

    #[test]
    fn test_word_amounts() {
        assert_eq!(parse("twenty five minutes").0, "PT25M");
    }
}
