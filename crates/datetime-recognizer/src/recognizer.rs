//! The full pipeline behind one handle: merged extraction, then per-category
//! resolution against a reference moment.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::Configuration;
use crate::error::Result;
use crate::extract::Extractor;
use crate::merge::MergedExtractor;
use crate::parse::MergedParser;
use crate::span::ExtractedSpan;
use crate::value::ResolvedValue;

/// Recognizes temporal expressions for one locale configuration.
///
/// Building a recognizer wires the parser graph once; afterwards it is
/// immutable and can be shared across threads.
pub struct Recognizer {
    extractor: MergedExtractor,
    parser: MergedParser,
}

impl Recognizer {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self {
            extractor: MergedExtractor::new(Arc::clone(&config)),
            parser: MergedParser::new(config),
        }
    }

    /// A recognizer over the shared English configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecognizerError::ConfigurationDefect`] if the English
    /// grammar fails validation.
    pub fn english() -> Result<Self> {
        Ok(Self::new(Configuration::english()?))
    }

    /// Non-overlapping spans in position order. No match is an empty list.
    pub fn extract(&self, text: &str) -> Vec<ExtractedSpan> {
        self.extractor.extract(text)
    }

    /// Resolve a single span against `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecognizerError::Unresolvable`] when the span's
    /// captures do not describe a calendar value.
    pub fn parse(&self, span: &ExtractedSpan, reference: NaiveDateTime) -> Result<ResolvedValue> {
        self.parser.parse(span, reference)
    }

    /// Extract and resolve in one call. Spans that cannot be resolved are
    /// skipped.
    pub fn recognize(&self, text: &str, reference: NaiveDateTime) -> Vec<ResolvedValue> {
        let spans = self.extract(text);
        self.parser.parse_all(&spans, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Category;
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, 7)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_recognize_mixed_sentence() {
        let recognizer = Recognizer::english().unwrap();
        let values = recognizer.recognize(
            "Let's meet tomorrow at 4pm for 2 hours, then every Monday.",
            reference(),
        );
        let categories: Vec<Category> = values.iter().map(|v| v.category).collect();
        assert_eq!(
            categories,
            vec![Category::DateTime, Category::Duration, Category::Set]
        );
        assert_eq!(values[0].code, "2016-11-08T16");
    }

    #[test]
    fn test_unresolvable_span_is_skipped() {
        let recognizer = Recognizer::english().unwrap();
        let values = recognizer.recognize("on November 31 and on November 30", reference());
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].code, "XXXX-11-30");
    }

    #[test]
    fn test_parse_reports_unresolvable() {
        let recognizer = Recognizer::english().unwrap();
        let spans = recognizer.extract("February 30, 2017");
        assert_eq!(spans.len(), 1);
        assert!(recognizer.parse(&spans[0], reference()).is_err());
    }

    #[test]
    fn test_no_match_is_empty() {
        let recognizer = Recognizer::english().unwrap();
        assert!(recognizer.recognize("nothing temporal here", reference()).is_empty());
    }
}
