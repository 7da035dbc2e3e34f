//! Per-category span extraction.
//!
//! A [`SpanExtractor`] runs its category's patterns over the input in
//! order. A match is kept only if it does not overlap anything an earlier
//! match already claimed, is not a fragment of a larger number, and is not
//! vetoed by an exclusion. Captures are normalized before the span leaves
//! the extractor, so parsers only ever see lowercase, single-spaced text.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Captures;

use crate::config::{Configuration, DateOrder};
use crate::span::{Category, ExtractedSpan};

/// Anything that turns text into candidate spans.
pub trait Extractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<ExtractedSpan>;
}

#[derive(Debug, Clone)]
pub struct SpanExtractor {
    config: Arc<Configuration>,
    category: Category,
}

impl SpanExtractor {
    pub fn new(config: Arc<Configuration>, category: Category) -> Self {
        Self { config, category }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    fn span_from(&self, text: &str, pattern: &'static str, caps: &Captures<'_>) -> Option<ExtractedSpan> {
        let whole = caps.get(0)?;
        let mut captures = BTreeMap::new();
        for name in self.category.capture_contract() {
            if let Some(m) = caps.name(name) {
                let value = normalize(m.as_str());
                if !value.is_empty() {
                    captures.insert((*name).to_string(), value);
                }
            }
        }
        if self.category == Category::Date {
            assign_numeric_fields(&mut captures, self.config.options().date_order);
        }
        Some(ExtractedSpan {
            start: whole.start(),
            length: whole.len(),
            category: self.category,
            text: text[whole.range()].to_string(),
            pattern,
            captures,
            children: Vec::new(),
            modifier: None,
        })
    }

    /// Join adjacent duration spans ("3 hours and 30 minutes") into one
    /// compound span whose children are the components.
    fn join_durations(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let joiner = &self.config.merge_rules().duration_joiner;
        let mut joined: Vec<ExtractedSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            if let Some(last) = joined.last_mut() {
                if joiner.is_match(&text[last.end()..span.start]) {
                    let mut children = if last.children.is_empty() {
                        vec![last.clone()]
                    } else {
                        std::mem::take(&mut last.children)
                    };
                    let end = span.end();
                    children.push(span);
                    *last = ExtractedSpan::compound(
                        text,
                        last.start,
                        end,
                        Category::Duration,
                        "compound_duration",
                        children,
                    );
                    continue;
                }
            }
            joined.push(span);
        }
        joined
    }
}

impl Extractor for SpanExtractor {
    fn extract(&self, text: &str) -> Vec<ExtractedSpan> {
        let Some(grammar) = self.config.grammar(self.category) else {
            return Vec::new();
        };
        let excluded: Vec<(usize, usize)> = grammar
            .exclusions
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
            .collect();

        let mut spans: Vec<ExtractedSpan> = Vec::new();
        for pattern in &grammar.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                let (start, end) = (whole.start(), whole.end());
                if start == end
                    || spans.iter().any(|s| s.start < end && start < s.end())
                    || is_number_fragment(text, start, end)
                    || excluded.iter().any(|&(s, e)| s <= start && end <= e)
                {
                    continue;
                }
                if let Some(span) = self.span_from(text, pattern.name, &caps) {
                    tracing::trace!(
                        category = %self.category,
                        pattern = pattern.name,
                        start,
                        text = %span.text,
                        "matched"
                    );
                    spans.push(span);
                }
            }
        }

        spans.sort_by_key(|s| s.start);
        if self.category == Category::Duration {
            spans = self.join_durations(text, spans);
        }
        spans
    }
}

/// Lowercase and collapse runs of whitespace to one space.
fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `start..end` is a piece of a larger number such as `1.4` in
/// `11.45` or `3/4` in `3/4/5/6`.
fn is_number_fragment(text: &str, start: usize, end: usize) -> bool {
    let matched = &text[start..end];
    let separator = |c: char| matches!(c, '/' | ':' | '.' | ',');

    let starts_with_digit = matched.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit {
        let mut before = text[..start].chars().rev();
        match before.next() {
            Some(c) if c.is_ascii_digit() => return true,
            Some(c) if separator(c) && before.next().is_some_and(|d| d.is_ascii_digit()) => {
                return true
            }
            _ => {}
        }
    }

    let ends_with_digit = matched.chars().last().is_some_and(|c| c.is_ascii_digit());
    if ends_with_digit {
        let mut after = text[end..].chars();
        match after.next() {
            Some(c) if c.is_ascii_digit() => return true,
            Some(c) if separator(c) && after.next().is_some_and(|d| d.is_ascii_digit()) => {
                return true
            }
            _ => {}
        }
    }
    false
}

/// Rename the positional fields of an all-numeric date after the configured
/// field order.
fn assign_numeric_fields(captures: &mut BTreeMap<String, String>, order: DateOrder) {
    let Some(n1) = captures.remove("n1") else {
        return;
    };
    let Some(n2) = captures.remove("n2") else {
        return;
    };
    let n3 = captures.remove("n3");
    let (first, second, third) = match order {
        DateOrder::MonthDayYear => ("month", "day", "year"),
        DateOrder::DayMonthYear => ("day", "month", "year"),
        DateOrder::YearMonthDay if n3.is_some() => ("year", "month", "day"),
        DateOrder::YearMonthDay => ("month", "day", "year"),
    };
    captures.insert(first.to_string(), n1);
    captures.insert(second.to_string(), n2);
    if let Some(n3) = n3 {
        captures.insert(third.to_string(), n3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolveOptions;

    fn extract(category: Category, text: &str) -> Vec<ExtractedSpan> {
        SpanExtractor::new(Configuration::english().unwrap(), category).extract(text)
    }

    // ── Date extraction tests ──

    #[test]
    fn test_month_day_with_ordinal() {
        let spans = extract(Category::Date, "I'll go back on October 2nd");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "October 2nd");
        assert_eq!(spans[0].start, 16);
        assert_eq!(spans[0].capture("month"), Some("october"));
        assert_eq!(spans[0].capture("day"), Some("2nd"));
    }

    #[test]
    fn test_earlier_pattern_claims_text() {
        // "Friday" alone must not resurface after "next Friday" matched
        let spans = extract(Category::Date, "see you next Friday");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].pattern, "swift_weekday");
    }

    #[test]
    fn test_numeric_date_follows_date_order() {
        let spans = extract(Category::Date, "due 04/05/2016");
        assert_eq!(spans[0].capture("month"), Some("04"));
        assert_eq!(spans[0].capture("day"), Some("05"));
        assert!(!spans[0].has("n1"));

        let options = ResolveOptions {
            date_order: DateOrder::DayMonthYear,
            ..ResolveOptions::default()
        };
        let config = Configuration::english_with_options(options).unwrap();
        let spans = SpanExtractor::new(config, Category::Date).extract("due 04/05/2016");
        assert_eq!(spans[0].capture("day"), Some("04"));
        assert_eq!(spans[0].capture("month"), Some("05"));
    }

    #[test]
    fn test_exclusion_vetoes_span() {
        assert!(extract(Category::Date, "all 5 may be late").is_empty());
    }

    // ── Time extraction tests ──

    #[test]
    fn test_number_fragment_is_rejected() {
        assert!(extract(Category::Time, "version at 4.5 is out").is_empty());
        assert_eq!(extract(Category::Time, "meet at 4 then").len(), 1);
    }

    #[test]
    fn test_captures_are_normalized() {
        let spans = extract(Category::Time, "at 4  P.M.");
        assert_eq!(spans[0].capture("meridiem"), Some("p.m."));
    }

    // ── Duration extraction tests ──

    #[test]
    fn test_adjacent_durations_join() {
        let spans = extract(Category::Duration, "it took 3 hours and 30 minutes");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "3 hours and 30 minutes");
        assert_eq!(spans[0].children.len(), 2);
        assert_eq!(spans[0].pattern, "compound_duration");
    }

    #[test]
    fn test_separate_durations_stay_apart() {
        let spans = extract(Category::Duration, "3 hours, then later 2 days");
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(extract(Category::Holiday, "nothing temporal here").is_empty());
    }
}
