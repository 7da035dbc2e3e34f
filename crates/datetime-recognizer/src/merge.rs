//! Cross-category merging.
//!
//! [`MergedExtractor`] runs every category extractor over the same text and
//! reconciles the results into one non-overlapping, position-ordered list.
//! Overlaps are settled first; the surviving spans are then fused into
//! compound spans in a fixed order:
//!
//! 1. a time zone attaches to the time or date-time right before it,
//! 2. a date and a time form a date-time,
//! 3. two points joined by a range connector form a period,
//! 4. a date and a time period form a date-time period,
//! 5. a day range absorbs the month or year that anchors it,
//! 6. a recurrence absorbs its time of day or its weekday,
//! 7. modifier words ("before", "or later") attach to their neighbour.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::calendar::Unit;
use crate::config::Configuration;
use crate::extract::{Extractor, SpanExtractor};
use crate::span::{Category, ExtractedSpan};

/// Patterns whose date periods can anchor a bare day range.
const ANCHOR_PATTERNS: &[&str] = &["swift_unit", "month_year", "month_swift_year", "month", "year"];

#[derive(Debug, Clone)]
pub struct MergedExtractor {
    config: Arc<Configuration>,
    extractors: Vec<SpanExtractor>,
}

impl MergedExtractor {
    pub fn new(config: Arc<Configuration>) -> Self {
        let extractors = Category::ALL
            .iter()
            .map(|category| SpanExtractor::new(Arc::clone(&config), *category))
            .collect();
        Self { config, extractors }
    }

    /// Keep the winner of every overlapping pair.
    ///
    /// Of two spans with the same extent the higher-precedence category
    /// wins; a span containing another wins; otherwise precedence decides,
    /// then length, then position.
    fn resolve_overlaps(&self, mut candidates: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        candidates.sort_by_key(|s| (Reverse(s.length), Reverse(self.config.rank(s.category)), s.start));
        let mut kept: Vec<ExtractedSpan> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let wins = kept
                .iter()
                .filter(|k| k.overlaps(&candidate))
                .all(|k| self.beats(&candidate, k));
            if wins {
                kept.retain(|k| !k.overlaps(&candidate));
                kept.push(candidate);
            }
        }
        kept.sort_by_key(|s| s.start);
        kept
    }

    fn beats(&self, a: &ExtractedSpan, b: &ExtractedSpan) -> bool {
        let (rank_a, rank_b) = (self.config.rank(a.category), self.config.rank(b.category));
        if a.start == b.start && a.length == b.length {
            return rank_a > rank_b;
        }
        if a.contains(b) {
            return true;
        }
        if b.contains(a) {
            return false;
        }
        if rank_a != rank_b {
            return rank_a > rank_b;
        }
        if a.length != b.length {
            return a.length > b.length;
        }
        a.start < b.start
    }

    fn attach_time_zones(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        fuse_adjacent(spans, |a, b| {
            let zoned = matches!(a.category, Category::Time | Category::DateTime)
                && b.category == Category::TimeZone
                && text[a.end()..b.start].trim().is_empty();
            if !zoned {
                return None;
            }
            let mut merged = a.clone();
            merged.length = b.end() - a.start;
            merged.text = text[a.start..b.end()].to_string();
            merged.children.push(b.clone());
            Some(merged)
        })
    }

    fn fuse_date_time(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let connector = &self.config.merge_rules().point_connector;
        fuse_adjacent(spans, |a, b| {
            let (date, time) = match (a.category, b.category) {
                (Category::Date, Category::Time) => (a, b),
                (Category::Time, Category::Date) => (b, a),
                _ => return None,
            };
            connector.is_match(&text[a.end()..b.start]).then(|| {
                ExtractedSpan::compound(
                    text,
                    a.start,
                    b.end(),
                    Category::DateTime,
                    "date_and_time",
                    vec![date.clone(), time.clone()],
                )
            })
        })
    }

    fn fuse_ranges(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let rules = self.config.merge_rules();
        fuse_adjacent(spans, |a, b| {
            let (category, pattern) = range_kind(a.category, b.category)?;
            let connector = rules.range_connector.captures(&text[a.end()..b.start])?;

            let prefix = rules.range_prefix.captures(&text[..a.start]);
            let start = prefix
                .as_ref()
                .and_then(|caps| caps.name("from").or_else(|| caps.name("between")))
                .map_or(a.start, |m| m.start());
            let has_between = prefix.as_ref().is_some_and(|caps| caps.name("between").is_some());
            // "and" only joins a range opened by "between"
            if connector.name("and").is_some() && !has_between {
                return None;
            }
            Some(ExtractedSpan::compound(
                text,
                start,
                b.end(),
                category,
                pattern,
                vec![a.clone(), b.clone()],
            ))
        })
    }

    fn fuse_date_with_time_period(
        &self,
        text: &str,
        spans: Vec<ExtractedSpan>,
    ) -> Vec<ExtractedSpan> {
        let connector = &self.config.merge_rules().point_connector;
        fuse_adjacent(spans, |a, b| {
            let (date, period) = match (a.category, b.category) {
                (Category::Date, Category::TimePeriod) => (a, b),
                (Category::TimePeriod, Category::Date) => (b, a),
                _ => return None,
            };
            connector.is_match(&text[a.end()..b.start]).then(|| {
                ExtractedSpan::compound(
                    text,
                    a.start,
                    b.end(),
                    Category::DateTimePeriod,
                    "date_with_time_period",
                    vec![date.clone(), period.clone()],
                )
            })
        })
    }

    /// "from the 4th to the 22nd this month": the anchor supplies the month
    /// and year both endpoints lack. A single date can be anchored the same
    /// way ("the 4th of next month").
    fn absorb_anchors(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let connector = &self.config.merge_rules().anchor_connector;
        fuse_adjacent(spans, |a, b| {
            let is_anchor =
                b.category == Category::DatePeriod && ANCHOR_PATTERNS.contains(&b.pattern);
            if !is_anchor || !connector.is_match(&text[a.end()..b.start]) {
                return None;
            }
            let (category, pattern, mut children) = match (a.category, a.pattern) {
                (Category::DatePeriod, "date_range") => {
                    (Category::DatePeriod, "anchored_date_range", a.children.clone())
                }
                (Category::Date, _) if a.children.is_empty() && !a.has("year") => {
                    (Category::Date, "anchored_date", vec![a.clone()])
                }
                _ => return None,
            };
            children.push(b.clone());
            Some(ExtractedSpan::compound(text, a.start, b.end(), category, pattern, children))
        })
    }

    fn fuse_set_time(&self, text: &str, spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let connector = &self.config.merge_rules().set_connector;
        fuse_adjacent(spans, |a, b| {
            let (set, anchor) = match (a.category, b.category) {
                (Category::Set, _) if a.children.is_empty() && self.anchors_set(a, b) => (a, b),
                (_, Category::Set) if b.children.is_empty() && self.anchors_set(b, a) => (b, a),
                _ => return None,
            };
            connector.is_match(&text[a.end()..b.start]).then(|| {
                ExtractedSpan::compound(
                    text,
                    a.start,
                    b.end(),
                    Category::Set,
                    "set_with_time",
                    vec![set.clone(), anchor.clone()],
                )
            })
        })
    }

    /// A time of day anchors any recurrence. A bare weekday, alone or with
    /// its time, anchors a week-based recurrence not already on a weekday.
    fn anchors_set(&self, set: &ExtractedSpan, anchor: &ExtractedSpan) -> bool {
        let weekday = |s: &ExtractedSpan| s.category == Category::Date && s.pattern == "weekday";
        match anchor.category {
            Category::Time | Category::TimePeriod => true,
            Category::Date => weekday(anchor) && self.weekly(set),
            Category::DateTime => match anchor.children.as_slice() {
                [day, time] => weekday(day) && time.category == Category::Time && self.weekly(set),
                _ => false,
            },
            _ => false,
        }
    }

    fn weekly(&self, set: &ExtractedSpan) -> bool {
        let locale = self.config.locale();
        let unit = match (set.capture("unit"), set.capture("frequency")) {
            (Some(unit), _) => locale.unit(unit),
            (None, Some(word)) => locale.frequency(word).map(|(_, unit)| unit),
            (None, None) => None,
        };
        !set.has("weekday") && unit == Some(Unit::Week)
    }

    fn absorb_modifiers(&self, text: &str, mut spans: Vec<ExtractedSpan>) -> Vec<ExtractedSpan> {
        let rules = self.config.merge_rules();
        let locale = self.config.locale();
        for i in 0..spans.len() {
            let floor = if i == 0 { 0 } else { spans[i - 1].end() };
            let ceiling = spans.get(i + 1).map_or(text.len(), |next| next.start);
            let span = &mut spans[i];

            if let Some(m) = rules
                .modifier_prefix
                .captures(&text[floor..span.start])
                .and_then(|caps| caps.name("mod"))
            {
                if let Some(modifier) = locale.modifier(&normalize_word(m.as_str())) {
                    let start = floor + m.start();
                    span.length += span.start - start;
                    span.start = start;
                    span.modifier = Some(modifier);
                }
            } else if let Some(m) = rules
                .modifier_suffix
                .captures(&text[span.end()..ceiling])
                .and_then(|caps| caps.name("mod"))
            {
                if let Some(modifier) = locale.modifier(&normalize_word(m.as_str())) {
                    span.length += m.end();
                    span.modifier = Some(modifier);
                }
            }
            span.text = text[span.start..span.end()].to_string();
        }
        spans
    }
}

impl Extractor for MergedExtractor {
    fn extract(&self, text: &str) -> Vec<ExtractedSpan> {
        let candidates: Vec<ExtractedSpan> = self
            .extractors
            .iter()
            .flat_map(|extractor| extractor.extract(text))
            .collect();
        let candidate_count = candidates.len();

        let spans = self.resolve_overlaps(candidates);
        let spans = self.attach_time_zones(text, spans);
        let spans = self.fuse_date_time(text, spans);
        let spans = self.fuse_ranges(text, spans);
        let spans = self.fuse_date_with_time_period(text, spans);
        let spans = self.absorb_anchors(text, spans);
        let spans = self.fuse_set_time(text, spans);
        let spans = self.absorb_modifiers(text, spans);

        tracing::debug!(candidates = candidate_count, merged = spans.len(), "merged spans");
        spans
    }
}

/// Walk position-ordered spans and replace each adjacent pair for which
/// `fuse` returns a compound. A fused span is not fused again in the same
/// pass.
fn fuse_adjacent<F>(spans: Vec<ExtractedSpan>, mut fuse: F) -> Vec<ExtractedSpan>
where
    F: FnMut(&ExtractedSpan, &ExtractedSpan) -> Option<ExtractedSpan>,
{
    let mut out = Vec::with_capacity(spans.len());
    let mut iter = spans.into_iter().peekable();
    while let Some(current) = iter.next() {
        let fused = iter.peek().and_then(|next| fuse(&current, next));
        match fused {
            Some(compound) => {
                iter.next();
                out.push(compound);
            }
            None => out.push(current),
        }
    }
    out
}

/// The period category two range endpoints form.
fn range_kind(a: Category, b: Category) -> Option<(Category, &'static str)> {
    use Category::{Date, DateTime, Holiday, Time};
    match (a, b) {
        (Date | Holiday, Date | Holiday) => Some((Category::DatePeriod, "date_range")),
        (Time, Time) => Some((Category::TimePeriod, "time_range")),
        (DateTime, DateTime | Time) | (Date, DateTime) => {
            Some((Category::DateTimePeriod, "date_time_range"))
        }
        _ => None,
    }
}

fn normalize_word(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Modifier;

    fn merged(text: &str) -> Vec<ExtractedSpan> {
        MergedExtractor::new(Configuration::english().unwrap()).extract(text)
    }

    fn summary(text: &str) -> Vec<(Category, String)> {
        merged(text)
            .into_iter()
            .map(|s| (s.category, s.text))
            .collect()
    }

    // ── Overlap tests ──

    #[test]
    fn test_container_wins() {
        assert_eq!(
            summary("I'll go back on October 2nd"),
            vec![(Category::Date, "October 2nd".to_string())]
        );
    }

    #[test]
    fn test_relative_date_swallows_duration() {
        assert_eq!(
            summary("see you in 3 days"),
            vec![(Category::Date, "in 3 days".to_string())]
        );
    }

    #[test]
    fn test_output_is_ordered_and_disjoint() {
        let spans = merged("call me tomorrow at 4pm, then every Monday and for 3 hours");
        for pair in spans.windows(2) {
            assert!(pair[0].end() <= pair[1].start);
        }
    }

    // ── Fusion tests ──

    #[test]
    fn test_date_and_time_fuse() {
        let spans = merged("Let's meet tomorrow at 4pm");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::DateTime);
        assert_eq!(spans[0].text, "tomorrow at 4pm");
        assert_eq!(spans[0].children[0].category, Category::Date);
        assert_eq!(spans[0].children[1].category, Category::Time);
    }

    #[test]
    fn test_anchored_day_range() {
        let spans = merged("I'll be out from the 4th to the 22nd this month");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::DatePeriod);
        assert_eq!(spans[0].text, "from the 4th to the 22nd this month");
        assert_eq!(spans[0].pattern, "anchored_date_range");
        assert_eq!(spans[0].children.len(), 3);
    }

    #[test]
    fn test_and_needs_between() {
        let spans = merged("between 4pm and 6pm");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::TimePeriod);

        let spans = merged("4pm and 6pm");
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_date_with_band() {
        let spans = merged("on Friday morning");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::DateTimePeriod);
        assert_eq!(spans[0].text, "Friday morning");
    }

    #[test]
    fn test_set_absorbs_time() {
        let spans = merged("standup every Monday at 4pm");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Set);
        assert_eq!(spans[0].text, "every Monday at 4pm");
    }

    #[test]
    fn test_weekly_set_absorbs_weekday() {
        assert_eq!(
            summary("every 2 weeks on Monday"),
            vec![(Category::Set, "every 2 weeks on Monday".to_string())]
        );
        assert_eq!(merged("every 2 weeks on Monday at 4pm").len(), 1);
    }

    #[test]
    fn test_daily_set_leaves_weekday_alone() {
        let categories: Vec<Category> = merged("every 3 days on Monday")
            .into_iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(categories, vec![Category::Set, Category::Date]);
    }

    #[test]
    fn test_time_zone_attaches_to_time() {
        let spans = merged("call at 4pm EST");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Time);
        assert_eq!(spans[0].text, "4pm EST");
        assert_eq!(spans[0].children[0].category, Category::TimeZone);
    }

    // ── Modifier tests ──

    #[test]
    fn test_prefix_modifier() {
        let spans = merged("send it no later than Friday");
        assert_eq!(spans[0].text, "no later than Friday");
        assert_eq!(spans[0].modifier, Some(Modifier::Before));
    }

    #[test]
    fn test_suffix_modifier() {
        let spans = merged("Friday or later");
        assert_eq!(spans[0].text, "Friday or later");
        assert_eq!(spans[0].modifier, Some(Modifier::After));
    }

    #[test]
    fn test_modifier_does_not_cross_spans() {
        let spans = merged("Monday before Friday");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Monday");
        assert_eq!(spans[1].text, "before Friday");
    }

    #[test]
    fn test_empty_text() {
        assert!(merged("").is_empty());
    }
}
