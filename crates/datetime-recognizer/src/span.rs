//! Extracted spans: the unit of exchange between extractors, the merge step
//! and the parsers.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// The closed set of temporal categories a span can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Date,
    Time,
    DateTime,
    Duration,
    DatePeriod,
    TimePeriod,
    DateTimePeriod,
    Set,
    Holiday,
    TimeZone,
}

impl Category {
    /// Every category, in extraction order.
    pub const ALL: [Category; 10] = [
        Category::Date,
        Category::Time,
        Category::DateTime,
        Category::Duration,
        Category::DatePeriod,
        Category::TimePeriod,
        Category::DateTimePeriod,
        Category::Set,
        Category::Holiday,
        Category::TimeZone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Date => "date",
            Category::Time => "time",
            Category::DateTime => "datetime",
            Category::Duration => "duration",
            Category::DatePeriod => "daterange",
            Category::TimePeriod => "timerange",
            Category::DateTimePeriod => "datetimerange",
            Category::Set => "set",
            Category::Holiday => "holiday",
            Category::TimeZone => "timezone",
        }
    }

    /// Named capture groups a pattern of this category may declare.
    ///
    /// The matching parser reads exactly these names; any other group name is
    /// a configuration defect.
    pub fn capture_contract(&self) -> &'static [&'static str] {
        match self {
            Category::Date => &[
                "day",
                "month",
                "year",
                "weekday",
                "relday",
                "swift",
                "weekswift",
                "amount",
                "unit",
                "direction",
                "ordinal",
                "n1",
                "n2",
                "n3",
            ],
            Category::Time => &[
                "hour", "minute", "second", "meridiem", "band", "special", "fraction", "relation",
            ],
            Category::DateTime => &["now", "amount", "unit", "direction"],
            Category::Duration => &["amount", "unit", "half", "whole"],
            Category::DatePeriod => &[
                "swift", "unit", "amount", "month", "year", "quarter", "ordinal", "season",
                "decade", "century", "todate",
            ],
            Category::TimePeriod => &["band", "hour1", "minute1", "hour2", "minute2", "meridiem"],
            Category::DateTimePeriod => &["relband", "swift", "amount", "unit"],
            Category::Set => &["frequency", "other", "amount", "unit", "weekday", "band"],
            Category::Holiday => &["holiday", "swift", "year"],
            Category::TimeZone => &["zone", "offset"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A modifier word absorbed onto an adjacent span ("before Friday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Before,
    After,
    Since,
    Until,
    Around,
    Within,
}

/// A contiguous piece of the input recognized as one temporal category.
///
/// `start` and `length` are byte offsets into the text the span was
/// extracted from. Compound spans built by the merge step carry their
/// components in `children`; a fused range stores `[start, end]`, optionally
/// followed by the period that anchors both points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedSpan {
    pub start: usize,
    pub length: usize,
    pub category: Category,
    pub text: String,
    /// Name of the pattern or merge rule that produced the span.
    pub pattern: &'static str,
    /// Normalized (lowercased, whitespace-collapsed) named captures.
    pub captures: BTreeMap<String, String>,
    pub children: Vec<ExtractedSpan>,
    pub modifier: Option<Modifier>,
}

impl ExtractedSpan {
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.captures.contains_key(name)
    }

    pub fn overlaps(&self, other: &ExtractedSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Whether `other` lies inside this span (equal extents count).
    pub fn contains(&self, other: &ExtractedSpan) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Build a compound span covering `start..end` of `text`.
    pub(crate) fn compound(
        text: &str,
        start: usize,
        end: usize,
        category: Category,
        pattern: &'static str,
        children: Vec<ExtractedSpan>,
    ) -> Self {
        Self {
            start,
            length: end - start,
            category,
            text: text[start..end].to_string(),
            pattern,
            captures: BTreeMap::new(),
            children,
            modifier: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, length: usize) -> ExtractedSpan {
        ExtractedSpan {
            start,
            length,
            category: Category::Date,
            text: "x".repeat(length),
            pattern: "test",
            captures: BTreeMap::new(),
            children: Vec::new(),
            modifier: None,
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        assert!(span(0, 5).overlaps(&span(4, 3)));
        assert!(!span(0, 5).overlaps(&span(5, 3)));
    }

    #[test]
    fn test_contains_includes_equal_extent() {
        assert!(span(2, 6).contains(&span(2, 6)));
        assert!(span(2, 6).contains(&span(3, 2)));
        assert!(!span(2, 6).contains(&span(1, 2)));
    }

    #[test]
    fn test_every_category_has_a_contract() {
        for category in Category::ALL {
            assert!(!category.capture_contract().is_empty(), "{category}");
        }
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::DateTimePeriod).unwrap();
        assert_eq!(json, "\"date_time_period\"");
    }
}
