//! Locale capabilities.
//!
//! The pipeline is locale-independent. Everything language-specific reaches
//! it through the capability traits below, one per concern, gathered by
//! [`Locale`]. Implementations are pure data: ordered pattern sources and
//! word tables.

mod english;

use chrono::{NaiveTime, Weekday};

pub use english::English;

use crate::calendar::Unit;
use crate::config::{BandKind, Meridiem, PatternSource, Season, ZoneSpec};
use crate::holiday::HolidayRule;
use crate::number::NumberRecognizer;
use crate::span::{Category, Modifier};

/// Ordered extraction patterns per category.
pub trait Grammar {
    /// Pattern sources in precedence order. Named groups must stay within
    /// [`Category::capture_contract`].
    fn patterns(&self, category: Category) -> Vec<PatternSource>;

    /// Expressions whose matches veto any span lying inside them.
    fn exclusions(&self, _category: Category) -> Vec<String> {
        Vec::new()
    }
}

pub trait DateVocabulary {
    /// Month name → 1-12.
    fn month(&self, word: &str) -> Option<u32>;
    fn weekday(&self, word: &str) -> Option<Weekday>;
    /// "tomorrow" → +1, "the day before yesterday" → -2.
    fn relative_day(&self, phrase: &str) -> Option<i64>;
    /// "next" → +1, "last" → -1, "this" → 0.
    fn swift(&self, word: &str) -> Option<i64>;
    /// "ago" → -1, "in"/"from now" → +1.
    fn direction(&self, word: &str) -> Option<i64>;
    fn season(&self, word: &str) -> Option<Season>;
}

pub trait TimeVocabulary {
    fn meridiem(&self, word: &str) -> Option<Meridiem>;
    /// "noon" → 12:00, "midnight" → 00:00.
    fn special_time(&self, word: &str) -> Option<NaiveTime>;
    fn band(&self, word: &str) -> Option<BandKind>;
    /// "tonight" → (0, Night), "last night" → (-1, Night).
    fn relative_band(&self, phrase: &str) -> Option<(i64, BandKind)>;
    /// "half" → 30, "quarter" → 15.
    fn minutes_fraction(&self, word: &str) -> Option<u32>;
    /// "past" → +1, "to" → -1.
    fn hour_relation(&self, word: &str) -> Option<i64>;
}

pub trait DurationVocabulary {
    fn unit(&self, word: &str) -> Option<Unit>;
    /// Inexact or article quantities: "a" → 1, "a few" → 3.
    fn quantifier(&self, phrase: &str) -> Option<f64>;
}

pub trait SetVocabulary {
    /// "weekly" → (1, Week).
    fn frequency(&self, word: &str) -> Option<(f64, Unit)>;
    /// "other" → 2.
    fn multiplier(&self, word: &str) -> Option<f64>;
}

pub trait HolidayVocabulary {
    /// Fold a sanitized holiday name (see [`crate::holiday::sanitize`]) to
    /// its canonical key.
    fn canonical_holiday(&self, sanitized: &str) -> Option<&'static str>;
    fn holiday_rule(&self, key: &str) -> Option<HolidayRule>;
}

pub trait TimeZoneVocabulary {
    fn zone(&self, phrase: &str) -> Option<ZoneSpec>;
}

/// Cross-category merge data. Precedence is locale data, validated like the
/// grammar.
pub trait MergeVocabulary {
    /// Categories from highest to lowest precedence.
    fn precedence(&self) -> Vec<Category>;
    fn range_prefix(&self) -> &'static str;
    fn range_connector(&self) -> &'static str;
    fn point_connector(&self) -> &'static str;
    fn set_connector(&self) -> &'static str;
    fn anchor_connector(&self) -> &'static str;
    fn duration_joiner(&self) -> &'static str;
    fn modifier_prefix(&self) -> &'static str;
    fn modifier_suffix(&self) -> &'static str;
    fn modifier(&self, word: &str) -> Option<Modifier>;
}

pub trait Locale:
    Grammar
    + DateVocabulary
    + TimeVocabulary
    + DurationVocabulary
    + SetVocabulary
    + HolidayVocabulary
    + TimeZoneVocabulary
    + MergeVocabulary
    + Send
    + Sync
{
    fn name(&self) -> &'static str;

    fn numbers(&self) -> &dyn NumberRecognizer;
}
