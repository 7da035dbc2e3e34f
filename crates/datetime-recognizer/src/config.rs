//! Per-locale configuration: compiled grammar, vocabulary and behavioural
//! flags.
//!
//! A [`Configuration`] is built once, validated eagerly and never mutated
//! afterwards, so one instance can be shared across threads behind an
//! [`Arc`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::NaiveTime;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::calendar::WeekStartDay;
use crate::error::{RecognizerError, Result};
use crate::locale::{English, Locale};
use crate::span::Category;

// ── Behavioural flags ───────────────────────────────────────────────────────

/// Field order of purely numeric dates such as `04/05/2016`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DateOrder {
    #[default]
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// Named parts of the day with a fixed canonical code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandKind {
    Morning,
    Afternoon,
    Evening,
    Night,
    Daytime,
}

impl BandKind {
    pub fn code(&self) -> &'static str {
        match self {
            BandKind::Morning => "TMO",
            BandKind::Afternoon => "TAF",
            BandKind::Evening => "TEV",
            BandKind::Night => "TNI",
            BandKind::Daytime => "TDT",
        }
    }

    /// Start of the band under the default boundaries.
    pub fn default_start(self) -> NaiveTime {
        TimeBands::default().range(self).0
    }
}

/// Hour boundaries of each time-of-day band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBands {
    pub morning: (NaiveTime, NaiveTime),
    pub afternoon: (NaiveTime, NaiveTime),
    pub evening: (NaiveTime, NaiveTime),
    pub night: (NaiveTime, NaiveTime),
    pub daytime: (NaiveTime, NaiveTime),
}

impl TimeBands {
    pub fn range(&self, kind: BandKind) -> (NaiveTime, NaiveTime) {
        match kind {
            BandKind::Morning => self.morning,
            BandKind::Afternoon => self.afternoon,
            BandKind::Evening => self.evening,
            BandKind::Night => self.night,
            BandKind::Daytime => self.daytime,
        }
    }
}

impl Default for TimeBands {
    fn default() -> Self {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self {
            morning: (hm(8, 0), hm(12, 0)),
            afternoon: (hm(12, 0), hm(16, 0)),
            evening: (hm(16, 0), hm(20, 0)),
            night: (hm(20, 0), hm(23, 59)),
            daytime: (hm(8, 0), hm(18, 0)),
        }
    }
}

/// Options that affect resolution but not extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOptions {
    /// Which day starts the week for period computations.
    pub week_start: WeekStartDay,
    pub date_order: DateOrder,
    /// Whether the emitted end of a day-granular period is its last day
    /// (`true`) or the first day after it (`false`).
    pub inclusive_end: bool,
    pub bands: TimeBands,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            week_start: WeekStartDay::Monday,
            date_order: DateOrder::MonthDayYear,
            inclusive_end: true,
            bands: TimeBands::default(),
        }
    }
}

// ── Vocabulary value types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn code(&self) -> &'static str {
        match self {
            Season::Spring => "SP",
            Season::Summer => "SU",
            Season::Fall => "FA",
            Season::Winter => "WI",
        }
    }

    /// First month of the (meteorological, northern) season.
    pub fn start_month(&self) -> u32 {
        match self {
            Season::Spring => 3,
            Season::Summer => 6,
            Season::Fall => 9,
            Season::Winter => 12,
        }
    }
}

/// How a time-zone phrase maps to an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSpec {
    /// A fixed offset in minutes ("EST" is always UTC-05:00).
    Fixed(i32),
    /// A region whose offset depends on the reference moment.
    Region(chrono_tz::Tz),
}

// ── Compiled grammar ────────────────────────────────────────────────────────

/// An uncompiled pattern as supplied by a locale.
#[derive(Debug, Clone)]
pub struct PatternSource {
    pub name: &'static str,
    pub source: String,
}

impl PatternSource {
    pub fn new(name: &'static str, source: impl Into<String>) -> Self {
        Self {
            name,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// The ordered patterns of one category; order encodes precedence.
#[derive(Debug, Clone)]
pub struct CategoryGrammar {
    pub category: Category,
    pub patterns: Vec<Pattern>,
    /// Matches lying entirely inside an exclusion match are dropped.
    pub exclusions: Vec<Regex>,
}

/// Compiled connector and modifier expressions used by the merge step.
#[derive(Debug, Clone)]
pub struct MergeRules {
    /// Categories from highest to lowest precedence.
    pub precedence: Vec<Category>,
    /// Text immediately before a range ("from ", "between ").
    pub range_prefix: Regex,
    /// The whole gap between two range endpoints ("to", "-", "and").
    pub range_connector: Regex,
    /// The whole gap between a date and a time ("", ",", "at").
    pub point_connector: Regex,
    /// The whole gap between a recurrence and its time ("at").
    pub set_connector: Regex,
    /// The whole gap between a range and the period anchoring it ("of").
    pub anchor_connector: Regex,
    /// The whole gap between two duration components (",", "and").
    pub duration_joiner: Regex,
    /// A modifier ending right before a span; group `mod` holds the word.
    pub modifier_prefix: Regex,
    /// A modifier starting right after a span; group `mod` holds the word.
    pub modifier_suffix: Regex,
}

// ── Configuration ───────────────────────────────────────────────────────────

pub struct Configuration {
    locale: Arc<dyn Locale>,
    options: ResolveOptions,
    grammars: HashMap<Category, CategoryGrammar>,
    merge: MergeRules,
}

static ENGLISH: LazyLock<Result<Arc<Configuration>>> = LazyLock::new(|| {
    Configuration::new(Arc::new(English::new()), ResolveOptions::default()).map(Arc::new)
});

impl Configuration {
    /// Compile and validate a locale's grammar.
    ///
    /// # Errors
    ///
    /// Returns [`RecognizerError::ConfigurationDefect`] if a pattern does not
    /// compile, declares a capture group outside its category's contract,
    /// a category has no patterns, or the precedence table is not a
    /// permutation of all categories.
    pub fn new(locale: Arc<dyn Locale>, options: ResolveOptions) -> Result<Self> {
        let mut grammars = HashMap::new();
        for category in Category::ALL {
            let grammar = compile_grammar(locale.as_ref(), category)?;
            tracing::trace!(
                locale = locale.name(),
                %category,
                patterns = grammar.patterns.len(),
                "compiled grammar"
            );
            grammars.insert(category, grammar);
        }
        let merge = compile_merge_rules(locale.as_ref())?;
        Ok(Self {
            locale,
            options,
            grammars,
            merge,
        })
    }

    /// The shared English configuration with default options, compiled once
    /// per process.
    pub fn english() -> Result<Arc<Self>> {
        ENGLISH.clone()
    }

    /// English grammar with custom resolution options.
    pub fn english_with_options(options: ResolveOptions) -> Result<Arc<Self>> {
        Self::new(Arc::new(English::new()), options).map(Arc::new)
    }

    pub fn locale(&self) -> &dyn Locale {
        self.locale.as_ref()
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn grammar(&self, category: Category) -> Option<&CategoryGrammar> {
        self.grammars.get(&category)
    }

    pub fn merge_rules(&self) -> &MergeRules {
        &self.merge
    }

    /// Precedence rank of a category; higher outranks lower.
    pub fn rank(&self, category: Category) -> usize {
        let order = &self.merge.precedence;
        order
            .iter()
            .position(|c| *c == category)
            .map_or(0, |index| order.len() - index)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("locale", &self.locale.name())
            .field("options", &self.options)
            .field("categories", &self.grammars.len())
            .finish()
    }
}

fn compile(source: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

fn compile_grammar(locale: &dyn Locale, category: Category) -> Result<CategoryGrammar> {
    let sources = locale.patterns(category);
    if sources.is_empty() {
        return Err(RecognizerError::ConfigurationDefect(format!(
            "locale '{}' has no {category} patterns",
            locale.name()
        )));
    }

    let contract = category.capture_contract();
    let mut patterns = Vec::with_capacity(sources.len());
    for PatternSource { name, source } in sources {
        let regex = compile(&source).map_err(|e| {
            RecognizerError::ConfigurationDefect(format!("{category} pattern '{name}': {e}"))
        })?;
        if let Some(group) = regex
            .capture_names()
            .flatten()
            .find(|group| !contract.contains(group))
        {
            return Err(RecognizerError::ConfigurationDefect(format!(
                "{category} pattern '{name}' declares capture '{group}' outside its contract"
            )));
        }
        patterns.push(Pattern { name, regex });
    }

    let exclusions = locale
        .exclusions(category)
        .iter()
        .map(|source| {
            compile(source).map_err(|e| {
                RecognizerError::ConfigurationDefect(format!("{category} exclusion: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CategoryGrammar {
        category,
        patterns,
        exclusions,
    })
}

fn compile_merge_rules(locale: &dyn Locale) -> Result<MergeRules> {
    let precedence = locale.precedence();
    let is_permutation = precedence.len() == Category::ALL.len()
        && Category::ALL.iter().all(|c| precedence.contains(c));
    if !is_permutation {
        return Err(RecognizerError::ConfigurationDefect(format!(
            "locale '{}' precedence must list every category exactly once",
            locale.name()
        )));
    }

    let rule = |label: &str, source: &str| {
        compile(source).map_err(|e| {
            RecognizerError::ConfigurationDefect(format!("merge rule '{label}': {e}"))
        })
    };
    let modifier_prefix = rule("modifier_prefix", locale.modifier_prefix())?;
    let modifier_suffix = rule("modifier_suffix", locale.modifier_suffix())?;
    for (label, regex) in [
        ("modifier_prefix", &modifier_prefix),
        ("modifier_suffix", &modifier_suffix),
    ] {
        if !regex.capture_names().flatten().any(|name| name == "mod") {
            return Err(RecognizerError::ConfigurationDefect(format!(
                "merge rule '{label}' must capture group 'mod'"
            )));
        }
    }

    Ok(MergeRules {
        precedence,
        range_prefix: rule("range_prefix", locale.range_prefix())?,
        range_connector: rule("range_connector", locale.range_connector())?,
        point_connector: rule("point_connector", locale.point_connector())?,
        set_connector: rule("set_connector", locale.set_connector())?,
        anchor_connector: rule("anchor_connector", locale.anchor_connector())?,
        duration_joiner: rule("duration_joiner", locale.duration_joiner())?,
        modifier_prefix,
        modifier_suffix,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternSource;
    use crate::locale::{
        DateVocabulary, DurationVocabulary, Grammar, HolidayVocabulary, MergeVocabulary,
        SetVocabulary, TimeVocabulary, TimeZoneVocabulary,
    };
    use crate::number::NumberRecognizer;

    /// English with one category's grammar replaced.
    struct Patched {
        inner: English,
        category: Category,
        source: &'static str,
    }

    impl Grammar for Patched {
        fn patterns(&self, category: Category) -> Vec<PatternSource> {
            if category == self.category {
                vec![PatternSource::new("patched", self.source)]
            } else {
                self.inner.patterns(category)
            }
        }
    }

    macro_rules! delegate {
        ($($trait:ident { $($method:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)* })*) => {
            $(impl $trait for Patched {
                $(fn $method(&self, $($arg: $ty),*) -> $ret { self.inner.$method($($arg),*) })*
            })*
        };
    }

    delegate! {
        DateVocabulary {
            month(word: &str) -> Option<u32>;
            weekday(word: &str) -> Option<chrono::Weekday>;
            relative_day(phrase: &str) -> Option<i64>;
            swift(word: &str) -> Option<i64>;
            direction(word: &str) -> Option<i64>;
            season(word: &str) -> Option<Season>;
        }
        TimeVocabulary {
            meridiem(word: &str) -> Option<Meridiem>;
            special_time(word: &str) -> Option<NaiveTime>;
            band(word: &str) -> Option<BandKind>;
            relative_band(phrase: &str) -> Option<(i64, BandKind)>;
            minutes_fraction(word: &str) -> Option<u32>;
            hour_relation(word: &str) -> Option<i64>;
        }
        DurationVocabulary {
            unit(word: &str) -> Option<crate::calendar::Unit>;
            quantifier(phrase: &str) -> Option<f64>;
        }
        SetVocabulary {
            frequency(word: &str) -> Option<(f64, crate::calendar::Unit)>;
            multiplier(word: &str) -> Option<f64>;
        }
        HolidayVocabulary {
            canonical_holiday(sanitized: &str) -> Option<&'static str>;
            holiday_rule(key: &str) -> Option<crate::holiday::HolidayRule>;
        }
        TimeZoneVocabulary {
            zone(phrase: &str) -> Option<ZoneSpec>;
        }
        MergeVocabulary {
            precedence() -> Vec<Category>;
            range_prefix() -> &'static str;
            range_connector() -> &'static str;
            point_connector() -> &'static str;
            set_connector() -> &'static str;
            anchor_connector() -> &'static str;
            duration_joiner() -> &'static str;
            modifier_prefix() -> &'static str;
            modifier_suffix() -> &'static str;
            modifier(word: &str) -> Option<crate::span::Modifier>;
        }
    }

    impl Locale for Patched {
        fn name(&self) -> &'static str {
            "patched"
        }

        fn numbers(&self) -> &dyn NumberRecognizer {
            self.inner.numbers()
        }
    }

    fn patched(category: Category, source: &'static str) -> Result<Configuration> {
        let locale = Patched {
            inner: English::new(),
            category,
            source,
        };
        Configuration::new(Arc::new(locale), ResolveOptions::default())
    }

    #[test]
    fn test_english_configuration_is_valid() {
        let config = Configuration::english().unwrap();
        assert_eq!(config.locale().name(), "en");
        for category in Category::ALL {
            assert!(config.grammar(category).is_some(), "{category}");
        }
    }

    #[test]
    fn test_english_configuration_is_shared() {
        let a = Configuration::english().unwrap();
        let b = Configuration::english().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_capture_outside_contract_is_a_defect() {
        let err = patched(Category::Time, r"(?P<day>\d+)pm").unwrap_err();
        assert!(matches!(err, RecognizerError::ConfigurationDefect(_)));
        assert!(err.to_string().contains("'day'"), "got: {err}");
    }

    #[test]
    fn test_invalid_regex_is_a_defect() {
        let err = patched(Category::Date, r"(?P<day>\d+").unwrap_err();
        assert!(err.to_string().contains("Configuration defect"), "got: {err}");
    }

    #[test]
    fn test_compound_categories_outrank_points() {
        let config = Configuration::english().unwrap();
        assert!(config.rank(Category::DateTimePeriod) > config.rank(Category::DateTime));
        assert!(config.rank(Category::DatePeriod) > config.rank(Category::Date));
        assert!(config.rank(Category::Set) > config.rank(Category::Date));
    }

    #[test]
    fn test_default_options() {
        let options = ResolveOptions::default();
        assert!(options.inclusive_end);
        assert_eq!(options.week_start, WeekStartDay::Monday);
        assert_eq!(options.bands.range(BandKind::Morning).0.to_string(), "08:00:00");
    }
}
