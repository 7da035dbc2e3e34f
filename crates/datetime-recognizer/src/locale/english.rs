//! English grammar and vocabulary.

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;

use super::{
    DateVocabulary, DurationVocabulary, Grammar, HolidayVocabulary, Locale, MergeVocabulary,
    SetVocabulary, TimeVocabulary, TimeZoneVocabulary,
};
use crate::calendar::Unit;
use crate::config::{BandKind, Meridiem, PatternSource, Season, ZoneSpec};
use crate::holiday::HolidayRule;
use crate::number::{EnglishNumbers, NumberRecognizer};
use crate::span::{Category, Modifier};

// ── Pattern fragments ───────────────────────────────────────────────────────

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// Month names safe to recognize without a day or year ("may" and "march"
/// are too often verbs).
const STANDALONE_MONTHS: &str =
    "january|february|april|june|july|august|september|october|november|december";

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

const WEEKDAY_ABBREVIATIONS: &str = "mon|tues|tue|wed|thurs|thu|fri|sat|sun";

const SWIFT: &str = "next|last|this|coming|previous|past|upcoming|current|following";

const CARDINALS: &str = r"(?:twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)(?:[\s-](?:one|two|three|four|five|six|seven|eight|nine))?|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|zero|one|two|three|four|five|six|seven|eight|nine|ten";

const ORDINAL_WORDS: &str = r"(?:twenty|thirty)[\s-](?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth)|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth|thirtieth";

const HOUR_WORDS: &str = "eleven|twelve|one|two|three|four|five|six|seven|eight|nine|ten";

const MINUTE_WORDS: &str = r"twenty[\s-]five|twenty|ten|five";

const UNITS: &str = r"centuries|century|decades?|years?|yrs?|quarters?|months?|weeks?|wks?|days?|hours?|hrs?|minutes?|mins?|seconds?|secs?";

const DATE_UNITS: &str = "years?|months?|weeks?|days?";

const CLOCK_UNITS: &str = "hours?|hrs?|minutes?|mins?|seconds?|secs?";

const MERIDIEM: &str = r"a\.m\.|p\.m\.|a\.m\b|p\.m\b|am\b|pm\b";

const HOLIDAYS: &str = r"christmas\s+day|christmas\s+eve|christmas|x-?mas|new\s+year['’]?s\s+eve|new\s+year(?:['’]?s)?(?:\s+day)?|valentine['’]?s(?:\s+day)?|(?:st\.?|saint)\s+patrick['’]?s(?:\s+day)?|halloween|independence\s+day|(?:the\s+)?(?:fourth|4th)\s+of\s+july|thanksgiving(?:\s+day)?|black\s+friday|labou?r\s+day|memorial\s+day|(?:martin\s+luther\s+king(?:\s+jr\.?)?|mlk)(?:\s+day)?|mother['’]?s\s+day|father['’]?s\s+day|presidents['’]?\s+day|columbus\s+day|veterans['’]?\s+day|boxing\s+day|easter\s+sunday|easter\s+monday|easter|good\s+friday|ash\s+wednesday|palm\s+sunday|maundy\s+thursday|pentecost|whit\s+sunday|ascension(?:\s+day)?|mardi\s+gras|shrove\s+tuesday|all\s+saints['’]?\s+day|groundhog\s+day|earth\s+day|cinco\s+de\s+mayo|d[ií]a\s+de\s+(?:los\s+)?muertos|eid\s+al[\s-]fitr|eid\s+al[\s-]adha|islamic\s+new\s+year|ramadan|mawlid|ashura";

fn amount() -> String {
    format!(
        r"\d+(?:\.\d+)?|a\s+couple\s+of|a\s+couple|couple\s+of|a\s+few|few|several|{CARDINALS}|an|a"
    )
}

fn day_of_month() -> String {
    format!(r"\d{{1,2}}(?:st|nd|rd|th)?|{ORDINAL_WORDS}")
}

// ── Locale ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct English {
    numbers: EnglishNumbers,
}

impl English {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Locale for English {
    fn name(&self) -> &'static str {
        "en"
    }

    fn numbers(&self) -> &dyn NumberRecognizer {
        &self.numbers
    }
}

impl Grammar for English {
    fn patterns(&self, category: Category) -> Vec<PatternSource> {
        match category {
            Category::Date => date_patterns(),
            Category::Time => time_patterns(),
            Category::DateTime => date_time_patterns(),
            Category::Duration => duration_patterns(),
            Category::DatePeriod => date_period_patterns(),
            Category::TimePeriod => time_period_patterns(),
            Category::DateTimePeriod => date_time_period_patterns(),
            Category::Set => set_patterns(),
            Category::Holiday => vec![PatternSource::new(
                "holiday",
                format!(
                    r"\b(?:(?P<swift>next|last|this|coming|previous)\s+)?(?P<holiday>{HOLIDAYS})(?:\s+(?:of\s+)?(?P<year>\d{{4}}))?\b"
                ),
            )],
            Category::TimeZone => time_zone_patterns(),
        }
    }

    fn exclusions(&self, category: Category) -> Vec<String> {
        match category {
            Category::Date => vec![
                r"\b\d{1,2}\s+(?:may|march)\s+(?:i|we|you|he|she|it|they|be|have|not)\b"
                    .to_string(),
            ],
            Category::Duration => vec![r"\b(?:a|the)\s+second\s+(?:time|thought|place|half)\b".to_string()],
            _ => Vec::new(),
        }
    }
}

fn date_patterns() -> Vec<PatternSource> {
    let amount = amount();
    let day = day_of_month();
    vec![
        PatternSource::new(
            "iso",
            r"\b(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})\b",
        ),
        PatternSource::new(
            "iso_slash",
            r"\b(?P<year>\d{4})/(?P<month>\d{1,2})/(?P<day>\d{1,2})\b",
        ),
        PatternSource::new(
            "numeric",
            r"\b(?P<n1>\d{1,2})/(?P<n2>\d{1,2})(?:/(?P<n3>\d{4}|\d{2}))?\b",
        ),
        PatternSource::new(
            "ordinal_weekday_of_month",
            format!(
                r"\b(?:the\s+)?(?P<ordinal>first|second|third|fourth|fifth|last|1st|2nd|3rd|4th|5th)\s+(?P<weekday>{WEEKDAYS})\s+(?:of|in)\s+(?:(?P<month>{MONTHS})(?:\s+(?P<year>\d{{4}}))?|(?:the\s+)?(?P<swift>this|next|last)\s+month)\b"
            ),
        ),
        PatternSource::new(
            "month_day",
            format!(
                r"\b(?:(?:{WEEKDAYS}),?\s+)?(?P<month>{MONTHS})\.?\s+(?:the\s+)?(?P<day>{day})\b(?:,?\s+(?P<year>\d{{4}})\b)?"
            ),
        ),
        PatternSource::new(
            "day_month",
            format!(
                r"\b(?:(?:{WEEKDAYS}),?\s+)?(?:the\s+)?(?P<day>{day})\s+(?:of\s+)?(?P<month>{MONTHS})\b(?:,?\s+(?P<year>\d{{4}})\b)?"
            ),
        ),
        PatternSource::new(
            "relative_day",
            r"\b(?P<relday>(?:the\s+)?day\s+after\s+tomorrow|(?:the\s+)?day\s+before\s+yesterday|today|tomorrow|tmrw|yesterday)\b",
        ),
        PatternSource::new(
            "units_ago",
            format!(
                r"\b(?P<amount>{amount})\s+(?P<unit>{DATE_UNITS})\s+(?P<direction>ago|earlier|later|from\s+now|from\s+today|hence)\b"
            ),
        ),
        PatternSource::new(
            "in_units",
            format!(r"\b(?P<direction>in)\s+(?P<amount>{amount})\s+(?P<unit>{DATE_UNITS})\b"),
        ),
        PatternSource::new(
            "weekday_of_week",
            format!(
                r"\b(?P<weekday>{WEEKDAYS})\s+(?:of\s+)?(?P<weekswift>next|last|this)\s+week\b"
            ),
        ),
        PatternSource::new(
            "swift_weekday",
            format!(
                r"\b(?P<swift>{SWIFT})\s+(?P<weekday>{WEEKDAYS}|{WEEKDAY_ABBREVIATIONS})\b"
            ),
        ),
        PatternSource::new(
            "ordinal_day",
            r"\bthe\s+(?P<day>\d{1,2}(?:st|nd|rd|th))\b",
        ),
        PatternSource::new("weekday", format!(r"\b(?P<weekday>{WEEKDAYS})\b")),
    ]
}

fn time_patterns() -> Vec<PatternSource> {
    vec![
        PatternSource::new(
            "hour_minute",
            format!(
                r"\b(?P<hour>\d{{1,2}}):(?P<minute>\d{{2}})(?::(?P<second>\d{{2}}))?(?:\s*(?P<meridiem>{MERIDIEM}))?(?:\s+(?:in\s+the|at)\s+(?P<band>morning|afternoon|evening|night)\b)?"
            ),
        ),
        PatternSource::new(
            "fraction_of_hour",
            format!(
                r"\b(?P<fraction>half|(?:a\s+)?quarter|(?:\d{{1,2}}|{MINUTE_WORDS})\s+minutes?|{MINUTE_WORDS})\s+(?P<relation>past|after|to|till|before)\s+(?P<hour>\d{{1,2}}|{HOUR_WORDS}|noon|midnight)(?:\s*(?P<meridiem>{MERIDIEM})|\b)"
            ),
        ),
        PatternSource::new(
            "oclock",
            format!(
                r"\b(?P<hour>\d{{1,2}}|{HOUR_WORDS})\s*o['’]?\s*clock\b(?:\s*(?P<meridiem>{MERIDIEM}))?(?:\s+(?:in\s+the|at)\s+(?P<band>morning|afternoon|evening|night)\b)?"
            ),
        ),
        PatternSource::new(
            "hour_meridiem",
            format!(r"\b(?P<hour>\d{{1,2}}|{HOUR_WORDS})\s*(?P<meridiem>{MERIDIEM})"),
        ),
        PatternSource::new(
            "hour_band",
            format!(
                r"\b(?P<hour>\d{{1,2}}|{HOUR_WORDS})\s+(?:in\s+the|at)\s+(?P<band>morning|afternoon|evening|night)\b"
            ),
        ),
        PatternSource::new(
            "special",
            r"\b(?P<special>midnight|noon|midday|mid-day)\b",
        ),
        PatternSource::new("at_hour", r"\bat\s+(?P<hour>\d{1,2})\b"),
    ]
}

fn date_time_patterns() -> Vec<PatternSource> {
    let amount = amount();
    vec![
        PatternSource::new(
            "now",
            r"\b(?P<now>right\s+now|now|as\s+soon\s+as\s+possible|asap|at\s+the\s+moment|currently)\b",
        ),
        PatternSource::new(
            "clock_units_ago",
            format!(
                r"\b(?P<amount>{amount})\s+(?P<unit>{CLOCK_UNITS})\s+(?P<direction>ago|earlier|later|from\s+now|hence)\b"
            ),
        ),
        PatternSource::new(
            "in_clock_units",
            format!(r"\b(?P<direction>in)\s+(?P<amount>{amount})\s+(?P<unit>{CLOCK_UNITS})\b"),
        ),
    ]
}

fn duration_patterns() -> Vec<PatternSource> {
    let amount = amount();
    vec![
        PatternSource::new(
            "unit_and_a_half",
            format!(
                r"\b(?P<amount>{amount})\s+(?P<unit>{UNITS})\s+and\s+a\s+(?P<half>half)\b"
            ),
        ),
        PatternSource::new(
            "and_a_half_unit",
            format!(
                r"\b(?P<amount>{amount})\s+and\s+a\s+(?P<half>half)\s+(?P<unit>{UNITS})\b"
            ),
        ),
        PatternSource::new(
            "half_unit",
            format!(r"\b(?P<half>half)\s+(?:an?\s+)?(?P<unit>{UNITS})\b"),
        ),
        PatternSource::new(
            "whole_unit",
            r"\b(?P<whole>all|the\s+whole|the\s+entire|whole|entire|a\s+full|full)\s+(?P<unit>day|week|month|year)\b",
        ),
        PatternSource::new(
            "amount_unit",
            format!(r"\b(?P<amount>{amount})\s*(?P<unit>{UNITS})\b"),
        ),
    ]
}

fn date_period_patterns() -> Vec<PatternSource> {
    let amount = amount();
    vec![
        PatternSource::new(
            "quarter_code",
            r"\bq(?P<quarter>[1-4])(?:\s*(?:of\s+)?(?P<year>\d{4}))?\b",
        ),
        PatternSource::new(
            "quarter_ordinal",
            r"\b(?:the\s+)?(?P<quarter>first|second|third|fourth|last|1st|2nd|3rd|4th)\s+quarter(?:\s+(?:of\s+)?(?:(?P<year>\d{4})|(?:the\s+)?(?P<swift>this|next|last)\s+year))?\b",
        ),
        PatternSource::new(
            "week_of_month",
            format!(
                r"\b(?:the\s+)?(?P<ordinal>first|second|third|fourth|fifth|last|1st|2nd|3rd|4th|5th)\s+week\s+(?:of|in)\s+(?P<month>{MONTHS})(?:\s+(?P<year>\d{{4}}))?\b"
            ),
        ),
        PatternSource::new(
            "decade",
            r"\b(?:the\s+)?(?P<decade>(?:19|20)\d0|\d0)['’]?s\b",
        ),
        PatternSource::new(
            "century",
            r"\b(?:the\s+)?(?P<century>\d{1,2}(?:st|nd|rd|th)|twenty[\s-]first|twentieth|nineteenth|eighteenth)\s+century\b",
        ),
        PatternSource::new(
            "to_date",
            r"\b(?P<todate>year|month|week)\s+to\s+date\b",
        ),
        PatternSource::new(
            "next_units",
            format!(
                r"\b(?:the\s+)?(?P<swift>next|last|past|previous|coming|following)\s+(?P<amount>{amount})\s+(?P<unit>days|weeks|months|years)\b"
            ),
        ),
        PatternSource::new(
            "season",
            r"\b(?:(?P<swift>this|next|last)\s+)?(?P<season>spring|summer|fall|autumn|winter)(?:\s+(?:of\s+)?(?P<year>\d{4}))?\b",
        ),
        PatternSource::new(
            "month_swift_year",
            format!(r"\b(?P<month>{MONTHS})\s+(?:of\s+)?(?P<swift>this|next|last)\s+year\b"),
        ),
        PatternSource::new(
            "swift_unit",
            format!(
                r"\b(?:the\s+)?(?P<swift>{SWIFT})\s+(?P<unit>weekend|week|month|year|quarter|decade|century)\b"
            ),
        ),
        PatternSource::new("weekend", r"\b(?:the\s+)?(?P<unit>weekend)\b"),
        PatternSource::new(
            "month_year",
            format!(r"\b(?P<month>{MONTHS})\.?,?\s+(?:of\s+)?(?P<year>\d{{4}})\b"),
        ),
        PatternSource::new("month", format!(r"\b(?P<month>{STANDALONE_MONTHS})\b")),
        PatternSource::new(
            "year",
            r"\b(?:in|during|the\s+year)\s+(?P<year>(?:19|20)\d{2})\b",
        ),
    ]
}

fn time_period_patterns() -> Vec<PatternSource> {
    vec![
        PatternSource::new(
            "hour_range",
            format!(
                r"\b(?:(?:from|between)\s+)?(?P<hour1>\d{{1,2}})(?::(?P<minute1>\d{{2}}))?\s*(?:-|–|to|until|till|and)\s*(?P<hour2>\d{{1,2}})(?::(?P<minute2>\d{{2}}))?\s*(?P<meridiem>{MERIDIEM})"
            ),
        ),
        PatternSource::new(
            "band",
            r"\b(?:(?:in|during)\s+the\s+)?(?P<band>morning|afternoon|evening|daytime)\b",
        ),
        PatternSource::new("night", r"\b(?:at|during\s+the)\s+(?P<band>night)\b"),
    ]
}

fn date_time_period_patterns() -> Vec<PatternSource> {
    let amount = amount();
    vec![
        PatternSource::new(
            "relative_band",
            r"\b(?P<relband>tonight|last\s+night|this\s+(?:morning|afternoon|evening)|tomorrow\s+(?:morning|afternoon|evening|night)|yesterday\s+(?:morning|afternoon|evening))\b",
        ),
        PatternSource::new(
            "next_clock_units",
            format!(
                r"\b(?:the\s+)?(?P<swift>next|last|past|previous|coming)\s+(?:(?P<amount>{amount})\s+)?(?P<unit>hours?|minutes?|seconds?)\b"
            ),
        ),
    ]
}

fn set_patterns() -> Vec<PatternSource> {
    vec![
        PatternSource::new(
            "every_weekday",
            format!(r"\b(?:every|each)\s+(?P<other>other\s+)?(?P<weekday>{WEEKDAYS})\b"),
        ),
        PatternSource::new(
            "weekday_plural",
            format!(r"\b(?P<weekday>{WEEKDAYS})s\b"),
        ),
        PatternSource::new(
            "every_band",
            r"\b(?:every|each)\s+(?P<band>morning|afternoon|evening|night)\b",
        ),
        PatternSource::new(
            "every_unit",
            format!(
                r"\b(?:every|each)\s+(?P<other>other\s+)?(?:(?P<amount>\d+|{CARDINALS})\s+)?(?P<unit>{UNITS})\b"
            ),
        ),
        PatternSource::new(
            "frequency",
            r"\b(?P<frequency>daily|weekly|monthly|yearly|annually|hourly|nightly|biweekly|fortnightly|quarterly)\b",
        ),
    ]
}

fn time_zone_patterns() -> Vec<PatternSource> {
    vec![
        PatternSource::new(
            "utc_offset",
            r"\b(?P<zone>utc|gmt)\s*(?P<offset>[+-]\s*\d{1,2}(?::?\d{2})?)",
        ),
        PatternSource::new(
            "region",
            r"\b(?P<zone>(?:pacific|eastern|central|mountain|alaska|hawaii|atlantic)(?:\s+(?:standard|daylight))?\s+time|(?:london|paris|berlin|tokyo|new\s+york|beijing|sydney)\s+time)\b",
        ),
        PatternSource::new(
            "abbreviation",
            r"\b(?-i:(?P<zone>UTC|GMT|EST|EDT|CST|CDT|MST|MDT|PST|PDT|AKST|AKDT|HST|CET|CEST|BST|IST|JST|AEST|AEDT))\b",
        ),
    ]
}

// ── Vocabulary ──────────────────────────────────────────────────────────────

impl DateVocabulary for English {
    fn month(&self, word: &str) -> Option<u32> {
        match word.trim_end_matches('.') {
            "january" | "jan" => Some(1),
            "february" | "feb" => Some(2),
            "march" | "mar" => Some(3),
            "april" | "apr" => Some(4),
            "may" => Some(5),
            "june" | "jun" => Some(6),
            "july" | "jul" => Some(7),
            "august" | "aug" => Some(8),
            "september" | "sep" | "sept" => Some(9),
            "october" | "oct" => Some(10),
            "november" | "nov" => Some(11),
            "december" | "dec" => Some(12),
            _ => None,
        }
    }

    fn weekday(&self, word: &str) -> Option<Weekday> {
        match word {
            "monday" | "mon" => Some(Weekday::Mon),
            "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
            "wednesday" | "wed" => Some(Weekday::Wed),
            "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
            "friday" | "fri" => Some(Weekday::Fri),
            "saturday" | "sat" => Some(Weekday::Sat),
            "sunday" | "sun" => Some(Weekday::Sun),
            _ => None,
        }
    }

    fn relative_day(&self, phrase: &str) -> Option<i64> {
        match phrase.strip_prefix("the ").unwrap_or(phrase) {
            "today" => Some(0),
            "tomorrow" | "tmrw" => Some(1),
            "yesterday" => Some(-1),
            "day after tomorrow" => Some(2),
            "day before yesterday" => Some(-2),
            _ => None,
        }
    }

    fn swift(&self, word: &str) -> Option<i64> {
        match word {
            "next" | "coming" | "upcoming" | "following" => Some(1),
            "last" | "previous" | "past" => Some(-1),
            "this" | "current" => Some(0),
            _ => None,
        }
    }

    fn direction(&self, word: &str) -> Option<i64> {
        match word {
            "ago" | "earlier" => Some(-1),
            "in" | "later" | "from now" | "from today" | "hence" => Some(1),
            _ => None,
        }
    }

    fn season(&self, word: &str) -> Option<Season> {
        match word {
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }
}

impl TimeVocabulary for English {
    fn meridiem(&self, word: &str) -> Option<Meridiem> {
        match word.replace('.', "").as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    fn special_time(&self, word: &str) -> Option<NaiveTime> {
        match word {
            "midnight" => NaiveTime::from_hms_opt(0, 0, 0),
            "noon" | "midday" | "mid-day" => NaiveTime::from_hms_opt(12, 0, 0),
            _ => None,
        }
    }

    fn band(&self, word: &str) -> Option<BandKind> {
        match word {
            "morning" => Some(BandKind::Morning),
            "afternoon" => Some(BandKind::Afternoon),
            "evening" => Some(BandKind::Evening),
            "night" | "nightly" => Some(BandKind::Night),
            "daytime" => Some(BandKind::Daytime),
            _ => None,
        }
    }

    fn relative_band(&self, phrase: &str) -> Option<(i64, BandKind)> {
        if phrase == "tonight" {
            return Some((0, BandKind::Night));
        }
        let (day, band) = phrase.split_once(' ')?;
        let offset = match day {
            "this" => 0,
            "tomorrow" => 1,
            "yesterday" | "last" => -1,
            _ => return None,
        };
        Some((offset, self.band(band)?))
    }

    fn minutes_fraction(&self, word: &str) -> Option<u32> {
        match word {
            "half" => Some(30),
            "quarter" | "a quarter" => Some(15),
            _ => None,
        }
    }

    fn hour_relation(&self, word: &str) -> Option<i64> {
        match word {
            "past" | "after" => Some(1),
            "to" | "till" | "before" => Some(-1),
            _ => None,
        }
    }
}

impl DurationVocabulary for English {
    fn unit(&self, word: &str) -> Option<Unit> {
        match word {
            "second" | "seconds" | "sec" | "secs" => Some(Unit::Second),
            "minute" | "minutes" | "min" | "mins" => Some(Unit::Minute),
            "hour" | "hours" | "hr" | "hrs" => Some(Unit::Hour),
            "day" | "days" => Some(Unit::Day),
            "week" | "weeks" | "wk" | "wks" => Some(Unit::Week),
            "month" | "months" => Some(Unit::Month),
            "quarter" | "quarters" => Some(Unit::Quarter),
            "year" | "years" | "yr" | "yrs" => Some(Unit::Year),
            "decade" | "decades" => Some(Unit::Decade),
            "century" | "centuries" => Some(Unit::Century),
            _ => None,
        }
    }

    fn quantifier(&self, phrase: &str) -> Option<f64> {
        match phrase {
            "a" | "an" => Some(1.0),
            "a couple" | "a couple of" | "couple of" => Some(2.0),
            "a few" | "few" | "several" => Some(3.0),
            _ => None,
        }
    }
}

impl SetVocabulary for English {
    fn frequency(&self, word: &str) -> Option<(f64, Unit)> {
        match word {
            "hourly" => Some((1.0, Unit::Hour)),
            "daily" | "nightly" => Some((1.0, Unit::Day)),
            "weekly" => Some((1.0, Unit::Week)),
            "biweekly" | "fortnightly" => Some((2.0, Unit::Week)),
            "monthly" => Some((1.0, Unit::Month)),
            "quarterly" => Some((1.0, Unit::Quarter)),
            "yearly" | "annually" => Some((1.0, Unit::Year)),
            _ => None,
        }
    }

    fn multiplier(&self, word: &str) -> Option<f64> {
        match word {
            "other" => Some(2.0),
            _ => None,
        }
    }
}

impl HolidayVocabulary for English {
    fn canonical_holiday(&self, sanitized: &str) -> Option<&'static str> {
        let sanitized = sanitized.strip_prefix("the").unwrap_or(sanitized);
        let key = match sanitized {
            "christmas" | "christmasday" | "xmas" => "christmas",
            "christmaseve" => "christmas_eve",
            "newyearseve" => "new_years_eve",
            "newyear" | "newyears" | "newyearsday" => "new_year",
            "valentines" | "valentinesday" => "valentines_day",
            "stpatricks" | "stpatricksday" | "saintpatricks" | "saintpatricksday" => {
                "st_patricks_day"
            }
            "halloween" => "halloween",
            "independenceday" | "fourthofjuly" | "4thofjuly" => "independence_day",
            "thanksgiving" | "thanksgivingday" => "thanksgiving",
            "blackfriday" => "black_friday",
            "laborday" | "labourday" => "labor_day",
            "memorialday" => "memorial_day",
            "martinlutherking" | "martinlutherkingday" | "martinlutherkingjr"
            | "martinlutherkingjrday" | "mlk" | "mlkday" => "mlk_day",
            "mothersday" => "mothers_day",
            "fathersday" => "fathers_day",
            "presidentsday" => "presidents_day",
            "columbusday" => "columbus_day",
            "veteransday" => "veterans_day",
            "boxingday" => "boxing_day",
            "easter" | "eastersunday" => "easter",
            "eastermonday" => "easter_monday",
            "goodfriday" => "good_friday",
            "ashwednesday" => "ash_wednesday",
            "palmsunday" => "palm_sunday",
            "maundythursday" => "maundy_thursday",
            "pentecost" | "whitsunday" => "pentecost",
            "ascension" | "ascensionday" => "ascension",
            "mardigras" | "shrovetuesday" => "mardi_gras",
            "allsaintsday" => "all_saints_day",
            "groundhogday" => "groundhog_day",
            "earthday" => "earth_day",
            "cincodemayo" => "cinco_de_mayo",
            "diadelosmuertos" | "diademuertos" => "day_of_the_dead",
            "eidalfitr" => "eid_al_fitr",
            "eidaladha" => "eid_al_adha",
            "islamicnewyear" => "islamic_new_year",
            "ramadan" => "ramadan",
            "mawlid" => "mawlid",
            "ashura" => "ashura",
            _ => return None,
        };
        Some(key)
    }

    fn holiday_rule(&self, key: &str) -> Option<HolidayRule> {
        use HolidayRule::{Easter, Fixed, Hijri, NthWeekday};

        let nth = |month, weekday, ordinal| NthWeekday {
            month,
            weekday,
            ordinal,
            offset: 0,
        };
        let rule = match key {
            "christmas" => Fixed { month: 12, day: 25 },
            "christmas_eve" => Fixed { month: 12, day: 24 },
            "new_years_eve" => Fixed { month: 12, day: 31 },
            "new_year" => Fixed { month: 1, day: 1 },
            "valentines_day" => Fixed { month: 2, day: 14 },
            "st_patricks_day" => Fixed { month: 3, day: 17 },
            "halloween" => Fixed { month: 10, day: 31 },
            "independence_day" => Fixed { month: 7, day: 4 },
            "veterans_day" => Fixed { month: 11, day: 11 },
            "boxing_day" => Fixed { month: 12, day: 26 },
            "all_saints_day" => Fixed { month: 11, day: 1 },
            "groundhog_day" => Fixed { month: 2, day: 2 },
            "earth_day" => Fixed { month: 4, day: 22 },
            "cinco_de_mayo" => Fixed { month: 5, day: 5 },
            "day_of_the_dead" => Fixed { month: 11, day: 2 },
            "thanksgiving" => nth(11, Weekday::Thu, 4),
            "black_friday" => NthWeekday {
                month: 11,
                weekday: Weekday::Thu,
                ordinal: 4,
                offset: 1,
            },
            "labor_day" => nth(9, Weekday::Mon, 1),
            "memorial_day" => nth(5, Weekday::Mon, -1),
            "mlk_day" => nth(1, Weekday::Mon, 3),
            "mothers_day" => nth(5, Weekday::Sun, 2),
            "fathers_day" => nth(6, Weekday::Sun, 3),
            "presidents_day" => nth(2, Weekday::Mon, 3),
            "columbus_day" => nth(10, Weekday::Mon, 2),
            "easter" => Easter { offset: 0 },
            "easter_monday" => Easter { offset: 1 },
            "good_friday" => Easter { offset: -2 },
            "maundy_thursday" => Easter { offset: -3 },
            "palm_sunday" => Easter { offset: -7 },
            "ash_wednesday" => Easter { offset: -46 },
            "mardi_gras" => Easter { offset: -47 },
            "ascension" => Easter { offset: 39 },
            "pentecost" => Easter { offset: 49 },
            "eid_al_fitr" => Hijri { month: 10, day: 1 },
            "eid_al_adha" => Hijri { month: 12, day: 10 },
            "islamic_new_year" => Hijri { month: 1, day: 1 },
            "ashura" => Hijri { month: 1, day: 10 },
            "mawlid" => Hijri { month: 3, day: 12 },
            "ramadan" => Hijri { month: 9, day: 1 },
            _ => return None,
        };
        Some(rule)
    }
}

impl TimeZoneVocabulary for English {
    fn zone(&self, phrase: &str) -> Option<ZoneSpec> {
        let fixed = |minutes| Some(ZoneSpec::Fixed(minutes));
        let region = |tz| Some(ZoneSpec::Region(tz));
        match phrase {
            "utc" | "gmt" | "z" => fixed(0),
            "est" | "eastern standard time" => fixed(-300),
            "edt" | "eastern daylight time" => fixed(-240),
            "cst" | "central standard time" => fixed(-360),
            "cdt" | "central daylight time" => fixed(-300),
            "mst" | "mountain standard time" => fixed(-420),
            "mdt" | "mountain daylight time" => fixed(-360),
            "pst" | "pacific standard time" => fixed(-480),
            "pdt" | "pacific daylight time" => fixed(-420),
            "akst" | "alaska standard time" => fixed(-540),
            "akdt" | "alaska daylight time" => fixed(-480),
            "hst" | "hawaii standard time" => fixed(-600),
            "atlantic standard time" => fixed(-240),
            "atlantic daylight time" => fixed(-180),
            "cet" => fixed(60),
            "cest" => fixed(120),
            "bst" => fixed(60),
            "ist" => fixed(330),
            "jst" => fixed(540),
            "aest" => fixed(600),
            "aedt" => fixed(660),
            "eastern time" | "new york time" => region(Tz::America__New_York),
            "central time" => region(Tz::America__Chicago),
            "mountain time" => region(Tz::America__Denver),
            "pacific time" => region(Tz::America__Los_Angeles),
            "alaska time" => region(Tz::America__Anchorage),
            "hawaii time" => region(Tz::Pacific__Honolulu),
            "atlantic time" => region(Tz::America__Halifax),
            "london time" => region(Tz::Europe__London),
            "paris time" => region(Tz::Europe__Paris),
            "berlin time" => region(Tz::Europe__Berlin),
            "tokyo time" => region(Tz::Asia__Tokyo),
            "beijing time" => region(Tz::Asia__Shanghai),
            "sydney time" => region(Tz::Australia__Sydney),
            _ => None,
        }
    }
}

impl MergeVocabulary for English {
    fn precedence(&self) -> Vec<Category> {
        vec![
            Category::DateTimePeriod,
            Category::DatePeriod,
            Category::TimePeriod,
            Category::Set,
            Category::Holiday,
            Category::DateTime,
            Category::Date,
            Category::Time,
            Category::Duration,
            Category::TimeZone,
        ]
    }

    fn range_prefix(&self) -> &'static str {
        r"\b(?:(?P<from>from)|(?P<between>between))\s+$"
    }

    fn range_connector(&self) -> &'static str {
        r"^\s*(?:(?P<and>and)|to|till|until|thru|through|-|–|~)\s*$"
    }

    fn point_connector(&self) -> &'static str {
        r"^\s*(?:,|at|on|around)?\s*$"
    }

    fn set_connector(&self) -> &'static str {
        r"^\s*(?:,|at|on)?\s*$"
    }

    fn anchor_connector(&self) -> &'static str {
        r"^\s*(?:of|in|,)?\s*$"
    }

    fn duration_joiner(&self) -> &'static str {
        r"^\s*(?:,\s*and|,|and)?\s*$"
    }

    fn modifier_prefix(&self) -> &'static str {
        r"\b(?P<mod>no\s+later\s+than|not\s+later\s+than|no\s+earlier\s+than|earlier\s+than|later\s+than|prior\s+to|before|after|since|until|till|by|around|about|approximately|roughly|circa|within)\s+$"
    }

    fn modifier_suffix(&self) -> &'static str {
        r"^\s+(?P<mod>or\s+later|or\s+after|or\s+earlier|or\s+before|onwards|and\s+after)\b"
    }

    fn modifier(&self, word: &str) -> Option<Modifier> {
        match word {
            "before" | "prior to" | "earlier than" | "no later than" | "not later than" | "by"
            | "or earlier" | "or before" => Some(Modifier::Before),
            "after" | "later than" | "no earlier than" | "or later" | "or after" | "onwards"
            | "and after" => Some(Modifier::After),
            "since" => Some(Modifier::Since),
            "until" | "till" => Some(Modifier::Until),
            "around" | "about" | "approximately" | "roughly" | "circa" => Some(Modifier::Around),
            "within" => Some(Modifier::Within),
            _ => None,
        }
    }
}
