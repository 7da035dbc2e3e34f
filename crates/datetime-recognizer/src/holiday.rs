//! Holiday resolution: holiday name + year → date.
//!
//! Names are looked up by a sanitized key (diacritics stripped, punctuation
//! and whitespace removed, lowercased) that the locale folds onto a canonical
//! holiday. Each canonical holiday carries a [`HolidayRule`]: a fixed
//! month/day, an offset from Easter Sunday, the Nth weekday of a month, or a
//! date of the tabular Islamic calendar.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::calendar::{find_nth_weekday_in_month, shift_days};
use crate::config::Configuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayRule {
    Fixed {
        month: u32,
        day: u32,
    },
    /// Days after (or before, if negative) Easter Sunday.
    Easter {
        offset: i64,
    },
    /// The Nth weekday of a month (negative counts from the end), shifted by
    /// `offset` days.
    NthWeekday {
        month: u32,
        weekday: Weekday,
        ordinal: i32,
        offset: i64,
    },
    /// A day of the Hijri calendar, first occurrence in the Gregorian year.
    Hijri {
        month: u32,
        day: u32,
    },
}

impl HolidayRule {
    pub fn date(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            HolidayRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            HolidayRule::Easter { offset } => shift_days(easter_sunday(year)?, offset),
            HolidayRule::NthWeekday {
                month,
                weekday,
                ordinal,
                offset,
            } => shift_days(
                find_nth_weekday_in_month(year, month, weekday, ordinal)?,
                offset,
            ),
            HolidayRule::Hijri { month, day } => hijri_in_gregorian_year(year, month, day),
        }
    }

    /// Whether the holiday falls on the same month/day every year.
    pub fn is_fixed(&self) -> bool {
        matches!(self, HolidayRule::Fixed { .. })
    }
}

/// Canonical lookup form of a holiday name.
pub fn sanitize(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Easter Sunday (Gregorian computus, anonymous algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Julian day number of 0001-01-01 minus one; `jdn - JDN_CE_OFFSET` is the
/// chrono day count from the common era.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Convert a date of the tabular (arithmetical) Islamic calendar.
pub fn hijri_to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if year < 1 || !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return None;
    }
    let (y, m, d) = (year as i64, month as i64, day as i64);
    let jdn = d + (59 * (m - 1) + 1) / 2 + (y - 1) * 354 + (3 + 11 * y) / 30 + 1_948_439;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(jdn - JDN_CE_OFFSET).ok()?)
}

/// The first occurrence of a Hijri month/day inside Gregorian `year`.
fn hijri_in_gregorian_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let estimate = ((year - 622) as f64 * 33.0 / 32.0) as i32;
    (estimate - 1..=estimate + 1)
        .filter_map(|h| hijri_to_gregorian(h, month, day))
        .filter(|date| date.year() == year)
        .min()
}

/// Maps holiday names to dates through a configuration's holiday tables.
#[derive(Debug, Clone)]
pub struct HolidayResolver {
    config: Arc<Configuration>,
}

impl HolidayResolver {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    pub fn rule(&self, name: &str) -> Option<HolidayRule> {
        let locale = self.config.locale();
        let key = locale.canonical_holiday(&sanitize(name))?;
        locale.holiday_rule(key)
    }

    /// Resolve `name` in `year`; `None` for unknown names or dates outside
    /// the calendar's range.
    pub fn resolve(&self, name: &str, year: i32) -> Option<NaiveDate> {
        self.rule(name)?.date(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver() -> HolidayResolver {
        HolidayResolver::new(Configuration::english().unwrap())
    }

    #[test]
    fn test_sanitize_strips_diacritics_and_punctuation() {
        assert_eq!(sanitize("New Year's Day"), "newyearsday");
        assert_eq!(sanitize("Día de los Muertos"), "diadelosmuertos");
        assert_eq!(sanitize("Eid al-Fitr"), "eidalfitr");
    }

    #[test]
    fn test_easter_known_years() {
        assert_eq!(easter_sunday(2016), Some(date(2016, 3, 27)));
        assert_eq!(easter_sunday(2017), Some(date(2017, 4, 16)));
        assert_eq!(easter_sunday(2019), Some(date(2019, 4, 21)));
    }

    #[test]
    fn test_hijri_eid_al_fitr_2016() {
        // 1 Shawwal 1437 in the tabular calendar
        assert_eq!(hijri_to_gregorian(1437, 10, 1), Some(date(2016, 7, 7)));
        assert_eq!(
            HolidayRule::Hijri { month: 10, day: 1 }.date(2016),
            Some(date(2016, 7, 7))
        );
    }

    #[test]
    fn test_hijri_rejects_invalid_month() {
        assert_eq!(hijri_to_gregorian(1437, 13, 1), None);
    }

    #[test]
    fn test_resolve_fixed_holiday() {
        assert_eq!(resolver().resolve("Christmas", 2016), Some(date(2016, 12, 25)));
        assert_eq!(resolver().resolve("xmas", 2016), Some(date(2016, 12, 25)));
    }

    #[test]
    fn test_resolve_easter_relative() {
        assert_eq!(resolver().resolve("Good Friday", 2016), Some(date(2016, 3, 25)));
        assert_eq!(resolver().resolve("easter monday", 2016), Some(date(2016, 3, 28)));
    }

    #[test]
    fn test_resolve_nth_weekday() {
        assert_eq!(resolver().resolve("Thanksgiving", 2016), Some(date(2016, 11, 24)));
        assert_eq!(resolver().resolve("Black Friday", 2016), Some(date(2016, 11, 25)));
        assert_eq!(resolver().resolve("Memorial Day", 2016), Some(date(2016, 5, 30)));
    }

    #[test]
    fn test_resolve_unknown_holiday() {
        assert_eq!(resolver().resolve("Festivus Maximus", 2016), None);
    }
}
