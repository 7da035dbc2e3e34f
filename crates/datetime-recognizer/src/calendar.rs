//! Calendar arithmetic shared by the parsers.
//!
//! Everything here works on naive dates: the pipeline resolves wall-clock
//! values relative to a caller-supplied reference moment and never reads the
//! system clock.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for period computations ("this week", "next week").
///
/// Does **not** affect named-weekday expressions like "next Monday".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// How many days `weekday` is from the week-start day.
pub fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

/// First day of the week containing `date`.
pub fn week_start_of(date: NaiveDate, week_start: WeekStartDay) -> Option<NaiveDate> {
    shift_days(date, -days_from_week_start(date.weekday(), week_start))
}

// ── Units ───────────────────────────────────────────────────────────────────

/// A calendar or clock unit named by a duration, period or recurrence phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Decade,
    Century,
}

impl Unit {
    /// Nominal length in seconds (months are 30 days, years 365).
    pub fn seconds(&self) -> f64 {
        match self {
            Unit::Second => 1.0,
            Unit::Minute => 60.0,
            Unit::Hour => 3_600.0,
            Unit::Day => 86_400.0,
            Unit::Week => 604_800.0,
            Unit::Month => 2_592_000.0,
            Unit::Quarter => 7_776_000.0,
            Unit::Year => 31_536_000.0,
            Unit::Decade => 315_360_000.0,
            Unit::Century => 3_153_600_000.0,
        }
    }

    /// Whether the unit belongs to the time part of a duration code.
    pub fn is_clock(&self) -> bool {
        matches!(self, Unit::Second | Unit::Minute | Unit::Hour)
    }
}

// ── Date arithmetic ─────────────────────────────────────────────────────────

pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Add calendar months, clamping the day to the end of the target month.
pub fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
}

/// Shift `date` by `amount` whole units. Clock units are not calendar
/// arithmetic and return `None`.
pub fn shift(date: NaiveDate, unit: Unit, amount: i64) -> Option<NaiveDate> {
    match unit {
        Unit::Day => shift_days(date, amount),
        Unit::Week => shift_days(date, amount.checked_mul(7)?),
        Unit::Month => shift_months(date, amount),
        Unit::Quarter => shift_months(date, amount.checked_mul(3)?),
        Unit::Year => shift_months(date, amount.checked_mul(12)?),
        Unit::Decade => shift_months(date, amount.checked_mul(120)?),
        Unit::Century => shift_months(date, amount.checked_mul(1200)?),
        Unit::Second | Unit::Minute | Unit::Hour => None,
    }
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_of_month(year, month)
        .and_then(|first| shift_months(first, 1))
        .and_then(|next| next.pred_opt())
}

/// First day of quarter `quarter` (1-4) in `year`.
pub fn quarter_start(year: i32, quarter: u32) -> Option<NaiveDate> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    first_of_month(year, (quarter - 1) * 3 + 1)
}

/// First occurrence of `weekday` on or after `date`.
pub fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let ahead = (weekday.num_days_from_monday() as i64 - date.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    shift_days(date, ahead)
}

/// Most recent occurrence of `weekday` on or before `date`.
pub fn prev_weekday_on_or_before(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let back = (date.weekday().num_days_from_monday() as i64 - weekday.num_days_from_monday() as i64
        + 7)
        % 7;
    shift_days(date, -back)
}

/// Resolve a weekday relative to `today` by swift offset.
///
/// `+1` is the next occurrence strictly after today, `-1` the most recent
/// strictly before it, and `0` the occurrence inside the current Monday-based
/// week (may lie before or after today).
pub fn weekday_by_swift(today: NaiveDate, weekday: Weekday, swift: i64) -> Option<NaiveDate> {
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    match swift.signum() {
        0 => shift_days(today, target - current),
        1 => {
            let ahead = (target - current + 7) % 7;
            let ahead = if ahead == 0 { 7 } else { ahead };
            shift_days(today, ahead + 7 * (swift - 1))
        }
        _ => {
            let back = (current - target + 7) % 7;
            let back = if back == 0 { 7 } else { back };
            shift_days(today, -(back + 7 * (-swift - 1)))
        }
    }
}

/// Find the Nth weekday in a month. ordinal < 0 means "last" (-1), "second to last" (-2), etc.
pub fn find_nth_weekday_in_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    ordinal: i32,
) -> Option<NaiveDate> {
    let target = if ordinal > 0 {
        let first = next_weekday_on_or_after(first_of_month(year, month)?, weekday)?;
        shift_days(first, 7 * (ordinal as i64 - 1))?
    } else if ordinal < 0 {
        let last = prev_weekday_on_or_before(last_day_of_month(year, month)?, weekday)?;
        shift_days(last, -7 * (-ordinal as i64 - 1))?
    } else {
        return None;
    };
    // An ordinal that runs off the month does not wrap into the next one.
    (target.month() == month).then_some(target)
}

/// Number of whole days from `start` to `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Expand a two-digit year: 00-49 land in the 2000s, 50-99 in the 1900s.
pub fn expand_year(year: i32) -> i32 {
    match year {
        0..=49 => 2000 + year,
        50..=99 => 1900 + year,
        _ => year,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_monday_and_sunday() {
        // 2016-11-09 is a Wednesday
        assert_eq!(
            week_start_of(date(2016, 11, 9), WeekStartDay::Monday),
            Some(date(2016, 11, 7))
        );
        assert_eq!(
            week_start_of(date(2016, 11, 9), WeekStartDay::Sunday),
            Some(date(2016, 11, 6))
        );
    }

    #[test]
    fn test_shift_months_clamps_to_month_end() {
        assert_eq!(shift_months(date(2016, 1, 31), 1), Some(date(2016, 2, 29)));
        assert_eq!(shift_months(date(2017, 3, 31), -1), Some(date(2017, 2, 28)));
    }

    #[test]
    fn test_shift_rejects_clock_units() {
        assert_eq!(shift(date(2016, 1, 1), Unit::Hour, 3), None);
        assert_eq!(shift(date(2016, 1, 1), Unit::Week, 2), Some(date(2016, 1, 15)));
    }

    #[test]
    fn test_last_day_of_month_december() {
        assert_eq!(last_day_of_month(2016, 12), Some(date(2016, 12, 31)));
        assert_eq!(last_day_of_month(2016, 2), Some(date(2016, 2, 29)));
    }

    #[test]
    fn test_weekday_by_swift_from_monday() {
        let monday = date(2016, 11, 7);
        assert_eq!(weekday_by_swift(monday, Weekday::Fri, 1), Some(date(2016, 11, 11)));
        assert_eq!(weekday_by_swift(monday, Weekday::Fri, -1), Some(date(2016, 11, 4)));
        assert_eq!(weekday_by_swift(monday, Weekday::Fri, 0), Some(date(2016, 11, 11)));
        assert_eq!(weekday_by_swift(monday, Weekday::Mon, 1), Some(date(2016, 11, 14)));
        assert_eq!(weekday_by_swift(monday, Weekday::Mon, -1), Some(date(2016, 10, 31)));
    }

    #[test]
    fn test_nth_weekday_first_and_last() {
        // Thanksgiving 2016: fourth Thursday of November
        assert_eq!(
            find_nth_weekday_in_month(2016, 11, Weekday::Thu, 4),
            Some(date(2016, 11, 24))
        );
        // Memorial Day 2016: last Monday of May
        assert_eq!(
            find_nth_weekday_in_month(2016, 5, Weekday::Mon, -1),
            Some(date(2016, 5, 30))
        );
    }

    #[test]
    fn test_nth_weekday_out_of_month() {
        assert_eq!(find_nth_weekday_in_month(2017, 2, Weekday::Mon, 5), None);
    }

    #[test]
    fn test_expand_two_digit_year() {
        assert_eq!(expand_year(16), 2016);
        assert_eq!(expand_year(87), 1987);
        assert_eq!(expand_year(2016), 2016);
    }
}
