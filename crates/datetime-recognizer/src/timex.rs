//! Canonical temporal codes.
//!
//! An ISO-8601-derived notation: unresolved fields become `X` placeholders
//! (`XXXX-10-02`), weekdays are `XXXX-WXX-d`, ranges are
//! `(start,end,duration)` and durations use `P`/`PT` notation with
//! fractional magnitudes allowed (`P3.5Y`). Codes are only ever produced,
//! never parsed back.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::calendar::Unit;

pub const PRESENT_REF: &str = "PRESENT_REF";

/// Date code with placeholders for missing fields.
pub fn date(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> String {
    let year = year.map_or_else(|| "XXXX".to_string(), |y| format!("{y:04}"));
    let month = month.map_or_else(|| "XX".to_string(), |m| format!("{m:02}"));
    match day {
        Some(d) => format!("{year}-{month}-{d:02}"),
        None => format!("{year}-{month}-XX"),
    }
}

pub fn full_date(d: NaiveDate) -> String {
    date(Some(d.year()), Some(d.month()), Some(d.day()))
}

/// Month-granular code: `2016-12` or `XXXX-12`.
pub fn month(year: Option<i32>, month: u32) -> String {
    match year {
        Some(y) => format!("{y:04}-{month:02}"),
        None => format!("XXXX-{month:02}"),
    }
}

pub fn year(year: i32) -> String {
    format!("{year:04}")
}

/// Weekday-only code, Monday = 1.
pub fn weekday(wd: Weekday) -> String {
    format!("XXXX-WXX-{}", wd.number_from_monday())
}

/// Nth weekday of a month: `XXXX-03-WXX-1-#1`.
pub fn nth_weekday(year: Option<i32>, month: u32, wd: Weekday, ordinal: i32) -> String {
    let year = year.map_or_else(|| "XXXX".to_string(), |y| format!("{y:04}"));
    format!(
        "{year}-{month:02}-WXX-{}-#{ordinal}",
        wd.number_from_monday()
    )
}

/// ISO week code of the week containing `d`: `2016-W45`.
pub fn iso_week(d: NaiveDate) -> String {
    let week = d.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

pub fn weekend(d: NaiveDate) -> String {
    format!("{}-WE", iso_week(d))
}

/// Week-of-month code: `XXXX-07-W03`.
pub fn week_of_month(year: Option<i32>, month: u32, week: u32) -> String {
    format!("{}-W{week:02}", self::month(year, month))
}

pub fn season(year: Option<i32>, code: &str) -> String {
    match year {
        Some(y) => format!("{y:04}-{code}"),
        None => format!("XXXX-{code}"),
    }
}

/// Time code trimmed to the precision actually present: `T16`, `T16:30`,
/// `T16:30:20`.
pub fn time(t: NaiveTime) -> String {
    match (t.minute(), t.second()) {
        (0, 0) => format!("T{:02}", t.hour()),
        (m, 0) => format!("T{:02}:{m:02}", t.hour()),
        (m, s) => format!("T{:02}:{m:02}:{s:02}", t.hour()),
    }
}

/// Full-precision date-time code: `2016-11-06T21:00:00`.
pub fn full_date_time(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn range(start: &str, end: &str, duration: &str) -> String {
    format!("({start},{end},{duration})")
}

/// Render a magnitude without a trailing `.0`.
pub fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let rendered = format!("{value:.4}");
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Duration code for a list of (magnitude, unit) components.
///
/// Components sharing a unit are summed; quarters, decades and centuries
/// fold into months and years.
pub fn duration(components: &[(f64, Unit)]) -> String {
    let mut years = 0.0;
    let mut months = 0.0;
    let mut weeks = 0.0;
    let mut days = 0.0;
    let mut hours = 0.0;
    let mut minutes = 0.0;
    let mut seconds = 0.0;
    for &(value, unit) in components {
        match unit {
            Unit::Century => years += value * 100.0,
            Unit::Decade => years += value * 10.0,
            Unit::Year => years += value,
            Unit::Quarter => months += value * 3.0,
            Unit::Month => months += value,
            Unit::Week => weeks += value,
            Unit::Day => days += value,
            Unit::Hour => hours += value,
            Unit::Minute => minutes += value,
            Unit::Second => seconds += value,
        }
    }

    let mut code = String::from("P");
    for (value, letter) in [(years, 'Y'), (months, 'M'), (weeks, 'W'), (days, 'D')] {
        if value != 0.0 {
            code.push_str(&amount(value));
            code.push(letter);
        }
    }
    let clock: Vec<(f64, char)> = [(hours, 'H'), (minutes, 'M'), (seconds, 'S')]
        .into_iter()
        .filter(|(value, _)| *value != 0.0)
        .collect();
    if !clock.is_empty() {
        code.push('T');
        for (value, letter) in clock {
            code.push_str(&amount(value));
            code.push(letter);
        }
    }
    if code.len() == 1 {
        code.push_str("T0S");
    }
    code
}

/// Duration code for a span of whole days: `P18D`.
pub fn days(count: i64) -> String {
    format!("P{count}D")
}

/// Clock duration code from seconds, expressed in hours/minutes/seconds:
/// `PT2H`, `PT1H30M`, `PT26H`.
pub fn clock_seconds(total: i64) -> String {
    let total = total.abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    duration(&[
        (hours as f64, Unit::Hour),
        (minutes as f64, Unit::Minute),
        (seconds as f64, Unit::Second),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_placeholders() {
        assert_eq!(date(None, Some(10), Some(2)), "XXXX-10-02");
        assert_eq!(date(None, None, Some(15)), "XXXX-XX-15");
        assert_eq!(date(Some(2016), Some(11), Some(4)), "2016-11-04");
    }

    #[test]
    fn test_weekday_code() {
        assert_eq!(weekday(Weekday::Fri), "XXXX-WXX-5");
        assert_eq!(weekday(Weekday::Sun), "XXXX-WXX-7");
    }

    #[test]
    fn test_iso_week_code() {
        let d = NaiveDate::from_ymd_opt(2016, 11, 16).unwrap();
        assert_eq!(iso_week(d), "2016-W46");
        assert_eq!(weekend(d), "2016-W46-WE");
    }

    #[test]
    fn test_time_precision() {
        assert_eq!(time(NaiveTime::from_hms_opt(16, 0, 0).unwrap()), "T16");
        assert_eq!(time(NaiveTime::from_hms_opt(16, 30, 0).unwrap()), "T16:30");
        assert_eq!(time(NaiveTime::from_hms_opt(7, 5, 9).unwrap()), "T07:05:09");
    }

    #[test]
    fn test_duration_mixed_components() {
        assert_eq!(duration(&[(3.0, Unit::Day)]), "P3D");
        assert_eq!(duration(&[(2.0, Unit::Hour), (30.0, Unit::Minute)]), "PT2H30M");
        assert_eq!(duration(&[(1.0, Unit::Day), (2.0, Unit::Hour)]), "P1DT2H");
        assert_eq!(duration(&[(3.5, Unit::Year)]), "P3.5Y");
        assert_eq!(duration(&[(1.0, Unit::Quarter)]), "P3M");
    }

    #[test]
    fn test_clock_seconds() {
        assert_eq!(clock_seconds(7200), "PT2H");
        assert_eq!(clock_seconds(5400), "PT1H30M");
        assert_eq!(clock_seconds(0), "PT0S");
    }

    #[test]
    fn test_amount_trims_trailing_zeroes() {
        assert_eq!(amount(3.0), "3");
        assert_eq!(amount(0.25), "0.25");
    }
}
