//! Recurrence rules produced by the set parser.
//!
//! A [`Recurrence`] describes a repeating rule and never carries concrete
//! instants. Callers that need instants can render it as an RFC 5545 RRULE
//! and expand it with [`Recurrence::occurrences`].

use chrono::{NaiveDateTime, NaiveTime, Timelike, Weekday};
use rrule::RRuleSet;
use serde::Serialize;

use crate::calendar::Unit;
use crate::config::BandKind;
use crate::error::{RecognizerError, Result};
use crate::timex;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recurrence {
    /// Number of units between occurrences, multiplier already applied.
    pub amount: f64,
    pub unit: Unit,
    /// The weekday a weekly rule is anchored on.
    pub weekday: Option<Weekday>,
    /// Time of day each occurrence falls on.
    pub time: Option<NaiveTime>,
    /// Time-of-day band each occurrence falls in.
    pub band: Option<BandKind>,
}

impl Recurrence {
    pub fn every(amount: f64, unit: Unit) -> Self {
        Self {
            amount,
            unit,
            weekday: None,
            time: None,
            band: None,
        }
    }

    /// Inter-occurrence interval code: `P1W`, `P2D`, `PT1H`.
    pub fn interval_code(&self) -> String {
        timex::duration(&[(self.amount, self.unit)])
    }

    /// Render the rule as an RFC 5545 RRULE body (without DTSTART).
    pub fn to_rrule(&self) -> Result<String> {
        if self.amount.fract() != 0.0 || self.amount < 1.0 {
            return Err(RecognizerError::InvalidRecurrence(format!(
                "interval {} is not a whole number of units",
                self.amount
            )));
        }
        let amount = self.amount as u64;
        let (freq, per_unit) = match self.unit {
            Unit::Second => ("SECONDLY", 1),
            Unit::Minute => ("MINUTELY", 1),
            Unit::Hour => ("HOURLY", 1),
            Unit::Day => ("DAILY", 1),
            Unit::Week => ("WEEKLY", 1),
            Unit::Month => ("MONTHLY", 1),
            Unit::Quarter => ("MONTHLY", 3),
            Unit::Year => ("YEARLY", 1),
            Unit::Decade => ("YEARLY", 10),
            Unit::Century => ("YEARLY", 100),
        };
        let interval = amount.checked_mul(per_unit).ok_or_else(|| {
            RecognizerError::InvalidRecurrence(format!("interval {} overflows", self.amount))
        })?;

        let mut rule = format!("FREQ={freq};INTERVAL={interval}");
        if let Some(weekday) = self.weekday {
            rule.push_str(&format!(";BYDAY={}", rrule_weekday(weekday)));
        }
        let time = self.time.or_else(|| self.band.map(BandKind::default_start));
        if let Some(time) = time.filter(|_| !self.unit.is_clock()) {
            rule.push_str(&format!(
                ";BYHOUR={};BYMINUTE={};BYSECOND={}",
                time.hour(),
                time.minute(),
                time.second()
            ));
        }
        Ok(rule)
    }

    /// Expand the rule into the first `count` occurrences strictly after
    /// `reference`.
    pub fn occurrences(&self, reference: NaiveDateTime, count: u16) -> Result<Vec<NaiveDateTime>> {
        let text = format!(
            "DTSTART:{}Z\nRRULE:{}",
            reference.format("%Y%m%dT%H%M%S"),
            self.to_rrule()?
        );
        let set: RRuleSet = text
            .parse()
            .map_err(|e| RecognizerError::InvalidRecurrence(format!("'{text}': {e}")))?;

        let result = set.all(count.saturating_add(1));
        Ok(result
            .dates
            .into_iter()
            .map(|dt| dt.naive_utc())
            .filter(|dt| *dt > reference)
            .take(count as usize)
            .collect())
    }
}

fn rrule_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
