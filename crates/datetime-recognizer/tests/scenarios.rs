//! End-to-end recognition against a fixed reference moment: Monday,
//! November 7, 2016, midnight.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use datetime_recognizer::{
    Category, Configuration, Modifier, Recognizer, Resolution, ResolveOptions, ResolvedValue,
};

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 11, 7)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn recognize(text: &str) -> Vec<ResolvedValue> {
    Recognizer::english().unwrap().recognize(text, reference())
}

fn only(text: &str) -> ResolvedValue {
    let mut values = recognize(text);
    assert_eq!(values.len(), 1, "values of {text:?}: {values:?}");
    values.remove(0)
}

// ── Documented scenarios ──

#[test]
fn test_day_of_month() {
    let value = only("I'll return on the 15th");
    assert_eq!(value.category, Category::Date);
    assert_eq!(value.future().as_date(), Some(date(2016, 11, 15)));
    assert_eq!(value.past().as_date(), Some(date(2016, 10, 15)));
}

#[test]
fn test_next_friday_and_bare_friday() {
    let value = only("I'll return next Friday");
    assert_eq!(value.future().as_date(), Some(date(2016, 11, 11)));
    assert_eq!(only("I'll return Friday").code, "XXXX-WXX-5");
}

#[test]
fn test_duration_in_seconds() {
    let value = only("I leave for 3 days");
    assert_eq!(value.category, Category::Duration);
    assert_eq!(value.code, "P3D");
    assert_eq!(value.future(), &Resolution::Duration { seconds: 259_200.0 });
}

#[test]
fn test_anchored_day_range() {
    let value = only("from the 4th to the 22nd this month");
    assert_eq!(value.category, Category::DatePeriod);
    assert_eq!(value.code, "(2016-11-04,2016-11-22,P18D)");
    assert_eq!(
        value.future().as_date_range(),
        Some((date(2016, 11, 4), date(2016, 11, 22)))
    );
}

#[test]
fn test_christmas() {
    let value = only("I'll be back at Christmas");
    assert_eq!(value.category, Category::Holiday);
    assert_eq!(value.future().as_date(), Some(date(2016, 12, 25)));
}

#[test]
fn test_weekly_recurrence_with_time() {
    let value = only("every Monday at 4pm");
    assert_eq!(value.category, Category::Set);
    assert_eq!(value.code, "XXXX-WXX-1T16");
}

// ── Broader coverage ──

#[test]
fn test_offsets_are_byte_offsets() {
    let text = "Réunion tomorrow";
    let value = only(text);
    assert_eq!(&text[value.start..value.start + value.length], "tomorrow");
    assert_eq!(value.start, 9);
}

#[test]
fn test_several_spans_in_order() {
    let values = recognize("Call me tomorrow, or else next week for an hour.");
    let codes: Vec<&str> = values.iter().map(|v| v.code.as_str()).collect();
    assert_eq!(codes, vec!["2016-11-08", "2016-W46", "PT1H"]);
}

#[test]
fn test_exclusive_end_configuration() {
    let config = Configuration::english_with_options(ResolveOptions {
        inclusive_end: false,
        ..ResolveOptions::default()
    })
    .unwrap();
    let recognizer = Recognizer::new(config);
    let values = recognizer.recognize("from the 4th to the 22nd this month", reference());
    assert_eq!(values[0].code, "(2016-11-04,2016-11-23,P19D)");
}

#[test]
fn test_time_zone_surfaces_on_value() {
    let value = only("the call is at 4pm EST");
    assert_eq!(value.category, Category::Time);
    assert_eq!(value.code, "T16");
    assert_eq!(value.time_zone.unwrap().utc_offset_minutes, -300);
}

#[test]
fn test_modifier_surfaces_on_value() {
    let value = only("sometime after Friday");
    assert_eq!(value.modifier, Some(Modifier::After));
}

#[test]
fn test_movable_holidays() {
    assert_eq!(only("Thanksgiving 2016").code, "2016-11-24");
    assert_eq!(only("Good Friday 2017").code, "2017-04-14");
    assert_eq!(only("Memorial Day 2017").code, "2017-05-29");
}

#[test]
fn test_period_codes() {
    assert_eq!(only("next week").code, "2016-W46");
    assert_eq!(only("summer 2016").code, "2016-SU");
    assert_eq!(only("the next 3 days").code, "(2016-11-08,2016-11-10,P3D)");
    assert_eq!(only("tonight").code, "2016-11-07TNI");
}

#[test]
fn test_resolved_value_serializes() {
    let value = only("tomorrow");
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["category"], "date");
    assert_eq!(json["code"], "2016-11-08");
    assert_eq!(json["value"]["ambiguity"], "unambiguous");
}

#[test]
fn test_recurrence_expands_to_occurrences() {
    let value = only("every Monday at 4pm");
    let Resolution::Recurrence(rule) = value.future() else {
        panic!("not a recurrence");
    };
    let next = rule.occurrences(reference(), 2).unwrap();
    assert_eq!(
        next,
        vec![
            date(2016, 11, 7).and_hms_opt(16, 0, 0).unwrap(),
            date(2016, 11, 14).and_hms_opt(16, 0, 0).unwrap(),
        ]
    );
}

#[test]
fn test_weekday_ranges_in_both_directions() {
    let forward = only("off from Monday to Friday");
    assert_eq!(forward.category, Category::DatePeriod);
    assert_eq!(forward.code, "(2016-11-07,2016-11-11,P4D)");
    assert_eq!(
        forward.past().as_date_range(),
        Some((date(2016, 11, 7), date(2016, 11, 11)))
    );

    let wrapped = only("off from Friday to Monday");
    assert_eq!(wrapped.code, "(2016-11-11,2016-11-14,P3D)");
    assert_eq!(
        wrapped.future().as_date_range(),
        Some((date(2016, 11, 11), date(2016, 11, 14)))
    );
    assert_eq!(
        wrapped.past().as_date_range(),
        Some((date(2016, 11, 4), date(2016, 11, 7)))
    );
}

#[test]
fn test_month_of_next_year() {
    let value = only("March of next year");
    assert_eq!(value.category, Category::DatePeriod);
    assert_eq!(value.code, "2017-03");
}

#[test]
fn test_bare_new_year() {
    let value = only("New Year");
    assert_eq!(value.category, Category::Holiday);
    assert_eq!(value.future().as_date(), Some(date(2017, 1, 1)));
}

#[test]
fn test_interval_recurrence_on_a_weekday() {
    let value = only("every 2 weeks on Monday");
    assert_eq!(value.category, Category::Set);
    let Resolution::Recurrence(rule) = value.future() else {
        panic!("not a recurrence");
    };
    assert_eq!(rule.weekday, Some(Weekday::Mon));
    assert_eq!(rule.to_rrule().unwrap(), "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO");
}
