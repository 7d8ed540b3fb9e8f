use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use temporal_tool::config::{
    load_calendar_from_csv, load_calendar_from_json, save_calendar_to_csv, save_calendar_to_json,
    ConfigError,
};
use temporal_tool::HolidayCalendar;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn json_round_trip_preserves_the_table() {
    let mut original = HolidayCalendar::french(2024, 2025);
    original.add_holiday(date(2024, 6, 3));
    original.add_fixed_holiday(12, 24);

    let tmp = NamedTempFile::new().expect("create temp file");
    save_calendar_to_json(&original, tmp.path()).expect("save json");
    let loaded = load_calendar_from_json(tmp.path()).expect("load json");

    assert!(loaded.is_holiday(date(2024, 7, 14)));
    assert!(loaded.is_holiday(date(2024, 4, 1))); // Easter Monday 2024
    assert!(loaded.is_holiday(date(2024, 6, 3)));
    assert!(loaded.is_holiday(date(2026, 12, 24))); // recurring entry
    assert!(!loaded.is_holiday(date(2024, 7, 15)));
    // The work week survives the round trip.
    assert!(!loaded.is_working_day(date(2025, 1, 4)));
    assert!(loaded.is_working_day(date(2025, 1, 2)));
}

#[test]
fn csv_round_trip_preserves_holiday_rows() {
    let mut original = HolidayCalendar::french(2024, 2024);
    original.add_holiday(date(2024, 6, 3));

    let tmp = NamedTempFile::new().expect("create temp file");
    save_calendar_to_csv(&original, tmp.path()).expect("save csv");
    let loaded = load_calendar_from_csv(tmp.path()).expect("load csv");

    assert!(loaded.is_holiday(date(2024, 7, 14)));
    assert!(loaded.is_holiday(date(2024, 5, 20))); // Whit Monday 2024
    assert!(loaded.is_holiday(date(2024, 6, 3)));
    assert!(!loaded.is_holiday(date(2024, 7, 15)));
    // CSV does not carry the work week; Mon-Fri is assumed on load.
    assert!(!loaded.is_working_day(date(2025, 1, 4)));
}

#[test]
fn empty_csv_is_rejected() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let err = load_calendar_from_csv(tmp.path()).expect_err("empty csv must fail");
    assert!(matches!(err, ConfigError::InvalidData(_)));
}

#[test]
fn out_of_range_month_day_is_rejected() {
    let mut tmp = NamedTempFile::new().expect("create temp file");
    write!(
        tmp,
        "{}",
        r#"{ "fixed": [{ "month": 13, "day": 1 }], "dated": [], "non_working_days": [] }"#
    )
    .expect("write snapshot");
    let err = load_calendar_from_json(tmp.path()).expect_err("month 13 must fail");
    assert!(matches!(err, ConfigError::InvalidData(_)));
}

#[test]
fn unknown_weekday_name_is_rejected() {
    let mut tmp = NamedTempFile::new().expect("create temp file");
    write!(
        tmp,
        "{}",
        r#"{ "fixed": [], "dated": [], "non_working_days": ["Noday"] }"#
    )
    .expect("write snapshot");
    let err = load_calendar_from_json(tmp.path()).expect_err("bad weekday must fail");
    assert!(matches!(err, ConfigError::InvalidData(_)));
}

#[test]
fn bad_csv_kind_is_rejected() {
    let mut tmp = NamedTempFile::new().expect("create temp file");
    write!(tmp, "kind,month,day,date\nfloating,,,2024-06-03\n").expect("write rows");
    let err = load_calendar_from_csv(tmp.path()).expect_err("bad kind must fail");
    assert!(matches!(err, ConfigError::InvalidData(_)));
}

#[test]
fn leap_day_is_a_valid_recurring_entry() {
    let mut original = HolidayCalendar::empty();
    original.add_fixed_holiday(2, 29);

    let tmp = NamedTempFile::new().expect("create temp file");
    save_calendar_to_json(&original, tmp.path()).expect("save json");
    let loaded = load_calendar_from_json(tmp.path()).expect("load json");
    assert!(loaded.is_holiday(date(2024, 2, 29)));
}
