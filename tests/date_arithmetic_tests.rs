use temporal_tool::{DateValue, DurationValue, TimeUnit, UnitMap};

#[test]
fn add_days_moves_the_civil_date() {
    let value = DateValue::from_iso("2021-11-24T10:00:00.000Z");
    let next = value.add(UnitMap {
        days: 1,
        ..Default::default()
    });
    assert_eq!(next.to_iso().unwrap(), "2021-11-25T10:00:00.000Z");
    // The original is untouched.
    assert_eq!(value.to_iso().unwrap(), "2021-11-24T10:00:00.000Z");
}

#[test]
fn add_months_clamps_the_day_of_month() {
    let end_of_january = DateValue::from_iso("2021-01-31T00:00:00.000Z");
    let shifted = end_of_january.add(UnitMap {
        months: 1,
        ..Default::default()
    });
    assert_eq!(shifted.to_iso().unwrap(), "2021-02-28T00:00:00.000Z");
}

#[test]
fn add_composite_span_applies_every_unit() {
    let value = DateValue::from_iso("2021-01-10T08:00:00.000Z");
    let shifted = value.add(UnitMap {
        years: 1,
        months: 2,
        days: 3,
        hours: 4,
        minutes: 30,
        ..Default::default()
    });
    assert_eq!(shifted.to_iso().unwrap(), "2022-03-13T12:30:00.000Z");
}

#[test]
fn subtract_reverses_add_when_no_clamping_occurs() {
    let value = DateValue::from_iso("2021-11-24T10:00:00.000Z");
    let span = UnitMap {
        months: 3,
        days: 5,
        hours: 7,
        ..Default::default()
    };
    let round_trip = value.add(span).subtract(span);
    assert_eq!(round_trip.to_iso().unwrap(), value.to_iso().unwrap());
}

#[test]
fn add_accepts_a_duration_value() {
    let value = DateValue::from_iso("2021-11-24T10:00:00.000Z");
    let span = DurationValue::from_units(UnitMap {
        hours: 2,
        ..Default::default()
    });
    let shifted = value.add(&span);
    assert_eq!(shifted.to_iso().unwrap(), "2021-11-24T12:00:00.000Z");
}

#[test]
fn start_of_aligns_to_unit_boundaries() {
    let value = DateValue::from_iso("2021-11-24T10:12:30.456Z");
    assert_eq!(
        value.start_of(TimeUnit::Year).to_iso().unwrap(),
        "2021-01-01T00:00:00.000Z"
    );
    assert_eq!(
        value.start_of(TimeUnit::Month).to_iso().unwrap(),
        "2021-11-01T00:00:00.000Z"
    );
    // 2021-11-22 is the Monday of that week.
    assert_eq!(
        value.start_of(TimeUnit::Week).to_iso().unwrap(),
        "2021-11-22T00:00:00.000Z"
    );
    assert_eq!(
        value.start_of(TimeUnit::Day).to_iso().unwrap(),
        "2021-11-24T00:00:00.000Z"
    );
    assert_eq!(
        value.start_of(TimeUnit::Hour).to_iso().unwrap(),
        "2021-11-24T10:00:00.000Z"
    );
    assert_eq!(
        value.start_of(TimeUnit::Minute).to_iso().unwrap(),
        "2021-11-24T10:12:00.000Z"
    );
    assert_eq!(
        value.start_of(TimeUnit::Second).to_iso().unwrap(),
        "2021-11-24T10:12:30.000Z"
    );
}

#[test]
fn end_of_is_the_last_millisecond() {
    let value = DateValue::from_iso("2021-02-10T05:00:00.000Z");
    assert_eq!(
        value.end_of(TimeUnit::Month).to_iso().unwrap(),
        "2021-02-28T23:59:59.999Z"
    );
    assert_eq!(
        value.end_of(TimeUnit::Year).to_iso().unwrap(),
        "2021-12-31T23:59:59.999Z"
    );
    assert_eq!(
        value.end_of(TimeUnit::Day).to_iso().unwrap(),
        "2021-02-10T23:59:59.999Z"
    );
    assert_eq!(
        value.end_of(TimeUnit::Hour).to_iso().unwrap(),
        "2021-02-10T05:59:59.999Z"
    );
}

#[test]
fn start_of_then_end_of_cover_the_whole_month() {
    let value = DateValue::from_iso("2021-11-24T10:00:00.000Z");
    let start = value.start_of(TimeUnit::Month);
    let end = value.end_of(TimeUnit::Month);
    assert!(value.is_same_or_between(&start, &end).unwrap());
    assert_eq!(end.diff(&start, TimeUnit::Day).unwrap(), 29);
}

#[test]
fn invalid_values_absorb_through_chained_arithmetic() {
    let broken = DateValue::from_iso("garbage");
    let chained = broken
        .add(UnitMap {
            days: 1,
            ..Default::default()
        })
        .start_of(TimeUnit::Month)
        .end_of(TimeUnit::Day);
    assert!(!chained.is_valid());
    assert!(chained.format_default().is_err());
}

#[test]
fn invalid_span_invalidates_the_result() {
    let value = DateValue::from_iso("2021-11-24T10:00:00.000Z");
    let bad_span = DurationValue::from_json(&serde_json::json!({ "fortnights": 2 }));
    let shifted = value.add(&bad_span);
    assert!(!shifted.is_valid());
    assert!(shifted.to_iso().is_err());
}
