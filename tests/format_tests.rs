use temporal_tool::{DateValue, TimeUnit};

#[test]
fn french_day_and_month_names() {
    // 2021-11-24 is a Wednesday.
    let value = DateValue::from_iso("2021-11-24T10:05:00.000Z");
    assert_eq!(
        value.format("cccc dd LLLL yyyy").unwrap(),
        "mercredi 24 novembre 2021"
    );
}

#[test]
fn weekday_and_month_token_aliases_agree() {
    let value = DateValue::from_iso("2021-11-24T10:05:00.000Z");
    assert_eq!(
        value.format("EEEE MMMM").unwrap(),
        value.format("cccc LLLL").unwrap()
    );
}

#[test]
fn default_format_is_day_month_year_hour_minute() {
    let value = DateValue::from_iso("2021-11-24T10:05:00.000Z");
    assert_eq!(value.format_default().unwrap(), "24/11/2021 10:05");
    assert_eq!(
        value.format("dd/LL/yyyy HH:mm").unwrap(),
        value.format_default().unwrap()
    );
}

#[test]
fn quoted_literals_render_verbatim() {
    let value = DateValue::from_iso("2021-11-24T10:05:00.000Z");
    assert_eq!(value.format("HH'h'mm").unwrap(), "10h05");
}

#[test]
fn unpadded_tokens_drop_leading_zeros() {
    let value = DateValue::from_iso("2021-03-05T08:04:00.000Z");
    assert_eq!(value.format("d/L/yyyy").unwrap(), "5/3/2021");
    assert_eq!(value.format("dd/LL/yyyy").unwrap(), "05/03/2021");
    assert_eq!(value.format("H:m").unwrap(), "8:4");
}

#[test]
fn millisecond_token_is_three_digits() {
    let value = DateValue::from_iso("2021-11-24T10:05:07.042Z");
    assert_eq!(value.format("ss.SSS").unwrap(), "07.042");
}

#[test]
fn format_then_parse_round_trips_at_pattern_precision() {
    let pattern = "dd/LL/yyyy HH:mm";
    let value = DateValue::from_pattern("24/11/2021 10:05", pattern);
    let rendered = value.format(pattern).unwrap();
    assert_eq!(rendered, "24/11/2021 10:05");
    let reparsed = DateValue::from_pattern(&rendered, pattern);
    assert!(reparsed.is_same(&value, TimeUnit::Minute).unwrap());
}

#[test]
fn utc_round_trip_through_the_full_pattern() {
    let pattern = "yyyy-LL-dd'T'HH:mm:ss.SSS'Z'";
    let value = DateValue::from_iso("2021-11-24T10:05:07.042Z");
    let rendered = value.format(pattern).unwrap();
    assert_eq!(rendered, "2021-11-24T10:05:07.042Z");
    let reparsed = DateValue::from_pattern(&rendered, pattern);
    assert!(reparsed.is_same(&value, TimeUnit::Millisecond).unwrap());
}

#[test]
fn format_on_invalid_is_an_explicit_error() {
    let broken = DateValue::from_iso("garbage");
    assert!(broken.format("dd/LL/yyyy").is_err());
}
