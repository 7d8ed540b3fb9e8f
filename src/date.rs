use std::time::SystemTime;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, Locale, Months, NaiveDate, NaiveDateTime,
    NaiveTime, SecondsFormat, TimeZone, Timelike, Utc,
};

use crate::calendar::HolidayCalendar;
use crate::clock::Clock;
use crate::duration::DurationValue;
use crate::error::{InvalidKind, TemporalError, TemporalResult};
use crate::pattern::{self, DEFAULT_FORMAT};
use crate::unit::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, TimeUnit};

/// Which wall clock the calendar-facing operations (formatting, unit
/// boundaries, bucket comparison) read for this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneBasis {
    Utc,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    Valid {
        instant: DateTime<Utc>,
        zone: ZoneBasis,
    },
    Invalid(InvalidKind),
}

/// Immutable point in time at millisecond precision, or a carried Invalid
/// marker. Every operation returns a new value; nothing here mutates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateValue {
    repr: Repr,
}

impl DateValue {
    /// Current instant from the injected clock, local zone basis.
    pub fn now(clock: &impl Clock) -> DateValue {
        Self::valid(truncate_to_millis(clock.now()), ZoneBasis::Local)
    }

    /// Rewrap an existing value. Idempotent: the copy is observably
    /// identical to the original, Invalid included.
    pub fn from_value(value: &DateValue) -> DateValue {
        *value
    }

    /// Wrap a native UTC instant.
    pub fn from_instant(instant: DateTime<Utc>) -> DateValue {
        Self::valid(truncate_to_millis(instant), ZoneBasis::Utc)
    }

    /// Strict ISO-8601. Offset-carrying strings keep the UTC basis; naive
    /// datetime and date-only forms resolve in the local zone. Anything
    /// else yields an Invalid value, never an error.
    pub fn from_iso(input: &str) -> DateValue {
        let trimmed = input.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::valid(truncate_to_millis(parsed.with_timezone(&Utc)), ZoneBasis::Utc);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Self::from_civil(naive, ZoneBasis::Local);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::from_civil(NaiveDateTime::new(date, NaiveTime::MIN), ZoneBasis::Local);
        }
        tracing::debug!(input = trimmed, "date input did not parse as ISO-8601");
        Self::invalid(InvalidKind::Unparsable)
    }

    /// Parse `value` against a token pattern. A trailing literal `Z` on the
    /// value pins the parse to UTC; otherwise the local zone is used with no
    /// inference.
    pub fn from_pattern(value: &str, pattern: &str) -> DateValue {
        let trimmed = value.trim();
        let (bare, pattern, zone) = match trimmed.strip_suffix('Z') {
            Some(bare) => (bare, strip_zone_token(pattern), ZoneBasis::Utc),
            None => (trimmed, pattern, ZoneBasis::Local),
        };
        let fmt = pattern::to_chrono_format(pattern);
        if let Ok(naive) = NaiveDateTime::parse_from_str(bare, &fmt) {
            return Self::from_civil(naive, zone);
        }
        if let Ok(date) = NaiveDate::parse_from_str(bare, &fmt) {
            return Self::from_civil(NaiveDateTime::new(date, NaiveTime::MIN), zone);
        }
        tracing::debug!(value = trimmed, pattern, "date input did not match pattern");
        Self::invalid(InvalidKind::Unparsable)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.repr, Repr::Valid { .. })
    }

    pub fn invalid_kind(&self) -> Option<InvalidKind> {
        match self.repr {
            Repr::Valid { .. } => None,
            Repr::Invalid(kind) => Some(kind),
        }
    }

    /// The canonical instant behind this value.
    pub fn to_instant(&self) -> TemporalResult<DateTime<Utc>> {
        Ok(self.parts()?.0)
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> TemporalResult<i64> {
        Ok(self.parts()?.0.timestamp_millis())
    }

    /// ISO-8601 rendering of the instant in the value's own zone basis.
    pub fn to_iso(&self) -> TemporalResult<String> {
        let (instant, zone) = self.parts()?;
        Ok(match zone {
            ZoneBasis::Utc => instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            ZoneBasis::Local => instant
                .with_timezone(&Local)
                .to_rfc3339_opts(SecondsFormat::Millis, false),
        })
    }

    /// Render with the token pattern, French day and month names.
    pub fn format(&self, pattern: &str) -> TemporalResult<String> {
        let (instant, zone) = self.parts()?;
        let fmt = pattern::to_chrono_format(pattern);
        Ok(match zone {
            ZoneBasis::Utc => instant.format_localized(&fmt, Locale::fr_FR).to_string(),
            ZoneBasis::Local => instant
                .with_timezone(&Local)
                .format_localized(&fmt, Locale::fr_FR)
                .to_string(),
        })
    }

    pub fn format_default(&self) -> TemporalResult<String> {
        self.format(DEFAULT_FORMAT)
    }

    /// True when both values fall in the same calendar bucket at `unit`
    /// granularity, read in this value's zone basis.
    pub fn is_same(&self, other: impl Into<DateValue>, unit: TimeUnit) -> TemporalResult<bool> {
        let (instant, zone) = self.parts()?;
        let (other_instant, _) = other.into().parts()?;
        let a = truncate_civil(civil_in(instant, zone), unit);
        let b = truncate_civil(civil_in(other_instant, zone), unit);
        Ok(a == b)
    }

    pub fn is_before(&self, other: impl Into<DateValue>) -> TemporalResult<bool> {
        let (a, _) = self.parts()?;
        let (b, _) = other.into().parts()?;
        Ok(a < b)
    }

    pub fn is_after(&self, other: impl Into<DateValue>) -> TemporalResult<bool> {
        let (a, _) = self.parts()?;
        let (b, _) = other.into().parts()?;
        Ok(a > b)
    }

    pub fn is_same_or_before(&self, other: impl Into<DateValue>) -> TemporalResult<bool> {
        let (a, _) = self.parts()?;
        let (b, _) = other.into().parts()?;
        Ok(a <= b)
    }

    pub fn is_same_or_after(&self, other: impl Into<DateValue>) -> TemporalResult<bool> {
        let (a, _) = self.parts()?;
        let (b, _) = other.into().parts()?;
        Ok(a >= b)
    }

    /// Inclusive range check on the instant.
    pub fn is_same_or_between(
        &self,
        min: impl Into<DateValue>,
        max: impl Into<DateValue>,
    ) -> TemporalResult<bool> {
        let (a, _) = self.parts()?;
        let (lo, _) = min.into().parts()?;
        let (hi, _) = max.into().parts()?;
        Ok(lo <= a && a <= hi)
    }

    /// Signed `self - other` in `unit`, truncated toward zero: a gap of one
    /// day and thirteen hours reports 1, and a gap of minus five days and
    /// twenty-two hours reports -5.
    pub fn diff(&self, other: impl Into<DateValue>, unit: TimeUnit) -> TemporalResult<i64> {
        Ok(self.diff_parts(other.into(), unit)?.0)
    }

    /// Signed fractional `self - other` in `unit`.
    pub fn diff_exact(&self, other: impl Into<DateValue>, unit: TimeUnit) -> TemporalResult<f64> {
        Ok(self.diff_parts(other.into(), unit)?.1)
    }

    fn diff_parts(&self, other: DateValue, unit: TimeUnit) -> TemporalResult<(i64, f64)> {
        let (instant, zone) = self.parts()?;
        let (other_instant, _) = other.parts()?;
        match unit {
            // Calendar-aware: whole clamped calendar steps plus the
            // fraction of the next step.
            TimeUnit::Year | TimeUnit::Month => {
                let step = if unit == TimeUnit::Year { 12 } else { 1 };
                Ok(calendar_span(
                    civil_in(instant, zone),
                    civil_in(other_instant, zone),
                    step,
                ))
            }
            _ => {
                let delta = instant.timestamp_millis() - other_instant.timestamp_millis();
                let len = unit.fixed_ms();
                Ok((delta / len, delta as f64 / len as f64))
            }
        }
    }

    /// Calendar arithmetic over a duration-like span. Month steps clamp the
    /// day-of-month. Invalid inputs absorb.
    pub fn add(&self, span: impl Into<DurationValue>) -> DateValue {
        self.shifted(span.into(), 1)
    }

    pub fn subtract(&self, span: impl Into<DurationValue>) -> DateValue {
        self.shifted(span.into(), -1)
    }

    fn shifted(&self, span: DurationValue, sign: i128) -> DateValue {
        let (instant, zone) = match self.repr {
            Repr::Valid { instant, zone } => (instant, zone),
            Repr::Invalid(kind) => return Self::invalid(kind),
        };
        let units = match span.to_object() {
            Ok(units) => units,
            Err(_) => {
                return Self::invalid(span.invalid_kind().unwrap_or(InvalidKind::UnsupportedShape));
            }
        };
        let months = sign * (units.years as i128 * 12 + units.months as i128);
        let days = sign * (units.weeks as i128 * 7 + units.days as i128);
        let ms = sign
            * (units.hours as i128 * MS_PER_HOUR as i128
                + units.minutes as i128 * MS_PER_MINUTE as i128
                + units.seconds as i128 * MS_PER_SECOND as i128
                + units.milliseconds as i128);
        match shift_civil(civil_in(instant, zone), months, days, ms) {
            Some(shifted) => Self::from_civil(shifted, zone),
            None => Self::invalid(InvalidKind::OutOfRange),
        }
    }

    /// First instant of the unit containing this value, in its own zone
    /// basis. Weeks start on Monday.
    pub fn start_of(&self, unit: TimeUnit) -> DateValue {
        let (instant, zone) = match self.repr {
            Repr::Valid { instant, zone } => (instant, zone),
            Repr::Invalid(kind) => return Self::invalid(kind),
        };
        Self::from_civil(truncate_civil(civil_in(instant, zone), unit), zone)
    }

    /// Last millisecond of the unit containing this value.
    pub fn end_of(&self, unit: TimeUnit) -> DateValue {
        let (instant, zone) = match self.repr {
            Repr::Valid { instant, zone } => (instant, zone),
            Repr::Invalid(kind) => return Self::invalid(kind),
        };
        let start = truncate_civil(civil_in(instant, zone), unit);
        let next = match unit {
            TimeUnit::Year => shift_months(start, 12),
            TimeUnit::Month => shift_months(start, 1),
            other => start + Duration::milliseconds(other.fixed_ms()),
        };
        Self::from_civil(next - Duration::milliseconds(1), zone)
    }

    /// Day-granularity lookup against the supplied holiday table.
    pub fn is_holiday(&self, calendar: &HolidayCalendar) -> TemporalResult<bool> {
        let (instant, zone) = self.parts()?;
        Ok(calendar.is_holiday(civil_in(instant, zone).date()))
    }

    fn valid(instant: DateTime<Utc>, zone: ZoneBasis) -> DateValue {
        DateValue {
            repr: Repr::Valid { instant, zone },
        }
    }

    pub(crate) fn invalid(kind: InvalidKind) -> DateValue {
        DateValue {
            repr: Repr::Invalid(kind),
        }
    }

    fn from_civil(naive: NaiveDateTime, zone: ZoneBasis) -> DateValue {
        match resolve_civil(naive, zone) {
            Some(instant) => Self::valid(truncate_to_millis(instant), zone),
            None => Self::invalid(InvalidKind::OutOfRange),
        }
    }

    fn parts(&self) -> TemporalResult<(DateTime<Utc>, ZoneBasis)> {
        match self.repr {
            Repr::Valid { instant, zone } => Ok((instant, zone)),
            Repr::Invalid(kind) => Err(TemporalError::InvalidDate(kind)),
        }
    }
}

impl From<&DateValue> for DateValue {
    fn from(value: &DateValue) -> Self {
        *value
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateValue::from_instant(value)
    }
}

impl From<DateTime<FixedOffset>> for DateValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateValue::from_instant(value.with_timezone(&Utc))
    }
}

impl From<DateTime<Local>> for DateValue {
    fn from(value: DateTime<Local>) -> Self {
        DateValue::valid(
            truncate_to_millis(value.with_timezone(&Utc)),
            ZoneBasis::Local,
        )
    }
}

impl From<SystemTime> for DateValue {
    fn from(value: SystemTime) -> Self {
        DateValue::from_instant(value.into())
    }
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::from_iso(value)
    }
}

fn strip_zone_token(pattern: &str) -> &str {
    pattern
        .strip_suffix("'Z'")
        .or_else(|| pattern.strip_suffix('Z'))
        .unwrap_or(pattern)
}

fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(instant.timestamp_millis())
        .expect("millisecond timestamp stays in range")
}

fn civil_in(instant: DateTime<Utc>, zone: ZoneBasis) -> NaiveDateTime {
    match zone {
        ZoneBasis::Utc => instant.naive_utc(),
        ZoneBasis::Local => instant.with_timezone(&Local).naive_local(),
    }
}

fn resolve_civil(naive: NaiveDateTime, zone: ZoneBasis) -> Option<DateTime<Utc>> {
    match zone {
        ZoneBasis::Utc => Some(Utc.from_utc_datetime(&naive)),
        // A civil time inside a local-zone gap has no instant; the caller
        // turns None into an Invalid value.
        ZoneBasis::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|resolved| resolved.with_timezone(&Utc)),
    }
}

fn truncate_civil(naive: NaiveDateTime, unit: TimeUnit) -> NaiveDateTime {
    let date = naive.date();
    match unit {
        TimeUnit::Year => with_midnight(NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap()),
        TimeUnit::Month => with_midnight(date.with_day(1).unwrap()),
        TimeUnit::Week => {
            with_midnight(date - Duration::days(date.weekday().num_days_from_monday() as i64))
        }
        TimeUnit::Day => with_midnight(date),
        TimeUnit::Hour => NaiveDateTime::new(
            date,
            NaiveTime::from_hms_opt(naive.hour(), 0, 0).unwrap(),
        ),
        TimeUnit::Minute => NaiveDateTime::new(
            date,
            NaiveTime::from_hms_opt(naive.hour(), naive.minute(), 0).unwrap(),
        ),
        TimeUnit::Second => NaiveDateTime::new(
            date,
            NaiveTime::from_hms_opt(naive.hour(), naive.minute(), naive.second()).unwrap(),
        ),
        TimeUnit::Millisecond => naive,
    }
}

fn with_midnight(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, NaiveTime::MIN)
}

// Signed span `a - b` counted in calendar steps of `months_per_step`
// (1 = months, 12 = years): the whole step count truncated toward zero,
// and the exact value including the fraction of the next step.
fn calendar_span(a: NaiveDateTime, b: NaiveDateTime, months_per_step: i64) -> (i64, f64) {
    if a < b {
        let (whole, exact) = calendar_span(b, a, months_per_step);
        return (-whole, -exact);
    }
    let month_gap =
        (a.year() as i64 - b.year() as i64) * 12 + (a.month() as i64 - b.month() as i64);
    let mut whole = month_gap / months_per_step;
    while whole > 0 && shift_months(b, whole * months_per_step) > a {
        whole -= 1;
    }
    while shift_months(b, (whole + 1) * months_per_step) <= a {
        whole += 1;
    }
    let anchor = shift_months(b, whole * months_per_step);
    let next = shift_months(b, (whole + 1) * months_per_step);
    let span_ms = (next - anchor).num_milliseconds();
    let rem_ms = (a - anchor).num_milliseconds();
    let fraction = if span_ms > 0 {
        rem_ms as f64 / span_ms as f64
    } else {
        0.0
    };
    (whole, whole as f64 + fraction)
}

fn shift_months(base: NaiveDateTime, months: i64) -> NaiveDateTime {
    if months >= 0 {
        base.checked_add_months(Months::new(months as u32))
    } else {
        base.checked_sub_months(Months::new((-months) as u32))
    }
    .expect("month shift stays in range")
}

fn shift_civil(base: NaiveDateTime, months: i128, days: i128, ms: i128) -> Option<NaiveDateTime> {
    let months = i64::try_from(months).ok()?;
    let days = i64::try_from(days).ok()?;
    let ms = i64::try_from(ms).ok()?;
    let with_months = if months >= 0 {
        base.checked_add_months(Months::new(u32::try_from(months).ok()?))
    } else {
        base.checked_sub_months(Months::new(u32::try_from(months.unsigned_abs()).ok()?))
    }?;
    let with_days = with_months.checked_add_signed(Duration::try_days(days)?)?;
    with_days.checked_add_signed(Duration::try_milliseconds(ms)?)
}
