use serde::{Deserialize, Serialize};

use crate::error::{InvalidKind, TemporalError, TemporalResult};
use crate::unit::{
    MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_MONTH, MS_PER_SECOND, MS_PER_WEEK, MS_PER_YEAR,
};

/// Plain unit breakdown of a duration. Serde rejects keys outside the
/// recognized unit set; missing keys default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitMap {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl UnitMap {
    /// Total length with the variable units scalarized by the fixed
    /// conventions (365-day year, 30-day month).
    pub fn total_ms(&self) -> i128 {
        self.years as i128 * MS_PER_YEAR as i128
            + self.months as i128 * MS_PER_MONTH as i128
            + self.weeks as i128 * MS_PER_WEEK as i128
            + self.days as i128 * MS_PER_DAY as i128
            + self.hours as i128 * MS_PER_HOUR as i128
            + self.minutes as i128 * MS_PER_MINUTE as i128
            + self.seconds as i128 * MS_PER_SECOND as i128
            + self.milliseconds as i128
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    Valid(UnitMap),
    Invalid(InvalidKind),
}

/// Immutable composite length of time across calendar units, or a carried
/// Invalid marker. Deliberately not a single scalar: month and day lengths
/// vary, so the breakdown is kept until a caller asks for one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationValue {
    repr: Repr,
}

impl DurationValue {
    pub fn zero() -> DurationValue {
        Self::from_units(UnitMap::default())
    }

    pub fn from_units(units: UnitMap) -> DurationValue {
        DurationValue {
            repr: Repr::Valid(units),
        }
    }

    /// Rewrap an existing value. Idempotent, Invalid included.
    pub fn from_value(value: &DurationValue) -> DurationValue {
        *value
    }

    /// Dynamic mapping input. A non-mapping shape or any key outside the
    /// recognized unit set yields an Invalid value, never a panic.
    pub fn from_json(value: &serde_json::Value) -> DurationValue {
        if !value.is_object() {
            return Self::invalid(InvalidKind::UnsupportedShape);
        }
        match serde_json::from_value::<UnitMap>(value.clone()) {
            Ok(units) => Self::from_units(units),
            Err(_) => Self::invalid(InvalidKind::UnknownUnit),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.repr, Repr::Valid(_))
    }

    pub fn invalid_kind(&self) -> Option<InvalidKind> {
        match self.repr {
            Repr::Valid(_) => None,
            Repr::Invalid(kind) => Some(kind),
        }
    }

    /// The current unit breakdown as a plain mapping.
    pub fn to_object(&self) -> TemporalResult<UnitMap> {
        self.units()
    }

    /// Total milliseconds under the fixed conventions.
    pub fn as_ms(&self) -> TemporalResult<i64> {
        i64::try_from(self.units()?.total_ms())
            .map_err(|_| TemporalError::InvalidDuration(InvalidKind::OutOfRange))
    }

    /// Total fractional hours under the fixed conventions.
    pub fn as_hours(&self) -> TemporalResult<f64> {
        Ok(self.units()?.total_ms() as f64 / MS_PER_HOUR as f64)
    }

    /// Hours-and-minutes view: every larger unit folds into hours, so two
    /// days and one hour render `49h`. The minute remainder is zero-padded
    /// to two digits when present (`1h02`) and omitted when zero (`13h`).
    /// Sub-minute remainders are dropped, never rounded up.
    pub fn format(&self) -> TemporalResult<String> {
        let total = self.units()?.total_ms();
        let sign = if total < 0 { "-" } else { "" };
        let magnitude = total.unsigned_abs();
        let hours = magnitude / MS_PER_HOUR as u128;
        let minutes = (magnitude % MS_PER_HOUR as u128) / MS_PER_MINUTE as u128;
        Ok(if minutes == 0 {
            format!("{sign}{hours}h")
        } else {
            format!("{sign}{hours}h{minutes:02}")
        })
    }

    /// Component-wise sum. Accepts every constructor shape; associative and
    /// commutative in total milliseconds. Invalid inputs absorb.
    pub fn add(&self, other: impl Into<DurationValue>) -> DurationValue {
        let a = match self.repr {
            Repr::Valid(units) => units,
            Repr::Invalid(kind) => return Self::invalid(kind),
        };
        let b = match other.into().repr {
            Repr::Valid(units) => units,
            Repr::Invalid(kind) => return Self::invalid(kind),
        };
        Self::from_units(UnitMap {
            years: a.years + b.years,
            months: a.months + b.months,
            weeks: a.weeks + b.weeks,
            days: a.days + b.days,
            hours: a.hours + b.hours,
            minutes: a.minutes + b.minutes,
            seconds: a.seconds + b.seconds,
            milliseconds: a.milliseconds + b.milliseconds,
        })
    }

    pub(crate) fn invalid(kind: InvalidKind) -> DurationValue {
        DurationValue {
            repr: Repr::Invalid(kind),
        }
    }

    fn units(&self) -> TemporalResult<UnitMap> {
        match self.repr {
            Repr::Valid(units) => Ok(units),
            Repr::Invalid(kind) => Err(TemporalError::InvalidDuration(kind)),
        }
    }
}

impl From<UnitMap> for DurationValue {
    fn from(value: UnitMap) -> Self {
        DurationValue::from_units(value)
    }
}

impl From<&DurationValue> for DurationValue {
    fn from(value: &DurationValue) -> Self {
        *value
    }
}
