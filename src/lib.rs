pub mod calendar;
pub mod clock;
pub mod config;
pub mod date;
pub mod duration;
pub mod error;
pub mod pattern;
pub mod unit;

pub use calendar::HolidayCalendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{DateValue, ZoneBasis};
pub use duration::{DurationValue, UnitMap};
pub use error::{InvalidKind, TemporalError, TemporalResult};
pub use unit::TimeUnit;
