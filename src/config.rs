use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::HolidayCalendar;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Serialize, Deserialize)]
struct CalendarSnapshot {
    fixed: Vec<FixedHoliday>,
    dated: Vec<NaiveDate>,
    non_working_days: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct FixedHoliday {
    month: u32,
    day: u32,
}

impl CalendarSnapshot {
    fn from_calendar(calendar: &HolidayCalendar) -> Self {
        let mut fixed: Vec<FixedHoliday> = calendar
            .fixed
            .iter()
            .map(|&(month, day)| FixedHoliday { month, day })
            .collect();
        fixed.sort_by_key(|entry| (entry.month, entry.day));
        let mut dated: Vec<NaiveDate> = calendar.dated.iter().copied().collect();
        dated.sort();
        let mut non_working_days: Vec<String> = calendar
            .non_working_days
            .iter()
            .map(|day| day.to_string())
            .collect();
        non_working_days.sort();
        Self {
            fixed,
            dated,
            non_working_days,
        }
    }

    fn into_calendar(self) -> ConfigResult<HolidayCalendar> {
        let mut calendar = HolidayCalendar::empty();
        for entry in &self.fixed {
            validate_month_day(entry.month, entry.day)?;
            calendar.add_fixed_holiday(entry.month, entry.day);
        }
        for date in self.dated {
            calendar.add_holiday(date);
        }
        for name in &self.non_working_days {
            let day = parse_weekday(name)?;
            calendar.non_working_days.insert(day);
        }
        Ok(calendar)
    }
}

pub fn save_calendar_to_json<P: AsRef<Path>>(
    calendar: &HolidayCalendar,
    path: P,
) -> ConfigResult<()> {
    let snapshot = CalendarSnapshot::from_calendar(calendar);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_calendar_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<HolidayCalendar> {
    let file = File::open(path)?;
    let snapshot: CalendarSnapshot = serde_json::from_reader(file)?;
    let calendar = snapshot.into_calendar()?;
    tracing::debug!(
        fixed = calendar.fixed.len(),
        dated = calendar.dated.len(),
        "loaded holiday calendar from json"
    );
    Ok(calendar)
}

#[derive(Serialize, Deserialize)]
struct HolidayCsvRecord {
    kind: String,
    month: String,
    day: String,
    date: String,
}

pub fn save_calendar_to_csv<P: AsRef<Path>>(
    calendar: &HolidayCalendar,
    path: P,
) -> ConfigResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    let snapshot = CalendarSnapshot::from_calendar(calendar);
    for entry in &snapshot.fixed {
        writer.serialize(HolidayCsvRecord {
            kind: "fixed".to_string(),
            month: entry.month.to_string(),
            day: entry.day.to_string(),
            date: String::new(),
        })?;
    }
    for date in &snapshot.dated {
        writer.serialize(HolidayCsvRecord {
            kind: "dated".to_string(),
            month: String::new(),
            day: String::new(),
            date: format_date(*date),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_calendar_from_csv<P: AsRef<Path>>(path: P) -> ConfigResult<HolidayCalendar> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut calendar = HolidayCalendar::empty();
    // CSV stores only the holiday rows; the work week defaults to Mon-Fri.
    // Callers can adjust the non-working set after load if needed.
    calendar.non_working_days = HashSet::from([Weekday::Sat, Weekday::Sun]);
    let mut rows = 0;
    for record in reader.deserialize::<HolidayCsvRecord>() {
        let record = record?;
        rows += 1;
        match record.kind.trim() {
            "fixed" => {
                let month = parse_u32(&record.month)?;
                let day = parse_u32(&record.day)?;
                validate_month_day(month, day)?;
                calendar.add_fixed_holiday(month, day);
            }
            "dated" => {
                calendar.add_holiday(parse_date(&record.date)?);
            }
            other => {
                return Err(ConfigError::InvalidData(format!(
                    "invalid holiday kind '{other}'"
                )));
            }
        }
    }

    if rows == 0 {
        return Err(ConfigError::InvalidData(
            "CSV file contained no holiday entries".into(),
        ));
    }

    tracing::debug!(rows, "loaded holiday calendar from csv");
    Ok(calendar)
}

pub fn validate_month_day(month: u32, day: u32) -> ConfigResult<()> {
    // Probe a leap year so a recurring Feb 29 entry is accepted.
    if NaiveDate::from_ymd_opt(2024, month, day).is_none() {
        return Err(ConfigError::InvalidData(format!(
            "invalid month/day pair {month}/{day}"
        )));
    }
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(input: &str) -> ConfigResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| ConfigError::InvalidData(format!("invalid date '{input}': {e}")))
}

fn parse_u32(input: &str) -> ConfigResult<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidData(format!("invalid integer '{input}': {e}")))
}

fn parse_weekday(input: &str) -> ConfigResult<Weekday> {
    Weekday::from_str(input.trim())
        .map_err(|_| ConfigError::InvalidData(format!("invalid weekday '{input}'")))
}
