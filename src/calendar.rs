use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// Holiday table plus the non-working weekday set. Recurring entries match
/// on (month, day) in any year; dated entries pin the moving holidays to
/// the year they fall in.
#[derive(Debug)]
pub struct HolidayCalendar {
    pub(crate) fixed: HashSet<(u32, u32)>,
    pub(crate) dated: HashSet<NaiveDate>,
    pub(crate) non_working_days: HashSet<Weekday>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::french(2020, 2030)
    }
}

impl HolidayCalendar {
    /// Empty calendar: no holidays, every weekday working.
    pub fn empty() -> Self {
        Self {
            fixed: HashSet::new(),
            dated: HashSet::new(),
            non_working_days: HashSet::new(),
        }
    }

    /// French public holidays and a Mon-Fri work week, with the moving
    /// holidays enumerated for a range of years (inclusive).
    pub fn french(start_year: i32, end_year: i32) -> Self {
        let mut calendar = Self {
            fixed: HashSet::new(),
            dated: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        };
        calendar.add_french_fixed_holidays();
        for year in start_year..=end_year {
            calendar.add_moving_holidays_for(year);
        }
        calendar
    }

    /// The fixed-date French holidays, year-independent.
    fn add_french_fixed_holidays(&mut self) {
        // Jour de l'an
        self.fixed.insert((1, 1));
        // Fête du Travail
        self.fixed.insert((5, 1));
        // Victoire 1945
        self.fixed.insert((5, 8));
        // Fête Nationale
        self.fixed.insert((7, 14));
        // Assomption
        self.fixed.insert((8, 15));
        // Toussaint
        self.fixed.insert((11, 1));
        // Armistice 1918
        self.fixed.insert((11, 11));
        // Noël
        self.fixed.insert((12, 25));
    }

    /// Easter Monday, Ascension and Whit Monday for a given year.
    pub fn add_moving_holidays_for(&mut self, year: i32) {
        let easter = easter_sunday(year);
        self.dated.insert(easter + Duration::days(1));
        self.dated.insert(easter + Duration::days(39));
        self.dated.insert(easter + Duration::days(50));
    }

    /// Add a single dated holiday.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.dated.insert(date);
    }

    /// Add a year-independent holiday on a fixed month/day.
    pub fn add_fixed_holiday(&mut self, month: u32, day: u32) {
        self.fixed.insert((month, day));
    }

    /// Set custom working days (e.g. Mon-Sat for 6-day weeks).
    pub fn set_working_days(&mut self, days: Vec<Weekday>) {
        self.non_working_days.clear();
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            if !days.contains(&day) {
                self.non_working_days.insert(day);
            }
        }
    }

    /// Day-granularity holiday check: recurring entries match any year,
    /// dated entries match exactly.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.fixed.contains(&(date.month(), date.day())) || self.dated.contains(&date)
    }

    /// Neither a holiday nor a non-working weekday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date) && !self.non_working_days.contains(&date.weekday())
    }

    /// First working day strictly after the given date.
    pub fn next_working_day(&self, from: NaiveDate) -> NaiveDate {
        let mut current = from + Duration::days(1);
        while !self.is_working_day(current) {
            current = current + Duration::days(1);
        }
        current
    }

    /// Count working days in a date range (inclusive).
    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;
        while current <= end {
            if self.is_working_day(current) {
                count += 1;
            }
            current = current + Duration::days(1);
        }
        count
    }
}

/// Gregorian Easter Sunday (Meeus/Jones/Butcher algorithm).
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).unwrap()
}
