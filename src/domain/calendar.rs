//! Toll-free dates: weekends and the public holiday calendar

use chrono::{Datelike, NaiveDate, Weekday};

/// Public holidays (and holiday-adjacent toll-free days) for 2013, as
/// (month, day). July is entirely toll-free and listed day by day.
const HOLIDAYS_2013: &[(u32, u32)] = &[
    (1, 1),
    (3, 28),
    (3, 29),
    (4, 1),
    (4, 30),
    (5, 1),
    (5, 8),
    (5, 9),
    (6, 5),
    (6, 6),
    (6, 21),
    (11, 1),
    (12, 24),
    (12, 25),
    (12, 26),
    (12, 31),
];

/// Lookup table of toll-free dates.
///
/// Weekends are always toll-free; holidays come from a static per-year
/// set. Immutable and shared by reference across evaluations; in
/// production the holiday set could be swapped for a database-backed
/// table without touching the calculator.
#[derive(Debug, Clone)]
pub struct TollCalendar {
    holidays: Vec<NaiveDate>,
}

impl TollCalendar {
    /// Build a calendar from an explicit holiday set.
    pub fn new(holidays: Vec<NaiveDate>) -> Self {
        Self { holidays }
    }

    /// Whether `date` is listed as a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether no fee applies on `date`: Saturday, Sunday, or a listed
    /// holiday.
    pub fn is_toll_free(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || self.is_holiday(date)
    }

    /// Listed holidays falling in `year`, in calendar order.
    pub fn holidays_in(&self, year: i32) -> Vec<NaiveDate> {
        self.holidays
            .iter()
            .copied()
            .filter(|date| date.year() == year)
            .collect()
    }
}

impl Default for TollCalendar {
    fn default() -> Self {
        let mut holidays: Vec<NaiveDate> = HOLIDAYS_2013
            .iter()
            .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(2013, month, day))
            .collect();
        // all of July 2013 is toll-free
        holidays.extend((1..=31).filter_map(|day| NaiveDate::from_ymd_opt(2013, 7, day)));
        holidays.sort_unstable();
        Self { holidays }
    }
}
