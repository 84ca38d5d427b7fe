use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::{days_inclusive, end_of_month, start_of_month};

/// Number of slots in a week row, indexed 0=Sunday..6=Saturday.
pub const DAYS_PER_WEEK: usize = 7;

/// One week row of a month. Slots outside the month are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(pub [Option<NaiveDate>; DAYS_PER_WEEK]);

impl Week {
    /// Returns the date in the given weekday slot (0=Sunday).
    pub fn slot(&self, weekday: usize) -> Option<NaiveDate> {
        self.0.get(weekday).copied().flatten()
    }

    /// Iterates over the concrete dates of this week, Sunday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().filter_map(|slot| *slot)
    }
}

/// The week rows of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

impl Month {
    fn starting(first_day: NaiveDate) -> Self {
        Self {
            year: first_day.year(),
            month: first_day.month(),
            weeks: vec![Week::default()],
        }
    }

    /// Returns a display label such as `March 2021`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// Iterates over the concrete dates of this month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flat_map(|w| w.days())
    }
}

/// Month -> week -> day skeleton covering a contiguous span of whole months.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub months: Vec<Month>,
}

impl CalendarGrid {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Iterates over every placed date in slot order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.months.iter().flat_map(|m| m.days())
    }

    /// Total number of placed dates.
    pub fn day_count(&self) -> usize {
        self.dates().count()
    }
}

/// Builds the calendar grid from the month of `month_start` through the end
/// of the month of `range_end`.
///
/// A new month row begins on every first of the month; within a month a new
/// week row begins on every Sunday. A month that starts on a Sunday therefore
/// has no blank leading week. Returns an empty grid when `range_end` falls in
/// an earlier month than `month_start`.
pub fn build_grid(month_start: NaiveDate, range_end: NaiveDate) -> CalendarGrid {
    let start = start_of_month(month_start);
    let end = end_of_month(range_end);

    if end < start {
        return CalendarGrid::default();
    }

    let total_days = days_inclusive(start, end) as usize;
    let mut months: Vec<Month> = Vec::new();

    for date in start.iter_days().take(total_days) {
        let weekday = date.weekday().num_days_from_sunday() as usize;

        if date.day() == 1 {
            months.push(Month::starting(date));
        } else if weekday == 0 {
            if let Some(month) = months.last_mut() {
                month.weeks.push(Week::default());
            }
        }

        if let Some(week) = months.last_mut().and_then(|m| m.weeks.last_mut()) {
            week.0[weekday] = Some(date);
        }
    }

    CalendarGrid { months }
}
