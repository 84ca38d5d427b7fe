use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bucket::{bucket_by_day, DayBuckets};
use super::dates::{days_inclusive, end_of_month, start_of_month};
use super::error::Result;
use super::format::per_week;
use super::grid::{build_grid, CalendarGrid};
use super::types::Review;

/// Knobs for building a timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineOptions {
    /// Drop reviews whose `read_count` is zero.
    pub require_read_count: bool,
}

/// The date span covered by a non-empty timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSpan {
    pub first_read: NaiveDate,
    pub last_read: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    /// Days from `month_start` to `month_end`, inclusive.
    pub days: i64,
}

/// Reading totals for one month of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub books: usize,
    pub pages: u64,
}

/// Everything a view needs to render a reading calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// `None` when the user has no finished books.
    pub span: Option<TimelineSpan>,
    pub review_count: usize,
    pub total_pages: u64,
    pub books_per_week: f64,
    pub months: Vec<MonthSummary>,
    pub grid: CalendarGrid,
    pub days: DayBuckets,
}

impl Timeline {
    /// Builds a timeline from reviews ordered by read date.
    pub fn build(reviews: Vec<Review>, options: TimelineOptions) -> Result<Self> {
        let reviews = reviews
            .into_iter()
            .filter(|r| !options.require_read_count || r.read_count > 0);
        let days = bucket_by_day(reviews)?;

        let (Some(first_read), Some(last_read)) = (days.first_day(), days.last_day()) else {
            return Ok(Self::default());
        };

        let month_start = start_of_month(first_read);
        let month_end = end_of_month(last_read);
        let span = TimelineSpan {
            first_read,
            last_read,
            month_start,
            month_end,
            days: days_inclusive(month_start, month_end),
        };

        let grid = build_grid(month_start, month_end);
        let months = grid
            .months
            .iter()
            .map(|month| {
                let reviews = month.days().flat_map(|d| days.get(d));
                let (books, pages) = reviews.fold((0, 0u64), |(books, pages), r| {
                    (books + 1, pages + u64::from(r.pages()))
                });
                MonthSummary {
                    year: month.year,
                    month: month.month,
                    books,
                    pages,
                }
            })
            .collect::<Vec<_>>();

        let review_count = days.review_count();
        let total_pages = months.iter().map(|m| m.pages).sum();

        Ok(Self {
            span: Some(span),
            review_count,
            total_pages,
            books_per_week: per_week(review_count, span.days),
            months,
            grid,
            days,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    /// Returns the summary for a given month, if it is part of the grid.
    pub fn month(&self, year: i32, month: u32) -> Option<&MonthSummary> {
        self.months
            .iter()
            .find(|m| m.year == year && m.month == month)
    }

    /// Returns the busiest day and how many books were finished on it.
    pub fn busiest_day(&self) -> Option<(NaiveDate, usize)> {
        self.days
            .iter()
            .map(|(date, reviews)| (date, reviews.len()))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    }

    /// Number of distinct years with at least one finished book.
    pub fn year_count(&self) -> usize {
        let mut years: Vec<i32> = self.days.iter().map(|(d, _)| d.year()).collect();
        years.dedup();
        years.len()
    }
}
