use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::parse_iso_date;
use super::error::Result;
use super::types::Review;

/// Reviews grouped by the UTC day they were finished on.
///
/// The map is sparse: days without reviews have no key. Lookups for such
/// days return an empty slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayBuckets(BTreeMap<NaiveDate, Vec<Review>>);

impl DayBuckets {
    /// Creates an empty set of buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reviews finished on `date`.
    pub fn get(&self, date: NaiveDate) -> &[Review] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the reviews for an ISO day key (`YYYY-MM-DD`).
    pub fn get_iso(&self, key: &str) -> &[Review] {
        parse_iso_date(key).map(|d| self.get(d)).unwrap_or(&[])
    }

    /// Returns true if at least one review was finished on `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    /// Number of days with at least one review.
    pub fn day_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of reviews across all days.
    pub fn review_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earliest day with a review.
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.0.keys().next().copied()
    }

    /// Latest day with a review.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.0.keys().next_back().copied()
    }

    /// Iterates over days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Review])> {
        self.0.iter().map(|(date, reviews)| (*date, reviews.as_slice()))
    }

    fn push(&mut self, date: NaiveDate, review: Review) {
        self.0.entry(date).or_default().push(review);
    }
}

/// Groups reviews by the UTC day of their read date.
///
/// Reviews for the same day keep their relative input order. Fails on the
/// first review whose read date is missing or malformed.
pub fn bucket_by_day<I>(reviews: I) -> Result<DayBuckets>
where
    I: IntoIterator<Item = Review>,
{
    let mut buckets = DayBuckets::new();

    for review in reviews {
        let date = review.read_date()?;
        buckets.push(date, review);
    }

    Ok(buckets)
}
