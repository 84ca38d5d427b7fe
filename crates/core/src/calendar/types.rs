use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::serde::{
    deserialize_number_or_default, deserialize_optional_number, deserialize_optional_string,
    deserialize_string_or_empty,
};

use super::dates::{parse_read_at, read_day};
use super::error::{CalendarError, Result};

/// A book as described by the reading API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub num_pages: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub average_rating: f32,
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub ratings_count: u64,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub published: Option<i32>,
}

impl Book {
    /// Creates a book with the given title and author.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            image_url: None,
            num_pages: None,
            average_rating: 0.0,
            ratings_count: 0,
            published: None,
        }
    }

    /// Sets a specific ID for this book.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Sets the page count for this book.
    pub fn with_pages(mut self, num_pages: u32) -> Self {
        self.num_pages = Some(num_pages);
        self
    }

    /// Sets the cover thumbnail URL for this book.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// A review on the user's "read" shelf.
///
/// `read_at` is kept in the API's textual format. It is empty for books that
/// were shelved without being marked as finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub id: u64,
    pub book: Book,
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub rating: u8,
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub read_count: u32,
    #[serde(default, deserialize_with = "deserialize_string_or_empty")]
    pub read_at: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub started_at: Option<String>,
}

impl Review {
    /// Creates a review of `book` finished at `read_at`.
    pub fn new(book: Book, read_at: impl Into<String>) -> Self {
        Self {
            id: 0,
            book,
            rating: 0,
            read_count: 1,
            read_at: read_at.into(),
            started_at: None,
        }
    }

    /// Sets a specific ID for this review.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Sets the star rating for this review.
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    /// Sets how many times the book was read.
    pub fn with_read_count(mut self, read_count: u32) -> Self {
        self.read_count = read_count;
        self
    }

    /// Returns true if the review carries a read date.
    pub fn is_read(&self) -> bool {
        !self.read_at.trim().is_empty()
    }

    /// Parses the read timestamp, keeping its original offset.
    pub fn read_at(&self) -> Result<DateTime<FixedOffset>> {
        if !self.is_read() {
            return Err(CalendarError::MissingReadDate {
                review_id: self.id,
            });
        }
        parse_read_at(&self.read_at)
    }

    /// Returns the UTC calendar day on which the book was finished.
    pub fn read_date(&self) -> Result<NaiveDate> {
        self.read_at().map(read_day)
    }

    /// Returns the page count, or zero when the API doesn't know it.
    pub fn pages(&self) -> u32 {
        self.book.num_pages.unwrap_or(0)
    }
}

/// A reading API user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_number_or_default")]
    pub reviews_count: u64,
}

impl Profile {
    /// Creates a profile with the given ID and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            link: None,
            image_url: None,
            reviews_count: 0,
        }
    }

    /// Sets the number of reviews the user has.
    pub fn with_reviews_count(mut self, reviews_count: u64) -> Self {
        self.reviews_count = reviews_count;
        self
    }
}
