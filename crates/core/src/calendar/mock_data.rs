//! Mock data generation for demos and tests.
//!
//! Pure functions producing a plausible reading history. Output is
//! deterministic so it can back snapshot-style assertions.

use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use super::dates::format_read_at;
use super::types::{Book, Profile, Review};

const TITLES: [(&str, &str, u32); 8] = [
    ("The Left Hand of Darkness", "Ursula K. Le Guin", 304),
    ("Middlemarch", "George Eliot", 880),
    ("Piranesi", "Susanna Clarke", 272),
    ("The Remains of the Day", "Kazuo Ishiguro", 258),
    ("Gödel, Escher, Bach", "Douglas R. Hofstadter", 777),
    ("Kindred", "Octavia E. Butler", 264),
    ("Moby-Dick", "Herman Melville", 654),
    ("A Wizard of Earthsea", "Ursula K. Le Guin", 183),
];

/// Generates `count` reviews finished on or after `start`, in ascending
/// read order.
///
/// Every seventh review has no read date, mimicking books that were shelved
/// as read without a finish date.
///
/// # Example
///
/// ```
/// use timelines_core::calendar::generate_demo_reviews;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let reviews = generate_demo_reviews(start, 20);
///
/// assert_eq!(reviews.len(), 20);
/// ```
pub fn generate_demo_reviews(start: NaiveDate, count: u32) -> Vec<Review> {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let mut date = start;

    (0..count)
        .map(|i| {
            let (title, author, pages) = TITLES[i as usize % TITLES.len()];
            let book = Book::new(title, author)
                .with_id(1_000 + u64::from(i))
                .with_pages(pages);

            // Two to six days between books, twice in a row on the same day
            // every tenth book.
            if i % 10 != 9 {
                date += Duration::days(2 + i64::from(i % 5));
            }

            let read_at = if i % 7 == 6 {
                String::new()
            } else {
                let time = NaiveTime::from_hms_opt(8 + i % 14, (i * 7) % 60, 0).unwrap();
                let finished = offset.from_local_datetime(&date.and_time(time)).unwrap();
                format_read_at(&finished)
            };

            Review::new(book, read_at)
                .with_id(u64::from(i) + 1)
                .with_rating((i % 5 + 1) as u8)
        })
        .collect()
}

/// Profile matching [`generate_demo_reviews`].
pub fn demo_profile(user_id: &str) -> Profile {
    Profile::new(user_id, "Demo Reader")
}
