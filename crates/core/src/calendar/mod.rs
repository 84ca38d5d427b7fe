mod bucket;
mod dates;
mod error;
mod format;
mod grid;
mod mock_data;
mod timeline;
mod types;

pub use bucket::{bucket_by_day, DayBuckets};
pub use dates::{
    days_inclusive, end_of_month, format_read_at, iso_date, parse_iso_date, parse_read_at,
    read_day, start_of_month, ISO_DATE_FORMAT, READ_AT_FORMAT,
};
pub use error::{CalendarError, Result};
pub use format::{per_week, thousands};
pub use grid::{build_grid, CalendarGrid, Month, Week, DAYS_PER_WEEK};
pub use mock_data::{demo_profile, generate_demo_reviews};
pub use timeline::{MonthSummary, Timeline, TimelineOptions, TimelineSpan};
pub use types::{Book, Profile, Review};
