mod error;
mod http_mapping;
mod links;
mod traits;
mod types;

pub use error::{RemoteError, Result};
pub use http_mapping::remote_error_to_status_code;
pub use links::{parse_profile_uri, profile_link};
pub use traits::ReadingApi;
pub use types::{ReviewListQuery, SortOrder, MAX_PAGES, PAGE_SIZE};
