use std::fmt;

/// Reviews requested per page.
pub const PAGE_SIZE: u32 = 200;

/// Highest page the fetcher will ask for.
pub const MAX_PAGES: u32 = 99;

/// Sort direction of a review listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the single-letter form used in query strings.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "a",
            SortOrder::Descending => "d",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Parameters of a review listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewListQuery {
    pub shelf: String,
    pub sort: String,
    pub order: SortOrder,
    pub page: u32,
    pub per_page: u32,
}

impl ReviewListQuery {
    /// Page `page` of the "read" shelf, oldest read first.
    pub fn read_by_date(page: u32) -> Self {
        Self {
            shelf: "read".to_string(),
            sort: "date_read".to_string(),
            order: SortOrder::Ascending,
            page,
            per_page: PAGE_SIZE,
        }
    }
}
