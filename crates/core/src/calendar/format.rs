//! Number formatting used by timeline summaries.

/// Formats a number with a comma as the thousands separator.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Average number of books per week over `days` days.
pub fn per_week(books: usize, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    (books as f64 * 7.0) / days as f64
}
