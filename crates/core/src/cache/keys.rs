/// Prefix of profile cache keys.
pub const PROFILE_PREFIX: &str = "Profile:";

/// Prefix of review page cache keys.
pub const EVENTS_PREFIX: &str = "Events:";

/// Returns the cache key for a user's profile.
pub fn profile_key(user_id: &str) -> String {
    format!("{PROFILE_PREFIX}{user_id}")
}

/// Returns the cache key for one page of a user's read reviews.
pub fn reviews_page_key(user_id: &str, page: u32) -> String {
    format!("{EVENTS_PREFIX}{user_id}:{page}")
}

/// Returns true if `key` caches data belonging to `user_id`.
pub fn is_user_key(key: &str, user_id: &str) -> bool {
    if let Some(rest) = key.strip_prefix(PROFILE_PREFIX) {
        return rest == user_id;
    }

    key.strip_prefix(EVENTS_PREFIX)
        .and_then(|rest| rest.rsplit_once(':'))
        .is_some_and(|(id, page)| id == user_id && page.parse::<u32>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_key() {
        assert_eq!(profile_key("1234"), "Profile:1234");
    }

    #[test]
    fn test_reviews_page_key() {
        assert_eq!(reviews_page_key("1234", 3), "Events:1234:3");
    }

    #[test]
    fn test_is_user_key() {
        assert!(is_user_key("Profile:1234", "1234"));
        assert!(is_user_key("Events:1234:1", "1234"));
        assert!(is_user_key("Events:1234:99", "1234"));

        assert!(!is_user_key("Profile:12345", "1234"));
        assert!(!is_user_key("Events:12345:1", "1234"));
        assert!(!is_user_key("Events:1234:next", "1234"));
        assert!(!is_user_key("Events:1234", "1234"));
        assert!(!is_user_key("user:1234", "1234"));
    }
}
