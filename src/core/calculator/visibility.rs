use chrono::NaiveDateTime;

/// Published, and either no expiry or an expiry strictly after `now`.
pub fn is_visible(is_published: bool, expires_at: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    is_published && expires_at.is_none_or(|exp| exp > now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn expiry_equal_to_now_is_hidden() {
        assert!(!is_visible(true, Some(now()), now()));
    }

    #[test]
    fn expired_yesterday_hidden_and_no_expiry_shown() {
        assert!(!is_visible(true, Some(now() - Duration::days(1)), now()));
        assert!(is_visible(true, None, now()));
        assert!(is_visible(true, Some(now() + Duration::seconds(1)), now()));
    }

    #[test]
    fn unpublished_is_never_visible() {
        assert!(!is_visible(false, None, now()));
        assert!(!is_visible(false, Some(now() + Duration::days(30)), now()));
    }
}
