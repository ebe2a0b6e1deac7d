use serde::Serialize;

/// One page of a listing plus the metadata the views need to paginate.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total: i64,
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, current_page: u32, per_page: u32, total: i64) -> Self {
        Self {
            data,
            current_page,
            per_page,
            total,
            last_page: last_page(total, per_page),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `ceil(total / per_page)`, never below 1.
pub fn last_page(total: i64, per_page: u32) -> u32 {
    if total <= 0 || per_page == 0 {
        return 1;
    }
    let per = i64::from(per_page);
    (((total + per - 1) / per) as u32).max(1)
}

/// SQL OFFSET for a 1-based page.
pub fn offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up_and_never_drops_below_one() {
        assert_eq!(last_page(0, 20), 1);
        assert_eq!(last_page(20, 20), 1);
        assert_eq!(last_page(21, 20), 2);
        assert_eq!(last_page(59, 20), 3);
    }

    #[test]
    fn offset_is_zero_for_first_page() {
        assert_eq!(offset(1, 20), 0);
        assert_eq!(offset(3, 20), 40);
    }
}
