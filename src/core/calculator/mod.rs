//! Aggregation layer: percentages, counts and visibility derived from the
//! record store. Every function takes "today"/"now" from the caller.

pub mod attendance;
pub mod grade;
pub mod totals;
pub mod visibility;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(90.0), 90.0);
        assert_eq!(round2(0.004), 0.0);
    }
}
