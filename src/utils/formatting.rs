//! Formatting utilities used for CLI and export outputs.

/// `90.00%`
pub fn fmt_percent(p: f64) -> String {
    format!("{:.2}%", p)
}

pub fn fmt_amount(v: f64) -> String {
    format!("{:.2}", v)
}

/// Marks print without trailing zeros: `45`, `47.5`.
pub fn fmt_marks(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

pub fn or_dash(v: Option<&str>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "--".to_string(),
    }
}

/// Cut `s` to `max` characters, ending with `...` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_drop_trailing_zero_fraction() {
        assert_eq!(fmt_marks(45.0), "45");
        assert_eq!(fmt_marks(47.5), "47.5");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("Maths", 10), "Maths");
        assert_eq!(truncate("Welcome to the new year", 10), "Welcome...");
    }
}
