use super::round2;

/// `marks / total * 100`, rounded to two decimals; 0 when `total` is 0.
pub fn grade_percentage(marks_obtained: f64, total_marks: f64) -> f64 {
    if total_marks == 0.0 {
        return 0.0;
    }
    round2(marks_obtained / total_marks * 100.0)
}
