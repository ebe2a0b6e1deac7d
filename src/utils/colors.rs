/// ANSI color helper utilities for terminal output.
use crate::models::attendance::AttendanceStatus;
use crate::models::student::FeeStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_attendance(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Absent => RED,
        AttendanceStatus::Late => YELLOW,
        AttendanceStatus::Excused => BLUE,
    }
}

pub fn color_for_fee(status: FeeStatus) -> &'static str {
    match status {
        FeeStatus::Paid => GREEN,
        FeeStatus::Pending => YELLOW,
        FeeStatus::Overdue => RED,
    }
}

/// Percentage color:
/// ≥ 75 → green
/// ≥ 50 → yellow
/// below → red
pub fn color_for_percentage(value: f64) -> &'static str {
    if value >= 75.0 {
        GREEN
    } else if value >= 50.0 {
        YELLOW
    } else {
        RED
    }
}

/// Wrap `value` in `color`, greying out empty placeholders.
pub fn paint(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
