//! User-facing status lines. Warnings go to stderr, everything else to stdout.

use crate::utils::colors::{BLUE, GREEN, RESET, YELLOW};
use std::fmt;

const BOLD: &str = "\x1b[1m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{BLUE}{BOLD}{ICON_INFO}{RESET} {msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{GREEN}{BOLD}{ICON_OK}{RESET} {msg}");
}

/// Warnings go to stderr so `--json` output stays parseable.
pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{YELLOW}{BOLD}{ICON_WARN}{RESET} {msg}");
}

/// Section header used by the dashboard and profile views.
pub fn header<T: fmt::Display>(msg: T) {
    println!("\n{BLUE}{BOLD}== {msg} =={RESET}");
}
