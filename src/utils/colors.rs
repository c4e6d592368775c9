/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Duration color:
/// missing → grey
/// \<0 → red (end before start, usually a data entry problem)
/// otherwise → reset
pub fn color_for_days(value: Option<i64>) -> &'static str {
    match value {
        None => GREY,
        Some(v) if v < 0 => RED,
        Some(_) => RESET,
    }
}

/// Bar colors of the two metrics, same pairing as the dashboard charts.
pub fn color_for_series(index: usize) -> &'static str {
    match index {
        0 => BLUE,
        1 => YELLOW,
        _ => CYAN,
    }
}

pub fn paint(text: &str, color: &str) -> String {
    if color == RESET {
        text.to_string()
    } else {
        format!("{color}{text}{RESET}")
    }
}
