/// ANSI color helper utilities for terminal output.
use crate::models::EventStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Ongoing → green, upcoming → cyan, completed → grey.
pub fn color_for_status(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Ongoing => GREEN,
        EventStatus::Upcoming => CYAN,
        EventStatus::Completed => GREY,
    }
}

pub fn paint_status(status: EventStatus) -> String {
    format!("{}{}{RESET}", color_for_status(status), status.as_str())
}

/// Grey placeholder for empty cells.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
