//! Console output for every command: one line per message, colored icon
//! prefix, errors on stderr.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// `NO_COLOR` (any value) turns the escapes off.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn prefix(color: &str, icon: &str) -> String {
    if colors_enabled() {
        format!("{color}{BOLD}{icon}{RESET}")
    } else {
        icon.to_string()
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", prefix(FG_BLUE, ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", prefix(FG_GREEN, ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", prefix(FG_YELLOW, ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", prefix(FG_RED, ICON_ERR), msg);
}

/// Indented list item under the previous message.
pub fn item<T: fmt::Display>(msg: T) {
    println!("   • {}", msg);
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    if colors_enabled() {
        println!("{FG_BLUE}{BOLD}── {msg} ──{RESET}\n");
    } else {
        println!("── {msg} ──\n");
    }
}
