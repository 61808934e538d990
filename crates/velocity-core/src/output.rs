//! Colored status lines

use colored::Colorize;
use std::fmt::Display;

/// Color tag for a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Failure,
}

/// Print a message in the color of its tone. Failures go to stderr.
pub fn log(message: impl Display, tone: Tone) {
    let message = message.to_string();
    match tone {
        Tone::Info => println!("{}", message.blue()),
        Tone::Success => println!("{}", message.green()),
        Tone::Warning => println!("{}", message.yellow()),
        Tone::Failure => eprintln!("{}", message.red()),
    }
}

pub fn info(message: impl Display) {
    log(message, Tone::Info);
}

pub fn success(message: impl Display) {
    log(message, Tone::Success);
}

pub fn warn(message: impl Display) {
    log(message, Tone::Warning);
}

pub fn error(message: impl Display) {
    log(message, Tone::Failure);
}
