//! Console messages.
//!
//! `debug!` is silent unless verbose output has been turned on with
//! [`set_verbose`]; everything else always goes to stderr.
use console::style;
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Prefix with a fixed width so that messages line up
pub fn gen_prefix(prefix: &str) -> String {
    format!("{:>5} ", prefix)
}

fn styled_prefix(level: Level) -> String {
    let label = match level {
        Level::Debug => "DEBUG",
        Level::Info => "INFO",
        Level::Warn => "WARN",
        Level::Error => "ERROR",
    };
    let styled = match level {
        Level::Debug => style(label).dim(),
        Level::Info => style(label).blue().bold(),
        Level::Warn => style(label).yellow().bold(),
        Level::Error => style(label).red().bold(),
    };
    // Pad on the plain label, escape codes would throw the width off
    gen_prefix(label).replacen(label, &styled.to_string(), 1)
}

#[doc(hidden)]
pub fn emit(level: Level, args: fmt::Arguments) {
    if level == Level::Debug && !is_verbose() {
        return;
    }
    eprintln!("{}{}", styled_prefix(level), args);
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::msg::emit($crate::msg::Level::Debug, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::msg::emit($crate::msg::Level::Info, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::msg::emit($crate::msg::Level::Warn, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::msg::emit($crate::msg::Level::Error, format_args!($($arg)+))
    };
}
