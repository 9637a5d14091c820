//! Terminal output for the command-line tool
//!
//! stdout carries only the calculated version so it can be captured by
//! scripts. Everything else goes to stderr.

pub mod formatter;

use crate::domain::Version;

pub use formatter::{format_error, format_hint};

/// Print the calculated version on stdout
pub fn display_version(version: &Version) {
    println!("{}", version);
}

/// Print an error on stderr
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print a hint on stderr
pub fn display_hint(message: &str) {
    eprintln!("{}", format_hint(message));
}
