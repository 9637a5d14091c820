//! Pure formatting functions for terminal output.
//!
//! Styling comes from `console`, which drops colors when stderr is not a
//! terminal or `NO_COLOR` is set.

use console::style;

/// Format an error message with a red `error:` label.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("error:").for_stderr().red().bold(), message)
}

/// Format a hint line shown after usage errors.
pub fn format_hint(message: &str) -> String {
    format!("{} {}", style("hint:").for_stderr().yellow(), message)
}
