//! Log output for the command-line tool
//!
//! stdout carries nothing but the calculated version, so every log line goes
//! to stderr.

use crate::error::{MinVerError, Result};
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as subscriber_fmt;
use tracing_subscriber::prelude::*;

/// How much is logged while calculating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub const VALID_VALUES: &'static str = "e[rror], w[arn], i[nfo] (default), d[ebug], \
        t[race], quiet, minimal, normal, detailed, diag[nostic] (case insensitive)";

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Error => LevelFilter::ERROR,
            Verbosity::Warn => LevelFilter::WARN,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Trace => LevelFilter::TRACE,
        }
    }
}

impl FromStr for Verbosity {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "e" | "error" | "q" | "quiet" => Ok(Verbosity::Error),
            "w" | "warn" | "m" | "minimal" => Ok(Verbosity::Warn),
            "i" | "info" | "n" | "normal" => Ok(Verbosity::Info),
            "d" | "debug" | "detailed" => Ok(Verbosity::Debug),
            "t" | "trace" | "diag" | "diagnostic" => Ok(Verbosity::Trace),
            _ => Err(MinVerError::config(format!(
                "Invalid verbosity '{}'. Valid values are {}.",
                s,
                Self::VALID_VALUES
            ))),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verbosity::Error => "error",
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Build the filter for `verbosity`, letting `RUST_LOG` take precedence
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(verbosity.level_filter().into())
        .from_env_lossy()
}

/// Install the global subscriber, writing to stderr
///
/// Calling this more than once is harmless; only the first call installs.
pub fn init(verbosity: Verbosity) {
    let layer = subscriber_fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(layer)
        .try_init();
}
