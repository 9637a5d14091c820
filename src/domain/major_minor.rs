use crate::error::{MinVerError, Result};
use std::fmt;
use std::str::FromStr;

/// A `MAJOR.MINOR` pair used as the minimum for calculated versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MajorMinor {
    pub major: u64,
    pub minor: u64,
}

impl MajorMinor {
    pub const VALID_VALUES: &'static str = "MAJOR.MINOR, e.g. 1.0";

    pub fn new(major: u64, minor: u64) -> Self {
        MajorMinor { major, minor }
    }
}

impl FromStr for MajorMinor {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            MinVerError::config(format!(
                "Invalid minimum major minor '{}'. Valid values are {}.",
                s,
                MajorMinor::VALID_VALUES
            ))
        };

        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;

        let parse_part = |part: &str| {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u64>().map_err(|_| invalid())
        };

        Ok(MajorMinor {
            major: parse_part(major)?,
            minor: parse_part(minor)?,
        })
    }
}

impl fmt::Display for MajorMinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
