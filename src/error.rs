use std::fmt;

use thiserror::Error;

/// Where an option value came from, used to point the user at the offending input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSource {
    /// A command-line flag such as `--auto-increment`
    Flag(&'static str),
    /// An environment variable such as `MinVerAutoIncrement`
    EnvVar(&'static str),
    /// A key in the config file
    ConfigKey(&'static str),
}

impl fmt::Display for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSource::Flag(name) => write!(f, "option {}", name),
            OptionSource::EnvVar(name) => write!(f, "environment variable {}", name),
            OptionSource::ConfigKey(name) => write!(f, "config key '{}'", name),
        }
    }
}

/// Unified error type for minver operations
#[derive(Error, Debug)]
pub enum MinVerError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid {origin} '{value}'. Valid values are {allowed}.")]
    InvalidOption {
        origin: OptionSource,
        value: String,
        allowed: String,
    },

    #[error("Invalid version '{input}'. Expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD].")]
    InvalidVersion { input: String },

    #[error("Repository or working directory '{0}' does not exist.")]
    PathNotFound(String),

    #[error("Cannot bump the {part} of version {version}: it is already at the maximum value.")]
    VersionOverflow { version: String, part: String },

    #[error("Internal error: {0}")]
    Invariant(String),
}

/// Convenience type alias for Results in minver
pub type Result<T> = std::result::Result<T, MinVerError>;

impl MinVerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MinVerError::Config(msg.into())
    }

    /// Create an invalid option error
    pub fn invalid_option(
        origin: OptionSource,
        value: impl Into<String>,
        allowed: impl Into<String>,
    ) -> Self {
        MinVerError::InvalidOption {
            origin,
            value: value.into(),
            allowed: allowed.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(input: impl Into<String>) -> Self {
        MinVerError::InvalidVersion {
            input: input.into(),
        }
    }

    /// Create an error for a version part that has no room to grow
    pub fn version_overflow(version: impl Into<String>, part: impl fmt::Display) -> Self {
        MinVerError::VersionOverflow {
            version: version.into(),
            part: part.to_string(),
        }
    }

    /// Create an internal invariant error
    pub fn invariant(msg: impl Into<String>) -> Self {
        MinVerError::Invariant(msg.into())
    }

    /// Whether the error was caused by user input rather than the repository
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            MinVerError::InvalidOption { .. }
                | MinVerError::InvalidVersion { .. }
                | MinVerError::PathNotFound(_)
                | MinVerError::Config(_)
                | MinVerError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MinVerError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MinVerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_invalid_option_names_source_value_and_allowed() {
        let err = MinVerError::invalid_option(
            OptionSource::EnvVar("MinVerAutoIncrement"),
            "huge",
            "major, minor, patch",
        );
        assert_eq!(
            err.to_string(),
            "Invalid environment variable MinVerAutoIncrement 'huge'. Valid values are major, minor, patch."
        );
    }

    #[test]
    fn test_invalid_option_from_flag() {
        let err = MinVerError::invalid_option(
            OptionSource::Flag("--minimum-major-minor"),
            "1",
            "MAJOR.MINOR",
        );
        let msg = err.to_string();
        assert!(msg.contains("option --minimum-major-minor"));
        assert!(msg.contains("'1'"));
    }

    #[test]
    fn test_invalid_version_mentions_grammar() {
        let err = MinVerError::invalid_version("1.2");
        let msg = err.to_string();
        assert!(msg.contains("'1.2'"));
        assert!(msg.contains("MAJOR.MINOR.PATCH"));
    }

    #[test]
    fn test_usage_errors() {
        assert!(MinVerError::invalid_version("x").is_usage_error());
        assert!(MinVerError::PathNotFound("nope".to_string()).is_usage_error());
        assert!(!MinVerError::invariant("no candidates").is_usage_error());
        assert!(!MinVerError::version_overflow("1.0.0", "patch").is_usage_error());
        assert!(!MinVerError::Git(git2::Error::from_str("boom")).is_usage_error());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (MinVerError::config("x"), "Configuration error"),
            (MinVerError::invariant("x"), "Internal error"),
            (MinVerError::version_overflow("x", "patch"), "Cannot bump the patch"),
            (MinVerError::PathNotFound("x".to_string()), "Repository or working directory"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
