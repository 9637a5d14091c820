//! Diagnostic messages emitted while calculating a version
//!
//! The resolver never logs directly. It emits [Diagnostic] values into a
//! [DiagnosticSink] supplied by the caller: the CLI forwards them to
//! `tracing` through [TracingSink], tests collect them in a `Vec`.

use crate::domain::{MajorMinor, Version};
use crate::resolver::Candidate;
use std::fmt;
use tracing::Level;

/// Everything the resolver reports along the way
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The path is not inside a git repository
    NoRepository { path: String },
    /// The repository has no commits yet
    NoCommits,
    /// A tag on a visited commit is not a version
    NonVersionTag { tag: String, prefix: String },
    /// A tagged commit was found during the walk
    Detected(Candidate),
    /// A lineage ended without a tag
    Inferred(Candidate),
    /// Number of distinct commits visited by the walk
    CommitsChecked(usize),
    /// A candidate that lost to a higher version
    Ignoring(Candidate),
    /// The candidate chosen to calculate the version from
    Using(Candidate),
    /// The calculated version was below the configured minimum
    BumpedToMinimum {
        from: Version,
        to: Version,
        minimum: MajorMinor,
    },
    /// The branch name is not appended because the branch is ignored
    IgnoredBranch { branch: String },
    /// The final calculated version
    Calculated(Version),
    /// Resolution was skipped in favour of an explicit version
    VersionOverride(Version),
}

impl Diagnostic {
    /// The log level the message is reported at
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::NoRepository { .. } | Diagnostic::NoCommits => Level::WARN,
            Diagnostic::Using(_)
            | Diagnostic::Calculated(_)
            | Diagnostic::BumpedToMinimum { .. }
            | Diagnostic::VersionOverride(_) => Level::INFO,
            Diagnostic::Detected(_)
            | Diagnostic::Inferred(_)
            | Diagnostic::Ignoring(_)
            | Diagnostic::CommitsChecked(_) => Level::DEBUG,
            Diagnostic::NonVersionTag { .. } | Diagnostic::IgnoredBranch { .. } => Level::TRACE,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoRepository { path } => write!(
                f,
                "Using default version. Path '{}' doesn't point at a valid Git repository.",
                path
            ),
            Diagnostic::NoCommits => write!(f, "Using default version. No commits found."),
            Diagnostic::NonVersionTag { tag, prefix } if prefix.is_empty() => {
                write!(f, "Ignoring non-version tag '{}'.", tag)
            }
            Diagnostic::NonVersionTag { tag, prefix } => write!(
                f,
                "Ignoring tag '{}'. It is not a version with tag prefix '{}'.",
                tag, prefix
            ),
            Diagnostic::Detected(candidate) => write!(f, "Detected {}.", candidate),
            Diagnostic::Inferred(candidate) => write!(f, "Inferred {}.", candidate),
            Diagnostic::CommitsChecked(1) => write!(f, "1 commit checked."),
            Diagnostic::CommitsChecked(count) => write!(f, "{} commits checked.", count),
            Diagnostic::Ignoring(candidate) => write!(f, "Ignoring {}.", candidate),
            Diagnostic::Using(candidate) => write!(f, "Using {}.", candidate),
            Diagnostic::BumpedToMinimum { from, to, minimum } => write!(
                f,
                "Bumping version {} to {} to satisfy minimum major minor {}.",
                from, to, minimum
            ),
            Diagnostic::IgnoredBranch { branch } => {
                write!(f, "Not including ignored branch name '{}'.", branch)
            }
            Diagnostic::Calculated(version) => write!(f, "Calculated version {}.", version),
            Diagnostic::VersionOverride(version) => {
                write!(f, "Using version override {}.", version)
            }
        }
    }
}

/// Receiver for diagnostics
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` at their own level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let level = diagnostic.level();
        if level == Level::ERROR {
            tracing::error!(target: "minver", "{}", diagnostic);
        } else if level == Level::WARN {
            tracing::warn!(target: "minver", "{}", diagnostic);
        } else if level == Level::INFO {
            tracing::info!(target: "minver", "{}", diagnostic);
        } else if level == Level::DEBUG {
            tracing::debug!(target: "minver", "{}", diagnostic);
        } else {
            tracing::trace!(target: "minver", "{}", diagnostic);
        }
    }
}
