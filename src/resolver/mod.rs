//! Version resolution from commit history
//!
//! Resolution runs in three stages:
//! - [walker::Walker] collects a [Candidate] for every lineage from the
//!   starting commit to its nearest version tag (or root commit)
//! - [selector::select] picks the candidate with the highest version
//! - [policy::HeightPolicy] turns that candidate and its height into the
//!   final version

pub mod policy;
pub mod selector;
pub mod walker;

pub use policy::HeightPolicy;
pub use walker::Walker;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::{CommitId, Identifier, MajorMinor, Tag, Version, VersionPart};
use crate::error::Result;
use crate::git::CommitGraph;
use std::fmt;

/// A version found (or inferred) during the walk, with where it was found
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub version: Version,
    pub commit: CommitId,
    /// Edges between the starting commit and `commit`
    pub height: usize,
    /// The tag the version was read from, `None` when inferred
    pub tag: Option<String>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ Commit: {}, Tag: ", self.commit.short())?;
        match &self.tag {
            Some(tag) => write!(f, "'{}'", tag)?,
            None => write!(f, "null")?,
        }
        write!(f, ", Version: {}, Height: {} }}", self.version, self.height)
    }
}

/// Fully resolved settings for a calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Prefix a tag must start with to be read as a version
    pub tag_prefix: String,
    /// Part bumped when building on top of a release
    pub auto_increment: VersionPart,
    pub default_pre_release_identifiers: Vec<Identifier>,
    /// Replaces the first default pre-release identifier
    pub default_pre_release_phase: Option<Identifier>,
    pub minimum_major_minor: Option<MajorMinor>,
    pub build_metadata: Option<String>,
    pub ignore_height: bool,
    pub ignore_pre_release_identifiers: bool,
    pub include_branch_name: bool,
    pub ignore_branch_names: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tag_prefix: String::new(),
            auto_increment: VersionPart::Patch,
            default_pre_release_identifiers: vec![
                Identifier::AlphaNumeric("alpha".to_string()),
                Identifier::Numeric(0),
            ],
            default_pre_release_phase: None,
            minimum_major_minor: None,
            build_metadata: None,
            ignore_height: false,
            ignore_pre_release_identifiers: false,
            include_branch_name: false,
            ignore_branch_names: Vec::new(),
        }
    }
}

impl Settings {
    /// Default pre-release identifiers with the phase applied
    pub fn pre_release_identifiers(&self) -> Vec<Identifier> {
        let mut identifiers = self.default_pre_release_identifiers.clone();
        if let Some(phase) = &self.default_pre_release_phase {
            match identifiers.first_mut() {
                Some(first) => *first = phase.clone(),
                None => identifiers.push(phase.clone()),
            }
        }
        identifiers
    }

    /// Version recorded for lineages that end without a tag
    pub fn fallback_version(&self) -> Version {
        Version::new(0, 0, 0).with_pre_release(self.pre_release_identifiers())
    }
}

/// Calculates versions from a commit graph
pub struct Resolver {
    settings: Settings,
}

impl Resolver {
    pub fn new(settings: Settings) -> Self {
        Resolver { settings }
    }

    /// Calculate the version of the checked out commit of `graph`
    ///
    /// Reads HEAD, the tags, and (when branch names are included) the current
    /// branch from the graph itself.
    pub fn resolve<G: CommitGraph + ?Sized>(
        &self,
        graph: &G,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Version> {
        let Some(head) = graph.head()? else {
            return self.resolve_version(graph, None, &[], None, sink);
        };

        let tags = graph.tags()?;
        let branch = if self.settings.include_branch_name {
            graph.current_branch_name()?
        } else {
            None
        };

        self.resolve_version(graph, Some(&head), &tags, branch.as_deref(), sink)
    }

    /// Calculate the version of `start`
    ///
    /// # Arguments
    /// * `graph` - Source of parent lookups
    /// * `start` - Commit to calculate for, `None` when there are no commits
    /// * `tags` - Every tag in the repository
    /// * `branch` - Name of the current branch, if any
    /// * `sink` - Receiver for diagnostics
    ///
    /// # Returns
    /// The default version `0.0.0-alpha.0` (and a warning) when `start` is
    /// `None`, otherwise the calculated version.
    pub fn resolve_version<G: CommitGraph + ?Sized>(
        &self,
        graph: &G,
        start: Option<&CommitId>,
        tags: &[Tag],
        branch: Option<&str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Version> {
        let Some(start) = start else {
            sink.emit(Diagnostic::NoCommits);
            return Ok(Version::default());
        };

        let candidates = Walker::new(graph, tags, &self.settings.tag_prefix)
            .with_fallback(self.settings.fallback_version())
            .walk(start, sink)?;
        let selected = selector::select(candidates, sink)?;
        let version = HeightPolicy::new(&self.settings).promote(&selected, branch, sink)?;

        sink.emit(Diagnostic::Calculated(version.clone()));

        Ok(version)
    }
}
