use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::{CommitId, Version};
use std::collections::HashMap;

/// A git tag: its display name and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub target: CommitId,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, target: CommitId) -> Self {
        Tag {
            name: name.into(),
            target,
        }
    }
}

/// The best version found on a single commit, with the tag it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedVersion {
    pub tag: String,
    pub version: Version,
}

/// Resolves the version carried by a commit's tags
///
/// Tags are indexed by target once, up front.
pub struct TagMatcher<'a> {
    prefix: &'a str,
    by_target: HashMap<&'a CommitId, Vec<&'a Tag>>,
}

impl<'a> TagMatcher<'a> {
    /// Index `tags` by the commit they point at
    pub fn new(tags: &'a [Tag], prefix: &'a str) -> Self {
        let mut by_target: HashMap<&CommitId, Vec<&Tag>> = HashMap::new();
        for tag in tags {
            by_target.entry(&tag.target).or_default().push(tag);
        }

        TagMatcher { prefix, by_target }
    }

    /// The highest version among the tags pointing at `commit`
    ///
    /// Tags that don't parse as versions (after removing the prefix) are
    /// skipped. When several tags parse, the greatest version wins; equal
    /// versions keep the first tag in input order.
    pub fn best_version_for(
        &self,
        commit: &CommitId,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<TaggedVersion> {
        let mut best: Option<TaggedVersion> = None;

        for tag in self.by_target.get(commit).into_iter().flatten() {
            let Some(version) = Version::parse(&tag.name, self.prefix) else {
                sink.emit(Diagnostic::NonVersionTag {
                    tag: tag.name.clone(),
                    prefix: self.prefix.to_string(),
                });
                continue;
            };

            if best.as_ref().map_or(true, |b| version > b.version) {
                best = Some(TaggedVersion {
                    tag: tag.name.clone(),
                    version,
                });
            }
        }

        best
    }
}
