use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::{CommitId, Tag, TagMatcher, Version};
use crate::error::Result;
use crate::git::CommitGraph;
use crate::resolver::Candidate;
use std::collections::HashSet;

/// Walks ancestry from a commit, collecting the nearest tagged commits
///
/// The walk is a depth-first search over an explicit stack, so long
/// histories never hit a recursion limit. Parents are pushed in reverse so
/// the first parent is explored first, and a tagged commit is a boundary:
/// its own ancestors are never visited through it.
pub struct Walker<'a, G: CommitGraph + ?Sized> {
    graph: &'a G,
    matcher: TagMatcher<'a>,
    fallback: Version,
}

impl<'a, G: CommitGraph + ?Sized> Walker<'a, G> {
    /// Create a walker over `graph` matching `tags` with the required `prefix`
    pub fn new(graph: &'a G, tags: &'a [Tag], prefix: &'a str) -> Self {
        Walker {
            graph,
            matcher: TagMatcher::new(tags, prefix),
            fallback: Version::default(),
        }
    }

    /// Version recorded for a lineage that ends without a tag
    ///
    /// Defaults to `0.0.0-alpha.0`.
    pub fn with_fallback(mut self, fallback: Version) -> Self {
        self.fallback = fallback;
        self
    }

    /// Collect candidates reachable from `root`, in discovery order
    ///
    /// Every tag-free path from `root` to a tagged commit or a root commit
    /// contributes one candidate. Each commit is evaluated once, at the
    /// height it is first popped at, which is not necessarily its shortest
    /// distance from `root`.
    pub fn walk(&self, root: &CommitId, sink: &mut dyn DiagnosticSink) -> Result<Vec<Candidate>> {
        let mut visited: HashSet<CommitId> = HashSet::new();
        let mut stack: Vec<(CommitId, usize)> = vec![(root.clone(), 0)];
        let mut candidates = Vec::new();

        while let Some((commit, height)) = stack.pop() {
            if !visited.insert(commit.clone()) {
                continue;
            }

            if let Some(found) = self.matcher.best_version_for(&commit, sink) {
                let candidate = Candidate {
                    version: found.version,
                    commit,
                    height,
                    tag: Some(found.tag),
                };
                sink.emit(Diagnostic::Detected(candidate.clone()));
                candidates.push(candidate);
                continue;
            }

            for parent in self.graph.parents_of(&commit)?.into_iter().rev() {
                stack.push((parent, height + 1));
            }

            // Nothing deeper queued: this lineage is ending untagged
            if stack.last().map_or(true, |(_, next)| *next <= height) {
                let candidate = Candidate {
                    version: self.fallback.clone(),
                    commit,
                    height,
                    tag: None,
                };
                sink.emit(Diagnostic::Inferred(candidate.clone()));
                candidates.push(candidate);
            }
        }

        sink.emit(Diagnostic::CommitsChecked(visited.len()));

        Ok(candidates)
    }
}
