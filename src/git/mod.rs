//! Commit graph abstraction layer
//!
//! The resolver only ever reads history: the current commit, parents of a
//! commit, tags, and the current branch name. This module puts those four
//! queries behind the [CommitGraph] trait so the resolver can run against a
//! real repository or an in-memory history.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use minver::git::{CommitGraph, MockRepository};
//! let mut repo = MockRepository::new();
//! repo.add_commit("a", &[]);
//! repo.add_commit("b", &["a"]);
//! repo.add_tag("1.0.0", "a");
//! repo.set_head("b");
//!
//! let head = repo.head().unwrap().unwrap();
//! assert_eq!(repo.parents_of(&head).unwrap()[0].as_str(), "a");
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{CommitId, Tag};
use crate::error::Result;

/// Read-only view of a commit graph
///
/// ## Error Handling
///
/// Implementations map their underlying errors (like `git2::Error`) to
/// [crate::error::MinVerError]. A failing query is terminal for the
/// calculation; nothing is retried.
pub trait CommitGraph {
    /// The commit checked out in the working directory
    ///
    /// Returns `Ok(None)` when the repository has no commits yet.
    fn head(&self) -> Result<Option<CommitId>>;

    /// Parents of `commit`, first parent first
    ///
    /// Empty for a root commit, more than one for a merge.
    fn parents_of(&self, commit: &CommitId) -> Result<Vec<CommitId>>;

    /// Every tag in the repository, each resolved to the commit it points at
    fn tags(&self) -> Result<Vec<Tag>>;

    /// Tags pointing at `commit`
    fn tags_pointing_at(&self, commit: &CommitId) -> Result<Vec<Tag>> {
        Ok(self
            .tags()?
            .into_iter()
            .filter(|tag| &tag.target == commit)
            .collect())
    }

    /// Short name of the checked out branch
    ///
    /// Returns `Ok(None)` when HEAD is detached or the branch has no commits.
    fn current_branch_name(&self) -> Result<Option<String>>;
}
