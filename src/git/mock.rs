use crate::domain::{CommitId, Tag};
use crate::error::{MinVerError, Result};
use crate::git::CommitGraph;
use std::collections::HashMap;

/// In-memory commit graph for tests, without any git repository on disk
#[derive(Debug, Default, Clone)]
pub struct MockRepository {
    parents: HashMap<CommitId, Vec<CommitId>>,
    tags: Vec<Tag>,
    head: Option<CommitId>,
    branch: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with its parents, first parent first
    ///
    /// The most recently added commit becomes HEAD.
    pub fn add_commit(&mut self, id: &str, parents: &[&str]) {
        let id = CommitId::new(id);
        self.parents
            .insert(id.clone(), parents.iter().map(|p| CommitId::new(*p)).collect());
        self.head = Some(id);
    }

    /// Add a chain of commits, each the single parent of the next
    ///
    /// The first id gets `parent` as its parent (or none). HEAD ends up on the
    /// last id.
    pub fn add_chain(&mut self, parent: Option<&str>, ids: &[&str]) {
        let mut previous = parent;
        for &id in ids {
            let parents: Vec<&str> = previous.into_iter().collect();
            self.add_commit(id, &parents);
            previous = Some(id);
        }
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&mut self, name: impl Into<String>, target: &str) {
        self.tags.push(Tag::new(name, CommitId::new(target)));
    }

    /// Point HEAD at a commit
    pub fn set_head(&mut self, id: &str) {
        self.head = Some(CommitId::new(id));
    }

    /// Set the checked out branch
    pub fn set_branch(&mut self, name: impl Into<String>) {
        self.branch = Some(name.into());
    }
}

impl CommitGraph for MockRepository {
    fn head(&self) -> Result<Option<CommitId>> {
        Ok(self.head.clone())
    }

    fn parents_of(&self, commit: &CommitId) -> Result<Vec<CommitId>> {
        self.parents.get(commit).cloned().ok_or_else(|| {
            MinVerError::Git(git2::Error::from_str(&format!(
                "commit not found: {}",
                commit
            )))
        })
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn current_branch_name(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }
}
