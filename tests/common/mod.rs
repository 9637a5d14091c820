// tests/common/mod.rs
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature};
use std::cell::Cell;
use std::path::Path;
use tempfile::TempDir;

/// Scratch repository on disk with empty-tree commits
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    counter: Cell<usize>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        TestRepo {
            dir,
            repo,
            counter: Cell::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature() -> Signature<'static> {
        Signature::now("MinVer Test", "test@example.com").unwrap()
    }

    /// Commit on top of HEAD
    pub fn commit(&self, message: &str) -> Oid {
        let parents: Vec<Oid> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap().id()],
            Err(_) => Vec::new(),
        };
        self.commit_with_parents(Some("HEAD"), message, &parents)
    }

    /// Commit a chain of `count` commits on top of HEAD, returning the last
    pub fn commits(&self, count: usize) -> Oid {
        let mut last = None;
        for i in 0..count {
            last = Some(self.commit(&format!("commit {}", i)));
        }
        last.unwrap()
    }

    /// Commit with explicit parents, optionally moving `update_ref`
    ///
    /// Every message gets a sequence number so sibling commits made within
    /// the same second never collide.
    pub fn commit_with_parents(&self, update_ref: Option<&str>, message: &str, parents: &[Oid]) -> Oid {
        let n = self.counter.get();
        self.counter.set(n + 1);

        let tree_id = self.repo.index().unwrap().write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let parents: Vec<Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).unwrap())
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();
        let sig = Self::signature();

        self.repo
            .commit(
                update_ref,
                &sig,
                &sig,
                &format!("{} #{}", message, n),
                &tree,
                &parent_refs,
            )
            .unwrap()
    }

    pub fn tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo
            .tag(name, &object, &Self::signature(), "release", false)
            .unwrap();
    }

    /// Create `name` at `target` and make it the checked out branch
    pub fn checkout_new_branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).unwrap();
        self.repo.branch(name, &commit, true).unwrap();
        self.repo.set_head(&format!("refs/heads/{}", name)).unwrap();
    }

    pub fn detach(&self, target: Oid) {
        self.repo.set_head_detached(target).unwrap();
    }
}
