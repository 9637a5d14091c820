use crate::domain::{CommitId, Tag};
use crate::error::{MinVerError, Result};
use git2::{ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Discover the repository containing `path`, searching parent directories
    ///
    /// # Returns
    /// * `Ok(Some(repo))` - `path` is inside a repository or workdir
    /// * `Ok(None)` - no repository was found up to the filesystem root
    /// * `Err(PathNotFound)` - `path` does not exist
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MinVerError::PathNotFound(path.display().to_string()));
        }

        match Git2Repo::discover(path) {
            Ok(repo) => {
                debug!(path = %repo.path().display(), "discovered repository");
                Ok(Some(Git2Repository { repo }))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

impl super::CommitGraph for Git2Repository {
    fn head(&self) -> Result<Option<CommitId>> {
        match self.repo.head() {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id().into())),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn parents_of(&self, commit: &CommitId) -> Result<Vec<CommitId>> {
        let oid = Oid::from_str(commit.as_str())?;
        let commit = self.repo.find_commit(oid)?;

        Ok(commit.parent_ids().map(CommitId::from).collect())
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::with_capacity(names.len());

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Annotated tags peel through the tag object to the commit
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(Tag::new(name, commit.id().into())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag that doesn't point at a commit"),
            }
        }

        Ok(tags)
    }

    fn current_branch_name(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
