//! Git collaborators: staged diff, recent history, and committing the
//! chosen message.

pub mod commits;
pub mod diff;

use git2::{Oid, Repository};

use crate::error::GitError;

pub use commits::{RECENT_COMMIT_COUNT, recent_commits};
pub use diff::{StagedDiff, staged_diff};

/// Open the repository at the current working directory.
pub fn open_repo() -> Result<Repository, GitError> {
    Repository::open(".").map_err(GitError::OpenRepository)
}

/// Commit the staged index as-is with the given message.
///
/// Nothing is staged here: the tool only ever operates on changes the user
/// already staged. Handles the first commit of a fresh repository (no
/// parent).
pub fn commit_staged(repo: &Repository, message: &str) -> Result<Oid, GitError> {
    let mut index = repo.index().map_err(GitError::CommitFailed)?;
    let tree_id = index.write_tree().map_err(GitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;

    let sig = repo.signature().map_err(GitError::SignatureMissing)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(GitError::CommitFailed)?),
        Err(_) => None,
    };
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(GitError::CommitFailed)
}
