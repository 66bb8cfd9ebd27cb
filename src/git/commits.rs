//! Recent commit history for prompt context.

use git2::{ErrorCode, Repository};

use crate::error::GitError;

/// How many recent commits to include as style context.
pub const RECENT_COMMIT_COUNT: usize = 10;

/// Collect the most recent commit subjects as `<short-hash> <subject>`
/// lines, newest first, newline-joined.
///
/// A repository with no commits yet yields an empty string rather than an
/// error, so generation still works on the first commit.
pub fn recent_commits(repo: &Repository, max_count: usize) -> Result<String, GitError> {
    let mut revwalk = match repo.revwalk() {
        Ok(walk) => walk,
        Err(e) => return Err(GitError::LogFailed(e)),
    };

    match revwalk.push_head() {
        Ok(()) => {}
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(String::new());
        }
        Err(e) => return Err(GitError::LogFailed(e)),
    }

    let mut lines = Vec::new();
    for oid_result in revwalk.take(max_count) {
        let oid = oid_result.map_err(GitError::LogFailed)?;
        let commit = repo.find_commit(oid).map_err(GitError::LogFailed)?;

        let short_id = commit
            .as_object()
            .short_id()
            .map_err(GitError::LogFailed)?;
        let short_id = short_id.as_str().unwrap_or_default().to_string();
        let subject = commit.summary().unwrap_or_default();

        lines.push(format!("{short_id} {subject}"));
    }

    Ok(lines.join("\n"))
}
