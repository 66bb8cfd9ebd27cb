//! Staged diff collection using git2.

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::warn;

use crate::error::GitError;

/// Maximum characters for the unified diff text before truncation. Keeps the
/// prompt within sane token budgets on large staged changes.
const MAX_DIFF_LENGTH: usize = 30_000;

/// The staged changes, rendered as unified diff text.
#[derive(Debug, Clone)]
pub struct StagedDiff {
    pub text: String,
    pub truncated: bool,
    pub files_changed: usize,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so newly initialized repos with staged files still produce a diff.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the staged diff (HEAD tree to index, the `git diff --cached`
/// equivalent).
///
/// Fails with [`GitError::NoStagedChanges`] when nothing is staged, before
/// any further work happens.
pub fn staged_diff(repo: &Repository) -> Result<StagedDiff, GitError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;

    let files_changed = diff.deltas().len();
    if files_changed == 0 {
        return Err(GitError::NoStagedChanges);
    }

    let (text, truncated) = render_diff_text(&diff);
    if text.trim().is_empty() {
        return Err(GitError::NoStagedChanges);
    }

    Ok(StagedDiff {
        text,
        truncated,
        files_changed,
    })
}

/// Render unified diff text from a diff object, respecting the max length.
fn render_diff_text(diff: &Diff<'_>) -> (String, bool) {
    let mut text = String::new();
    let mut truncated = false;

    if let Err(e) = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if truncated {
            return true;
        }

        let content = std::str::from_utf8(line.content()).unwrap_or("");

        if text.len() + content.len() + 2 > MAX_DIFF_LENGTH {
            truncated = true;
            return true;
        }

        // Include the origin character for context
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(content);

        true
    }) {
        warn!("Failed to render staged diff text: {e}");
        truncated = true;
    }

    (text, truncated)
}
