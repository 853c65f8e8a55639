use crate::error::{Result, WtError};
use crate::git::GitCli;
use crate::project::ProjectContext;
use crate::traits::GitOperations;

/// Shorthands that name a pull/merge request head on the remote.
const REQUEST_PREFIXES: [&str; 4] = ["pull/", "pr/", "merge-requests/", "mr/"];

/// Inputs of `mk`: where the worktree goes, what it checks out, and the
/// `git worktree add` flags to pass along.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeSpec {
    pub name: String,
    pub commitish: String,
    /// `-b`: create a new branch.
    pub new_branch: Option<String>,
    /// `-B`: create or reset a branch.
    pub reset_branch: Option<String>,
    pub track: bool,
    pub no_checkout: bool,
    pub force: bool,
    pub quiet: bool,
    /// Commit a pull/merge request shorthand resolved to; checked out instead of
    /// `commitish` when set.
    pub resolved_ref_id: Option<String>,
}

impl WorktreeSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, commitish: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commitish: commitish.into(),
            ..Self::default()
        }
    }

    /// Rejects flag combinations git would misinterpret.
    ///
    /// # Errors
    /// Returns [`WtError::FlagConflict`] when both `-b` and `-B` are given, or when
    /// `--track` is given without either.
    pub fn validate(&self) -> Result<()> {
        if self.new_branch.is_some() && self.reset_branch.is_some() {
            return Err(WtError::FlagConflict(
                "set branch with either -b or -B; don't use both".to_string(),
            ));
        }
        if self.track && self.new_branch.is_none() && self.reset_branch.is_none() {
            return Err(WtError::FlagConflict(
                "track requires new branch via -b or -B".to_string(),
            ));
        }
        Ok(())
    }

    /// What `git worktree add` should check out.
    #[must_use]
    pub fn checkout_target(&self) -> &str {
        self.resolved_ref_id.as_deref().unwrap_or(&self.commitish)
    }
}

/// Maps a pull/merge request shorthand to its canonical remote ref name
/// (`pr/42` becomes `pull/42/head`, `mr/7` becomes `merge-requests/7/head`).
/// Returns `None` for anything else.
#[must_use]
pub fn normalize_request_ref(commitish: &str) -> Option<String> {
    if !REQUEST_PREFIXES.iter().any(|p| commitish.starts_with(p)) {
        return None;
    }

    let mut reference = if let Some(rest) = commitish.strip_prefix("pr/") {
        format!("pull/{rest}")
    } else if let Some(rest) = commitish.strip_prefix("mr/") {
        format!("merge-requests/{rest}")
    } else {
        commitish.to_string()
    };

    if !reference.ends_with("/head") {
        reference.push_str("/head");
    }
    Some(reference)
}

/// Adds a worktree named `spec.name` under the project directory.
///
/// # Errors
/// Returns an error if the flags conflict, a request ref cannot be resolved to
/// exactly one commit, or git fails to add the worktree.
pub fn make_worktree(ctx: &ProjectContext, spec: WorktreeSpec) -> Result<String> {
    make_worktree_with_git(&GitCli::new(ctx.debug), ctx, spec)
}

/// Test version that accepts a mock git backend
///
/// # Errors
/// See [`make_worktree`].
pub fn make_worktree_with_git(
    git: &dyn GitOperations,
    ctx: &ProjectContext,
    mut spec: WorktreeSpec,
) -> Result<String> {
    spec.validate()?;
    tracing::debug!(?spec, "making worktree");

    if let Some(reference) = normalize_request_ref(&spec.commitish) {
        let url = git.remote_url(&ctx.anchor_dir())?;
        tracing::debug!(url, reference, "resolving request ref");

        let id = git.remote_ref_id(&url, &format!("refs/{reference}"))?;
        tracing::debug!(id, "request ref resolved");
        spec.resolved_ref_id = Some(id);
    }

    git.worktree_add(&ctx.project_dir, &spec, &ctx.run_dir())
}
