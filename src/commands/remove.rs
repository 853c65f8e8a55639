use crate::error::{Result, WtError};
use crate::git::GitCli;
use crate::project::ProjectContext;
use crate::traits::GitOperations;

/// Removes the worktree `name` from the project.
///
/// # Errors
/// Returns [`WtError::UnsafeOperation`] if the command was run from inside the
/// worktree being removed, otherwise whatever git reports (for example a dirty
/// worktree without `force`).
pub fn remove_worktree(ctx: &ProjectContext, name: &str, force: bool) -> Result<String> {
    remove_worktree_with_git(&GitCli::new(ctx.debug), ctx, name, force)
}

/// Removes a worktree with a custom git backend (for testing)
///
/// # Errors
/// See [`remove_worktree`].
pub fn remove_worktree_with_git(
    git: &dyn GitOperations,
    ctx: &ProjectContext,
    name: &str,
    force: bool,
) -> Result<String> {
    let worktree_path = ctx.worktree_path(name);

    if ctx.is_within(&worktree_path) {
        return Err(WtError::UnsafeOperation(
            "cannot remove worktree; current working directory within worktree".to_string(),
        ));
    }

    tracing::debug!(path = %worktree_path.display(), force, "removing worktree");
    git.worktree_remove(&ctx.run_dir(), &worktree_path, force)
}
