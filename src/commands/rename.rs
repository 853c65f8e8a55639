use crate::error::{Result, WtError};
use crate::git::GitCli;
use crate::project::ProjectContext;
use crate::traits::GitOperations;

/// Moves worktree `old_name` to `new_name` within the project directory.
///
/// # Errors
/// Returns [`WtError::UnsafeOperation`] if the command was run from inside the
/// worktree being moved, otherwise whatever git reports.
pub fn move_worktree(
    ctx: &ProjectContext,
    old_name: &str,
    new_name: &str,
    force: bool,
) -> Result<String> {
    move_worktree_with_git(&GitCli::new(ctx.debug), ctx, old_name, new_name, force)
}

/// Test version that accepts a mock git backend
///
/// # Errors
/// See [`move_worktree`].
pub fn move_worktree_with_git(
    git: &dyn GitOperations,
    ctx: &ProjectContext,
    old_name: &str,
    new_name: &str,
    force: bool,
) -> Result<String> {
    let from = ctx.worktree_path(old_name);
    let to = ctx.worktree_path(new_name);

    if ctx.is_within(&from) {
        return Err(WtError::UnsafeOperation(
            "cannot move worktree; current working directory within worktree".to_string(),
        ));
    }

    tracing::debug!(from = %from.display(), to = %to.display(), force, "moving worktree");
    git.worktree_move(&ctx.run_dir(), &from, &to, force)
}
