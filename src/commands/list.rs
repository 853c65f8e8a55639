use crate::error::Result;
use crate::git::GitCli;
use crate::project::ProjectContext;
use crate::traits::GitOperations;

/// Lists the project's worktrees, as `git worktree list` prints them.
///
/// # Errors
/// Returns an error if git fails to list worktrees.
pub fn list_worktrees(ctx: &ProjectContext, porcelain: bool) -> Result<String> {
    list_worktrees_with_git(&GitCli::new(ctx.debug), ctx, porcelain)
}

/// # Errors
/// See [`list_worktrees`].
pub fn list_worktrees_with_git(
    git: &dyn GitOperations,
    ctx: &ProjectContext,
    porcelain: bool,
) -> Result<String> {
    git.worktree_list(&ctx.run_dir(), porcelain)
}
