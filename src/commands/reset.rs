//! Project reset (`xx`).
//!
//! Steps run in a fixed order: a full wipe and re-clone (`all`), then worktree
//! removal (`worktrees`/`most`), then branch deletion (`branches`/`most`).
//! Worktrees go first because git will not delete a branch that is checked out.
//! Nothing is rolled back if a later step fails.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::marker_name;
use crate::error::{Result, WtError};
use crate::git::{GitCli, porcelain};
use crate::project::ProjectContext;
use crate::traits::GitOperations;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSpec {
    /// Delete local branches other than the default branch.
    pub branches: bool,
    /// Delete worktrees other than the anchor.
    pub worktrees: bool,
    /// Both of the above.
    pub most: bool,
    /// Delete everything but the marker and clone again.
    pub all: bool,
}

impl ResetSpec {
    /// # Errors
    /// Returns [`WtError::FlagConflict`] if `most`/`all` are combined with each other
    /// or with `branches`/`worktrees`, or if nothing was asked for.
    pub fn validate(&self) -> Result<()> {
        if self.most && (self.branches || self.worktrees) {
            return Err(WtError::FlagConflict(
                "most and branches/worktrees set; use one or the other".to_string(),
            ));
        }
        if self.all && (self.branches || self.worktrees) {
            return Err(WtError::FlagConflict(
                "all and branches/worktrees set; use one or the other".to_string(),
            ));
        }
        if self.most && self.all {
            return Err(WtError::FlagConflict(
                "most and all both set; use one or the other".to_string(),
            ));
        }
        if !(self.branches || self.worktrees || self.most || self.all) {
            return Err(WtError::FlagConflict(
                "no flags; must specify what to reset".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resets the project, writing one line to `out` per deletion.
///
/// # Errors
/// Returns [`WtError::UnsafeOperation`] unless run from the project root,
/// [`WtError::FlagConflict`] for invalid flags (both before anything is touched),
/// [`WtError::BranchInUse`] if a branch to delete is still checked out, and git or
/// filesystem errors from the individual steps.
pub fn reset_project(ctx: &ProjectContext, spec: ResetSpec, out: &mut dyn Write) -> Result<()> {
    reset_project_with_git(&GitCli::new(ctx.debug), ctx, spec, out)
}

/// # Errors
/// See [`reset_project`].
pub fn reset_project_with_git(
    git: &dyn GitOperations,
    ctx: &ProjectContext,
    spec: ResetSpec,
    out: &mut dyn Write,
) -> Result<()> {
    if !ctx.at_project_root() {
        return Err(WtError::UnsafeOperation(format!(
            "not in project dir: change dir to {}",
            ctx.project_dir.display()
        )));
    }
    spec.validate()?;
    tracing::debug!(?spec, "resetting project");

    if spec.all {
        reclone(git, ctx, out)?;
    }
    if spec.worktrees || spec.most {
        delete_worktrees(git, ctx, out)?;
    }
    if spec.branches || spec.most {
        delete_branches(git, ctx, out)?;
    }

    Ok(())
}

fn report(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{line}").map_err(WtError::io("error writing output"))
}

fn reclone(git: &dyn GitOperations, ctx: &ProjectContext, out: &mut dyn Write) -> Result<()> {
    let anchor = ctx.anchor_dir();
    let url = git.remote_url(&anchor)?;
    tracing::debug!(url, "remote for clone after reset");

    delete_project_contents(&ctx.project_dir)?;
    git.clone_repo(&url, &ctx.default_branch, &anchor)?;

    report(out, &format!("Cloned {url} into {}", anchor.display()))
}

/// Deletes every entry of `project_dir` except the marker file.
fn delete_project_contents(project_dir: &Path) -> Result<()> {
    let marker = marker_name();
    let read_error = || WtError::io(format!("error reading {}", project_dir.display()));

    for entry in fs::read_dir(project_dir).map_err(read_error())? {
        let entry = entry.map_err(read_error())?;
        let path = entry.path();

        if entry.file_name() == marker.as_str() {
            tracing::debug!(path = %path.display(), "keeping config file");
            continue;
        }

        let file_type = entry.file_type().map_err(read_error())?;
        tracing::debug!(path = %path.display(), "deleting");
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(WtError::io(format!("error deleting {}", path.display())))?;
    }

    Ok(())
}

fn delete_worktrees(git: &dyn GitOperations, ctx: &ProjectContext, out: &mut dyn Write) -> Result<()> {
    let run_dir = ctx.run_dir();
    let anchor = ctx.anchor_dir();
    let listing = git.worktree_list(&run_dir, true)?;

    let doomed: Vec<_> = porcelain::worktree_paths(&listing)
        .into_iter()
        .filter(|path| {
            let is_anchor = *path == anchor
                || path
                    .file_name()
                    .is_some_and(|name| name == ctx.default_branch.as_str());
            if is_anchor {
                tracing::debug!(path = %path.display(), "keeping default branch worktree");
            }
            !is_anchor
        })
        .collect();
    tracing::debug!(?doomed, "worktrees to delete");

    for path in doomed {
        git.worktree_remove(&run_dir, &path, true)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        report(out, &format!("Deleted worktree: {name}"))?;
    }

    Ok(())
}

fn delete_branches(git: &dyn GitOperations, ctx: &ProjectContext, out: &mut dyn Write) -> Result<()> {
    let run_dir = ctx.run_dir();
    let branches = git.list_branches(&run_dir)?;
    let checked_out = porcelain::checked_out_branches(&git.worktree_list(&run_dir, true)?);
    tracing::debug!(?branches, ?checked_out, "branches to consider");

    for branch in branches.iter().filter(|b| **b != ctx.default_branch) {
        if checked_out.contains(branch) {
            return Err(WtError::BranchInUse(branch.clone()));
        }
        git.delete_branch(&run_dir, branch, true)?;
        report(out, &format!("Deleted branch: {branch}"))?;
    }

    Ok(())
}
