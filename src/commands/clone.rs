use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{Result, WtError};
use crate::git::GitCli;
use crate::traits::GitOperations;

/// Project directory name for a repository URL: its last path segment without a
/// trailing `.git`.
#[must_use]
pub fn project_name_from_url(url: &str) -> Option<&str> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':', '\\']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);

    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Clones `url` into `<cwd>/<name>/<default branch>` and writes the project marker
/// next to it. Returns the new project directory.
///
/// # Errors
/// Returns an error if the remote default branch cannot be determined, a project
/// already exists at the target, the clone fails, or the marker cannot be written.
pub fn clone_project(cwd: &Path, url: &str, debug: bool) -> Result<PathBuf> {
    clone_project_with_git(&GitCli::new(debug), cwd, url)
}

/// # Errors
/// See [`clone_project`].
pub fn clone_project_with_git(git: &dyn GitOperations, cwd: &Path, url: &str) -> Result<PathBuf> {
    let name = project_name_from_url(url).ok_or_else(|| WtError::Git {
        operation: "clone",
        message: format!("could not determine project name from {url}"),
    })?;
    let project_dir = cwd.join(name);

    if ProjectConfig::config_path(&project_dir).exists() {
        return Err(WtError::UnsafeOperation(format!(
            "project already exists at {}",
            project_dir.display()
        )));
    }

    let default_branch = git.remote_default_branch(url)?;
    tracing::debug!(url, default_branch, project = %project_dir.display(), "cloning project");

    git.clone_repo(url, &default_branch, &project_dir.join(&default_branch))?;
    ProjectConfig::write(&project_dir, &default_branch)?;

    Ok(project_dir)
}
