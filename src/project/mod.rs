//! Project discovery and the per-invocation context derived from it.

use std::path::{Component, Path, PathBuf};

use crate::config::{ProjectConfig, marker_name};
use crate::error::{Result, WtError};

/// Where a project's marker file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub project_dir: PathBuf,
    pub config_path: PathBuf,
}

/// Walks upward from `start_dir` until a directory holding the marker file is found.
///
/// # Errors
/// Returns [`WtError::NotFound`] once the filesystem root has been checked without
/// finding a marker.
pub fn locate(start_dir: &Path) -> Result<Location> {
    let marker = marker_name();
    let mut candidate = normalize(start_dir);

    loop {
        let config_path = candidate.join(&marker);
        tracing::debug!(path = %config_path.display(), "checking for project config");

        if config_path.is_file() {
            return Ok(Location {
                project_dir: candidate,
                config_path,
            });
        }

        match candidate.parent() {
            Some(parent) => candidate = parent.to_path_buf(),
            None => return Err(WtError::NotFound(start_dir.to_path_buf())),
        }
    }
}

/// Lexically cleans a path: drops `.` components and folds `..` into its parent.
/// Symlinks are not resolved.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Per-invocation view of the project, computed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub initial_dir: PathBuf,
    pub project_dir: PathBuf,
    pub default_branch: String,
    pub debug: bool,
}

impl ProjectContext {
    /// Resolves the project containing `initial_dir` and reads its default branch.
    ///
    /// # Errors
    /// Returns [`WtError::NotFound`] when no marker exists at or above `initial_dir`,
    /// or the error from reading the marker.
    pub fn load(initial_dir: &Path, debug: bool) -> Result<Self> {
        let location = locate(initial_dir)?;
        let config = ProjectConfig::read(&location.config_path)?;

        let ctx = Self {
            initial_dir: normalize(initial_dir),
            project_dir: location.project_dir,
            default_branch: config.default_branch,
            debug,
        };
        tracing::debug!(?ctx, "loaded project context");
        Ok(ctx)
    }

    /// Resolves the project from the process working directory.
    ///
    /// # Errors
    /// Returns [`WtError::Io`] if the working directory is unavailable, otherwise as
    /// [`ProjectContext::load`].
    pub fn from_current_dir(debug: bool) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(WtError::io("error locating working directory"))?;
        Self::load(&cwd, debug)
    }

    /// The worktree checked out at the default branch.
    #[must_use]
    pub fn anchor_dir(&self) -> PathBuf {
        self.project_dir.join(&self.default_branch)
    }

    /// `<project>/<name>`, lexically cleaned so it compares against `initial_dir`.
    #[must_use]
    pub fn worktree_path(&self, name: &str) -> PathBuf {
        normalize(&self.project_dir.join(name))
    }

    #[must_use]
    pub fn at_project_root(&self) -> bool {
        self.initial_dir == self.project_dir
    }

    /// Directory git subcommands run in: the anchor worktree when invoked from the
    /// project root (which is not itself a repository), otherwise where the user is.
    #[must_use]
    pub fn run_dir(&self) -> PathBuf {
        if self.at_project_root() {
            self.anchor_dir()
        } else {
            self.initial_dir.clone()
        }
    }

    /// Whether the invocation directory is `path` or lies beneath it.
    #[must_use]
    pub fn is_within(&self, path: &Path) -> bool {
        self.initial_dir.starts_with(path)
    }
}
