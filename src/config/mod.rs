//! Project configuration stored in the marker file at the project root.
//!
//! The marker is a single line:
//!
//! ```text
//! default: main
//! ```
//!
//! The named branch is the anchor worktree: `<project>/<default>` holds the
//! repository that git subcommands run against when invoked from the project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WtError};

/// Literal prefix the marker's first line must carry.
pub const DEFAULT_PREFIX: &str = "default: ";

/// Name of the marker file, `.git-wt`.
#[must_use]
pub fn marker_name() -> String {
    format!(".{}", env!("CARGO_PKG_NAME"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub default_branch: String,
}

impl ProjectConfig {
    #[must_use]
    pub fn config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(marker_name())
    }

    /// Creates or truncates the marker under `project_dir` and writes
    /// `default: <branch>` to it.
    ///
    /// # Errors
    /// Returns [`WtError::Io`] if the file cannot be written.
    pub fn write(project_dir: &Path, branch: &str) -> Result<PathBuf> {
        let path = Self::config_path(project_dir);
        tracing::debug!(path = %path.display(), branch, "writing project config");

        fs::write(&path, format!("{DEFAULT_PREFIX}{branch}"))
            .map_err(WtError::io(format!("could not create config file {}", path.display())))?;

        Ok(path)
    }

    /// Reads a marker file.
    ///
    /// # Errors
    /// Returns [`WtError::Io`] if the file cannot be read, and [`WtError::Parse`] if
    /// it does not start with `default: ` followed by a branch name.
    pub fn read(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).map_err(WtError::io(format!(
            "error reading config file {}",
            config_path.display()
        )))?;

        let parse_error = || WtError::Parse {
            path: config_path.to_path_buf(),
        };

        let line = content.lines().next().ok_or_else(parse_error)?;
        let branch = line
            .strip_prefix(DEFAULT_PREFIX)
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(parse_error)?;

        tracing::debug!(branch, "read project config");
        Ok(Self {
            default_branch: branch.to_string(),
        })
    }
}
