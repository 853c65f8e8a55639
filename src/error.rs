//! Error taxonomy shared by every project-scoped operation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WtError>;

#[derive(Debug, Error)]
pub enum WtError {
    /// No marker file exists at or above the starting directory.
    #[error("no project config file found above {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid project config {}: expected a line starting with 'default: '", .path.display())]
    Parse { path: PathBuf },

    /// Mutually exclusive or incomplete command flags.
    #[error("config: {0}")]
    FlagConflict(String),

    #[error("{0}")]
    UnsafeOperation(String),

    #[error("branch checked out in worktree, remove worktree first: {0}")]
    BranchInUse(String),

    #[error("no matching ref on remote: {0}")]
    RefNotFound(String),

    #[error("got more than one matching ref from remote for {reference}: {count}")]
    AmbiguousRef { reference: String, count: usize },

    /// Git reported a failure; `message` is its output verbatim.
    #[error("{operation}: {message}")]
    Git {
        operation: &'static str,
        message: String,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl WtError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }

    pub(crate) fn git(operation: &'static str) -> impl FnOnce(git2::Error) -> Self {
        move |e| Self::Git {
            operation,
            message: e.message().to_string(),
        }
    }
}
