//! # git-wt
//!
//! A git helper for managing worktrees as part of a worktree-based workflow. A
//! project is a directory holding one worktree per line of work, side by side:
//!
//! ```text
//! widgets/
//! ├── .git-wt        # "default: main"
//! ├── main/          # anchor worktree, owns the repository
//! ├── feature-a/
//! └── pr42/
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Clone into widgets/main and mark widgets/ as the project
//! git-wt clone https://github.com/acme/widgets.git
//!
//! # Add a worktree for a new branch, or pinned to a pull request head
//! git-wt mk feature-a main -b feature-a
//! git-wt mk pr42 pr/42
//!
//! # Drop every worktree and branch except the default
//! git-wt xx --most
//! ```
//!
//! ## Module Structure
//!
//! - [`project`] - Finds the project root and derives the per-invocation context
//! - [`config`] - Reads and writes the `.git-wt` marker file
//! - [`git`] - Git gateway and `worktree list --porcelain` parsing
//! - [`commands`] - Orchestration for clone, ls, mk, mv, rm and xx
//! - [`traits`] - Defines the GitOperations trait for testability and abstraction
//! - [`error`] - Error taxonomy

pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod project;
pub mod traits;

pub use error::{Result, WtError};
