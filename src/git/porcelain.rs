//! Parser for `git worktree list --porcelain`.
//!
//! Only two line kinds matter here, one record per line, in output order:
//!
//! - `worktree <absolute path>` opens a worktree entry
//! - `branch <full ref>` names the branch checked out in the current entry
//!
//! Everything else (`HEAD`, `detached`, `bare`, `locked`, blank separators) is
//! reported as [`Record::Other`] and ignored by the helpers.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const WORKTREE_PREFIX: &str = "worktree ";
const BRANCH_PREFIX: &str = "branch ";
const HEADS_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    Worktree(&'a Path),
    Branch(&'a str),
    Other(&'a str),
}

#[must_use]
pub fn records(output: &str) -> impl Iterator<Item = Record<'_>> {
    output.lines().map(|line| {
        if let Some(path) = line.strip_prefix(WORKTREE_PREFIX) {
            Record::Worktree(Path::new(path))
        } else if let Some(reference) = line.strip_prefix(BRANCH_PREFIX) {
            Record::Branch(reference)
        } else {
            Record::Other(line)
        }
    })
}

/// Paths of every listed worktree, in listing order.
#[must_use]
pub fn worktree_paths(output: &str) -> Vec<PathBuf> {
    records(output)
        .filter_map(|record| match record {
            Record::Worktree(path) => Some(path.to_path_buf()),
            _ => None,
        })
        .collect()
}

/// Short names of the branches checked out in any worktree.
#[must_use]
pub fn checked_out_branches(output: &str) -> BTreeSet<String> {
    records(output)
        .filter_map(|record| match record {
            Record::Branch(reference) => Some(
                reference
                    .strip_prefix(HEADS_PREFIX)
                    .unwrap_or(reference)
                    .to_string(),
            ),
            _ => None,
        })
        .collect()
}
