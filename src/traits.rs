use std::path::Path;

use crate::Result;
use crate::commands::create::WorktreeSpec;

/// Git operations the orchestrators need, each run against an explicit directory.
///
/// Implemented by [`crate::git::GitCli`]; tests substitute a recording mock.
pub trait GitOperations {
    fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()>;
    /// Branch named by the remote's symbolic `HEAD`.
    fn remote_default_branch(&self, url: &str) -> Result<String>;
    /// Commit id of `full_ref` (e.g. `refs/pull/42/head`) on the remote.
    fn remote_ref_id(&self, url: &str, full_ref: &str) -> Result<String>;
    /// URL of the `origin` remote configured for the repository at `dir`.
    fn remote_url(&self, dir: &Path) -> Result<String>;
    fn list_branches(&self, repo_dir: &Path) -> Result<Vec<String>>;
    fn delete_branch(&self, repo_dir: &Path, branch: &str, force: bool) -> Result<()>;
    fn worktree_add(&self, project_dir: &Path, spec: &WorktreeSpec, run_dir: &Path)
    -> Result<String>;
    fn worktree_list(&self, run_dir: &Path, porcelain: bool) -> Result<String>;
    fn worktree_move(&self, run_dir: &Path, from: &Path, to: &Path, force: bool)
    -> Result<String>;
    fn worktree_remove(&self, run_dir: &Path, path: &Path, force: bool) -> Result<String>;
}

#[cfg(test)]
pub mod mock {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use super::GitOperations;
    use crate::Result;
    use crate::commands::create::WorktreeSpec;
    use crate::error::WtError;

    /// Scripted git backend that records every call it receives.
    ///
    /// Worktree listings are rendered from `worktrees` (path, branch) in porcelain
    /// form; removals and branch deletions update that state so later calls see it.
    #[derive(Default)]
    pub struct MockGit {
        pub calls: RefCell<Vec<String>>,
        pub worktrees: RefCell<Vec<(PathBuf, Option<String>)>>,
        pub branches: RefCell<Vec<String>>,
        pub remote_refs: HashMap<String, Vec<String>>,
        pub origin: Option<String>,
        pub default_branch: Option<String>,
        pub fail_on: Option<&'static str>,
    }

    impl MockGit {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, operation: &'static str, detail: String) -> Result<()> {
            self.calls.borrow_mut().push(format!("{operation} {detail}"));
            if self.fail_on == Some(operation) {
                return Err(WtError::Git {
                    operation,
                    message: "fatal: scripted failure".to_string(),
                });
            }
            Ok(())
        }

        fn porcelain(&self) -> String {
            self.worktrees
                .borrow()
                .iter()
                .map(|(path, branch)| match branch {
                    Some(b) => format!(
                        "worktree {}\nHEAD 0000\nbranch refs/heads/{b}\n\n",
                        path.display()
                    ),
                    None => format!("worktree {}\nHEAD 0000\ndetached\n\n", path.display()),
                })
                .collect()
        }
    }

    impl GitOperations for MockGit {
        fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()> {
            self.record("clone", format!("{url} {branch} {}", dest.display()))
        }

        fn remote_default_branch(&self, url: &str) -> Result<String> {
            self.record("ls-remote-symref", url.to_string())?;
            self.default_branch.clone().ok_or(WtError::Git {
                operation: "ls-remote",
                message: "remote HEAD is not a symbolic ref".to_string(),
            })
        }

        fn remote_ref_id(&self, url: &str, full_ref: &str) -> Result<String> {
            self.record("ls-remote", format!("{url} {full_ref}"))?;
            let ids = self.remote_refs.get(full_ref).cloned().unwrap_or_default();
            match ids.as_slice() {
                [id] => Ok(id.clone()),
                [] => Err(WtError::RefNotFound(full_ref.to_string())),
                _ => Err(WtError::AmbiguousRef {
                    reference: full_ref.to_string(),
                    count: ids.len(),
                }),
            }
        }

        fn remote_url(&self, dir: &Path) -> Result<String> {
            self.record("remote-url", dir.display().to_string())?;
            self.origin.clone().ok_or(WtError::Git {
                operation: "remote get-url",
                message: "error: No such remote 'origin'".to_string(),
            })
        }

        fn list_branches(&self, repo_dir: &Path) -> Result<Vec<String>> {
            self.record("branch-list", repo_dir.display().to_string())?;
            Ok(self.branches.borrow().clone())
        }

        fn delete_branch(&self, repo_dir: &Path, branch: &str, force: bool) -> Result<()> {
            self.record(
                "branch-delete",
                format!("{} {branch} force={force}", repo_dir.display()),
            )?;
            self.branches.borrow_mut().retain(|b| b != branch);
            Ok(())
        }

        fn worktree_add(
            &self,
            project_dir: &Path,
            spec: &WorktreeSpec,
            run_dir: &Path,
        ) -> Result<String> {
            self.record(
                "worktree-add",
                format!(
                    "{} {} in {}",
                    project_dir.join(&spec.name).display(),
                    spec.checkout_target(),
                    run_dir.display()
                ),
            )?;
            Ok(format!("Preparing worktree ({})\n", spec.checkout_target()))
        }

        fn worktree_list(&self, run_dir: &Path, porcelain: bool) -> Result<String> {
            self.record(
                "worktree-list",
                format!("{} porcelain={porcelain}", run_dir.display()),
            )?;
            Ok(self.porcelain())
        }

        fn worktree_move(
            &self,
            run_dir: &Path,
            from: &Path,
            to: &Path,
            force: bool,
        ) -> Result<String> {
            self.record(
                "worktree-move",
                format!(
                    "{} -> {} in {} force={force}",
                    from.display(),
                    to.display(),
                    run_dir.display()
                ),
            )?;
            Ok(String::new())
        }

        fn worktree_remove(&self, run_dir: &Path, path: &Path, force: bool) -> Result<String> {
            self.record(
                "worktree-remove",
                format!("{} in {} force={force}", path.display(), run_dir.display()),
            )?;
            self.worktrees.borrow_mut().retain(|(p, _)| p != path);
            Ok(String::new())
        }
    }
}
