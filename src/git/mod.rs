pub mod porcelain;

use git2::{BranchType, Repository};
use std::path::Path;
use std::process::Command;

use crate::commands::create::WorktreeSpec;
use crate::error::{Result, WtError};
use crate::traits::GitOperations;

/// Git gateway backed by the `git` binary, with local repository reads through git2.
///
/// Every call names the directory it runs in; remote-only commands (`clone`,
/// `ls-remote`) take a URL and need none.
pub struct GitCli {
    debug: bool,
}

struct GitOutput {
    stdout: String,
    stderr: String,
}

impl GitOutput {
    /// Git reports worktree progress on stderr and results on stdout.
    fn combined(self) -> String {
        self.stderr + &self.stdout
    }
}

impl GitCli {
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    fn command(dir: Option<&Path>, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        cmd.args(args);
        cmd
    }

    fn run(&self, operation: &'static str, mut cmd: Command) -> Result<GitOutput> {
        tracing::debug!(operation, command = ?cmd, "running git");

        let output = cmd
            .output()
            .map_err(WtError::io(format!("failed to execute git {operation}")))?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::debug!(operation, status = ?output.status, "git failed");
            return Err(WtError::Git {
                operation,
                message: stderr.trim_end().to_string(),
            });
        }

        if self.debug && !stderr.is_empty() {
            tracing::debug!(operation, stderr = %stderr.trim_end(), "git stderr");
        }

        Ok(GitOutput { stdout, stderr })
    }

    fn open(operation: &'static str, dir: &Path) -> Result<Repository> {
        Repository::discover(dir).map_err(WtError::git(operation))
    }
}

/// Extracts the branch from `ref: refs/heads/<branch>\tHEAD` in `ls-remote --symref` output.
fn parse_symref_head(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let target = line.strip_prefix("ref: ")?;
        let reference = target.split('\t').next().unwrap_or(target).trim();
        let branch = reference.strip_prefix("refs/heads/").unwrap_or(reference);
        (!branch.is_empty()).then(|| branch.to_string())
    })
}

/// Commit ids from `<id>\t<ref>` lines.
fn parse_ref_ids(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect()
}

impl GitOperations for GitCli {
    fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<()> {
        let mut cmd = Self::command(None, &["clone", "--branch", branch]);
        if !self.debug {
            cmd.arg("--quiet");
        }
        cmd.arg(url).arg(dest);

        self.run("clone", cmd)?;
        Ok(())
    }

    fn remote_default_branch(&self, url: &str) -> Result<String> {
        let cmd = Self::command(None, &["ls-remote", "--symref", url, "HEAD"]);
        let output = self.run("ls-remote", cmd)?;

        let branch = parse_symref_head(&output.stdout).ok_or_else(|| WtError::Git {
            operation: "ls-remote",
            message: "could not determine default branch from HEAD ref".to_string(),
        })?;
        tracing::debug!(url, branch, "remote default branch");
        Ok(branch)
    }

    fn remote_ref_id(&self, url: &str, full_ref: &str) -> Result<String> {
        let cmd = Self::command(None, &["ls-remote", url, full_ref]);
        let output = self.run("ls-remote", cmd)?;

        match parse_ref_ids(&output.stdout).as_slice() {
            [id] => Ok((*id).to_string()),
            [] => Err(WtError::RefNotFound(full_ref.to_string())),
            ids => Err(WtError::AmbiguousRef {
                reference: full_ref.to_string(),
                count: ids.len(),
            }),
        }
    }

    fn remote_url(&self, dir: &Path) -> Result<String> {
        const OPERATION: &str = "remote get-url";

        let repo = Self::open(OPERATION, dir)?;
        let remote = repo.find_remote("origin").map_err(WtError::git(OPERATION))?;
        let url = remote.url().ok_or_else(|| WtError::Git {
            operation: OPERATION,
            message: "origin URL is not valid UTF-8".to_string(),
        })?;

        tracing::debug!(dir = %dir.display(), url, "origin remote");
        Ok(url.to_string())
    }

    fn list_branches(&self, repo_dir: &Path) -> Result<Vec<String>> {
        const OPERATION: &str = "branch list";

        let repo = Self::open(OPERATION, repo_dir)?;
        let branches = repo
            .branches(Some(BranchType::Local))
            .map_err(WtError::git(OPERATION))?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(WtError::git(OPERATION))?;
            if let Some(name) = branch.name().map_err(WtError::git(OPERATION))? {
                names.push(name.to_string());
            }
        }

        tracing::debug!(?names, "local branches");
        Ok(names)
    }

    fn delete_branch(&self, repo_dir: &Path, branch: &str, force: bool) -> Result<()> {
        let flag = if force { "-D" } else { "-d" };
        let cmd = Self::command(Some(repo_dir), &["branch", flag, branch]);
        self.run("branch delete", cmd)?;
        Ok(())
    }

    fn worktree_add(
        &self,
        project_dir: &Path,
        spec: &WorktreeSpec,
        run_dir: &Path,
    ) -> Result<String> {
        let mut cmd = Self::command(Some(run_dir), &["worktree", "add"]);

        if spec.quiet {
            cmd.arg("--quiet");
        }
        if spec.force {
            cmd.arg("--force");
        }
        if spec.no_checkout {
            cmd.arg("--no-checkout");
        }
        if spec.track {
            cmd.arg("--track");
        }
        if let Some(branch) = &spec.new_branch {
            cmd.arg("-b").arg(branch);
        }
        if let Some(branch) = &spec.reset_branch {
            cmd.arg("-B").arg(branch);
        }
        cmd.arg(project_dir.join(&spec.name))
            .arg(spec.checkout_target());

        Ok(self.run("worktree add", cmd)?.combined())
    }

    fn worktree_list(&self, run_dir: &Path, porcelain: bool) -> Result<String> {
        let mut cmd = Self::command(Some(run_dir), &["worktree", "list"]);
        if porcelain {
            cmd.arg("--porcelain");
        }
        Ok(self.run("worktree list", cmd)?.stdout)
    }

    fn worktree_move(&self, run_dir: &Path, from: &Path, to: &Path, force: bool) -> Result<String> {
        let mut cmd = Self::command(Some(run_dir), &["worktree", "move"]);
        if force {
            cmd.arg("--force");
        }
        cmd.arg(from).arg(to);

        Ok(self.run("worktree move", cmd)?.combined())
    }

    fn worktree_remove(&self, run_dir: &Path, path: &Path, force: bool) -> Result<String> {
        let mut cmd = Self::command(Some(run_dir), &["worktree", "remove"]);
        if force {
            cmd.arg("--force");
        }
        cmd.arg(path);

        Ok(self.run("worktree remove", cmd)?.combined())
    }
}
