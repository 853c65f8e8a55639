use anyhow::{Context, Result};
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;

use std::path::Path;
use std::process::Command;

/// A cloned git-wt project backed by a local bare "remote", all inside a temp dir
///
/// Layout:
///
/// ```text
/// <tmp>/seed/           scratch repo the remote is built from
/// <tmp>/widgets.git     bare remote, HEAD -> main, plus a `contrib` branch
/// <tmp>/work/widgets/   the project created by `git-wt clone`
/// ```
pub struct ProjectTestEnvironment {
    pub work_dir: ChildPath,
    pub origin_dir: ChildPath,
    pub project_dir: ChildPath,
    _temp_dir: TempDir, // Keep temp_dir private to ensure cleanup, but don't expose it
}

impl ProjectTestEnvironment {
    /// Builds the remote and runs `git-wt clone` against it
    ///
    /// # Errors
    /// Returns an error if any git command or the clone fails
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
        let seed = temp_dir.child("seed");
        let origin_dir = temp_dir.child("widgets.git");
        let work_dir = temp_dir.child("work");
        let project_dir = work_dir.child("widgets");

        seed.create_dir_all()?;
        work_dir.create_dir_all()?;

        Self::git(seed.path(), &["init", "--quiet"])?;
        seed.child("README.md").write_str("# Widgets")?;
        Self::git(seed.path(), &["add", "."])?;
        Self::git(seed.path(), &["commit", "--quiet", "-m", "Initial commit"])?;
        // Some git versions default to 'master'
        Self::git(seed.path(), &["branch", "-M", "main"])?;

        Self::git(seed.path(), &["checkout", "--quiet", "-b", "contrib"])?;
        seed.child("CONTRIB.md").write_str("contributed change")?;
        Self::git(seed.path(), &["add", "."])?;
        Self::git(seed.path(), &["commit", "--quiet", "-m", "Contributed change"])?;
        Self::git(seed.path(), &["checkout", "--quiet", "main"])?;

        Self::git(
            temp_dir.path(),
            &["clone", "--quiet", "--bare", "seed", "widgets.git"],
        )?;

        let env = Self {
            work_dir,
            origin_dir,
            project_dir,
            _temp_dir: temp_dir,
        };

        let output = env
            .run_command_in(env.work_dir.path(), &["clone", &env.origin_url()])?
            .output()
            .context("Failed to run git-wt clone")?;
        if !output.status.success() {
            anyhow::bail!(
                "git-wt clone failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(env)
    }

    /// Run git in `dir` with a fixed identity, returning trimmed stdout
    ///
    /// # Errors
    /// Returns an error if git cannot be run or exits unsuccessfully
    pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "Test User")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test User")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .output()
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Git command {:?} failed: {}", args, stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    #[must_use]
    pub fn origin_url(&self) -> String {
        self.origin_dir.path().display().to_string()
    }

    /// Execute git-wt from the project root
    ///
    /// # Errors
    /// Returns an error if the binary cannot be found
    pub fn run_command(&self, args: &[&str]) -> Result<assert_cmd::Command> {
        self.run_command_in(self.project_dir.path(), args)
    }

    /// Execute git-wt from an arbitrary directory
    ///
    /// # Errors
    /// Returns an error if the binary cannot be found
    pub fn run_command_in(&self, dir: &Path, args: &[&str]) -> Result<assert_cmd::Command> {
        let mut cmd =
            assert_cmd::Command::cargo_bin("git-wt").context("Failed to find git-wt binary")?;

        cmd.current_dir(dir)
            .env_remove("RUST_LOG")
            .env("GIT_AUTHOR_NAME", "Test User")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "Test User")
            .env("GIT_COMMITTER_EMAIL", "test@example.com");

        cmd.args(args);
        Ok(cmd)
    }

    /// Path of a worktree (or any entry) directly under the project directory
    #[must_use]
    pub fn worktree_path(&self, name: &str) -> ChildPath {
        self.project_dir.child(name)
    }

    /// Publishes `refs/pull/<number>/head` on the remote at the tip of `branch`,
    /// returning its commit id
    ///
    /// # Errors
    /// Returns an error if the ref cannot be created
    pub fn add_pull_request(&self, number: u32, branch: &str) -> Result<String> {
        let sha = Self::git(self.origin_dir.path(), &["rev-parse", branch])?;
        let reference = format!("refs/pull/{number}/head");
        Self::git(self.origin_dir.path(), &["update-ref", &reference, &sha])?;
        Ok(sha)
    }

    /// Local branch names as git reports them in the anchor worktree
    ///
    /// # Errors
    /// Returns an error if git fails
    pub fn local_branches(&self) -> Result<Vec<String>> {
        let output = Self::git(
            self.worktree_path("main").path(),
            &["branch", "--format=%(refname:short)"],
        )?;
        Ok(output.lines().map(str::to_string).collect())
    }
}

