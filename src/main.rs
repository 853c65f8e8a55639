use std::io::{self, Write};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use tracing_subscriber::EnvFilter;

use git_wt::commands::completions::{self, Shell};
use git_wt::commands::create::{self, WorktreeSpec};
use git_wt::commands::reset::{self, ResetSpec};
use git_wt::commands::{clone, list, remove, rename};
use git_wt::project::ProjectContext;

#[derive(Parser)]
#[command(name = "git-wt")]
#[command(about = "A git helper for managing worktrees as part of a workflow")]
#[command(version)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone a repo for a git-wt workflow
    #[command(visible_alias = "cl")]
    Clone {
        /// URL of the repository to clone
        #[arg(value_hint = ValueHint::Url)]
        repo_url: String,
    },
    /// List worktrees for the project
    #[command(visible_alias = "list")]
    Ls {
        /// Machine-readable output
        #[arg(long)]
        porcelain: bool,
    },
    /// Add a worktree to the project
    #[command(visible_alias = "make")]
    Mk {
        /// Directory name of the worktree under the project
        #[arg(value_hint = ValueHint::Other)]
        name: String,
        /// Branch, tag, commit, or pull/merge request (pr/<n>, mr/<n>) to check out
        #[arg(value_hint = ValueHint::Other)]
        commitish: String,
        /// Set up tracking mode
        #[arg(long)]
        track: bool,
        /// Create a new branch
        #[arg(short = 'b', value_name = "BRANCH")]
        new_branch: Option<String>,
        /// Create or reset a branch
        #[arg(short = 'B', value_name = "BRANCH")]
        reset_branch: Option<String>,
        /// Do not populate the new worktree
        #[arg(long)]
        no_checkout: bool,
        /// Checkout <commitish> even if already checked out in other worktree
        #[arg(short, long)]
        force: bool,
        /// Suppress progress reporting
        #[arg(short, long)]
        quiet: bool,
    },
    /// Move a worktree within the project
    #[command(visible_aliases = ["move", "ren", "rename"])]
    Mv {
        #[arg(value_hint = ValueHint::Other)]
        old_name: String,
        #[arg(value_hint = ValueHint::Other)]
        new_name: String,
        /// Force move even if worktree is dirty or locked
        #[arg(short, long)]
        force: bool,
    },
    /// Remove a worktree from the project
    #[command(visible_aliases = ["remove", "del", "delete"])]
    Rm {
        #[arg(value_hint = ValueHint::Other)]
        name: String,
        /// Force removal even if worktree is dirty or locked
        #[arg(short, long)]
        force: bool,
    },
    /// Reset the project
    Xx {
        /// Delete local branches
        #[arg(short, long)]
        branches: bool,
        /// Delete all worktrees except the default branch
        #[arg(short, long)]
        worktrees: bool,
        /// Delete local branches and all worktrees except the default branch
        #[arg(short, long)]
        most: bool,
        /// Delete everything and clone again
        #[arg(short, long)]
        all: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Clone { repo_url } => {
            println!("Cloning {repo_url}.");
            let cwd = std::env::current_dir()?;
            clone::clone_project(&cwd, &repo_url, cli.debug)?;
            println!("Clone complete.");
        }
        Commands::Ls { porcelain } => {
            let ctx = ProjectContext::from_current_dir(cli.debug)?;
            print!("{}", list::list_worktrees(&ctx, porcelain)?);
        }
        Commands::Mk {
            name,
            commitish,
            track,
            new_branch,
            reset_branch,
            no_checkout,
            force,
            quiet,
        } => {
            let ctx = ProjectContext::from_current_dir(cli.debug)?;
            let spec = WorktreeSpec {
                name,
                commitish,
                new_branch,
                reset_branch,
                track,
                no_checkout,
                force,
                quiet,
                resolved_ref_id: None,
            };
            print!("{}", create::make_worktree(&ctx, spec)?);
        }
        Commands::Mv {
            old_name,
            new_name,
            force,
        } => {
            let ctx = ProjectContext::from_current_dir(cli.debug)?;
            print!("{}", rename::move_worktree(&ctx, &old_name, &new_name, force)?);
        }
        Commands::Rm { name, force } => {
            let ctx = ProjectContext::from_current_dir(cli.debug)?;
            print!("{}", remove::remove_worktree(&ctx, &name, force)?);
        }
        Commands::Xx {
            branches,
            worktrees,
            most,
            all,
        } => {
            let ctx = ProjectContext::from_current_dir(cli.debug)?;
            let spec = ResetSpec {
                branches,
                worktrees,
                most,
                all,
            };
            reset::reset_project(&ctx, spec, &mut io::stdout())?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_completions(shell, &mut cmd, &mut io::stdout());
        }
    }

    io::stdout().flush()?;
    Ok(())
}
