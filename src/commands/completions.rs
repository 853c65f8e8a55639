use clap::{Command, ValueEnum};
use clap_complete::{Shell as CompleteShell, generate};
use std::io;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Generate native shell completions using clap
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    let clap_shell = match shell {
        Shell::Bash => CompleteShell::Bash,
        Shell::Zsh => CompleteShell::Zsh,
        Shell::Fish => CompleteShell::Fish,
    };

    let name = cmd.get_name().to_string();
    generate(clap_shell, cmd, name, out);
}
