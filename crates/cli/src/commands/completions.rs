//! Shell completion generation
//!
//! Generate shell completion scripts for bash, zsh, fish, and powershell.

use clap::CommandFactory;
use clap_complete::{Generator, Shell};

use super::Cli;
use crate::exit_code::ExitCode;

/// Generate shell completions and print to stdout
pub fn execute(shell: Shell) -> ExitCode {
    let mut cmd = Cli::command();
    print_completions(shell, &mut cmd);
    ExitCode::Success
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    clap_complete::generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut std::io::stdout(),
    );
}
