//! Shell completion generation command.
//!
//! Writes the completion script to stdout and an install hint to stderr, so
//! `seating completions zsh > _seating` captures only the script.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "seating";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Where each shell expects its completion script.
fn install_hint(shell: Shell) -> Option<&'static str> {
    match shell {
        Shell::Bash => Some("seating completions bash > ~/.local/share/bash-completion/completions/seating"),
        Shell::Zsh => Some("seating completions zsh > ~/.zsh/completions/_seating  (directory must be in $fpath)"),
        Shell::Fish => Some("seating completions fish > ~/.config/fish/completions/seating.fish"),
        Shell::PowerShell => Some("seating completions powershell | Out-String | Invoke-Expression"),
        _ => None,
    }
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            eprintln!("# Generating {} completion script", self.shell);
            if let Some(hint) = install_hint(self.shell) {
                eprintln!("# To install:");
                eprintln!("#   {hint}");
            }
            eprintln!();
        }

        generate(self.shell, &mut Cli::command(), BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
