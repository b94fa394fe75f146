//! Shell completion generation for the querysh binary itself.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::CliArgs;
use crate::error::{QueryshError, Result};

/// Generate a completion script for `shell_name` to stdout.
pub fn generate_completion(shell_name: &str) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    let mut cmd = CliArgs::command();
    generate(shell, &mut cmd, "querysh", &mut io::stdout());
    Ok(())
}

/// Parse a shell name into the clap_complete shell enum.
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(QueryshError::Generic(format!(
            "Unsupported shell: {shell_name}. Supported shells: bash, zsh, fish"
        ))),
    }
}
