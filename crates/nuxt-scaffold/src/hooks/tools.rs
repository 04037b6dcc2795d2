//! Process-backed project tools
//!
//! Runs git and the package managers in the generated project, streaming
//! their output straight to the terminal.

use super::post::ProjectTools;
use crate::answers::PackageManager;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// [`ProjectTools`] backed by real subprocesses
#[derive(Debug, Clone, Default)]
pub struct SystemTools {
    /// Print each command before running it
    pub echo: bool,
}

impl SystemTools {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }

    /// Run `program args..` in `dir` with inherited stdio and wait for it
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<ExitStatus> {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        if self.echo {
            println!("{} {}", "Running:".dimmed(), command_line.yellow());
        }
        tracing::info!(command = %command_line, dir = %dir.display(), "running command");

        Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to run `{}` in {}", command_line, dir.display()))
    }

    /// Run and require a successful exit
    fn run_checked(&self, program: &str, args: &[&str], dir: &Path) -> Result<()> {
        let status = self.run(program, args, dir)?;
        if !status.success() {
            anyhow::bail!(
                "`{} {}` failed with exit code: {}",
                program,
                args.join(" "),
                status.code().unwrap_or(-1)
            );
        }
        Ok(())
    }
}

impl ProjectTools for SystemTools {
    fn git_init(&mut self, dir: &Path) -> Result<()> {
        self.run_checked("git", &["init"], dir)
    }

    fn npm_install(&mut self, dir: &Path) -> Result<()> {
        self.run_checked("npm", &["install"], dir)
    }

    fn yarn_install(&mut self, dir: &Path) -> Result<()> {
        self.run_checked("yarn", &["install"], dir)
    }

    fn lint_fix(&mut self, pm: PackageManager, dir: &Path) -> Result<Option<i32>> {
        let status = self.run(pm.as_str(), &["run", "lint", "--", "--fix"], dir)?;
        Ok(status.code())
    }
}
