use crate::error::{PushitError, Result};
use crate::git::{display_command, GitRunner};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend that spawns the system `git` executable
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    pub fn new() -> Self {
        SystemGit {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        SystemGit {
            program: program.into(),
        }
    }

    /// Whether the git executable can be started at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[String], dir: &Path) -> Result<Vec<u8>> {
        let command = display_command(args);
        log::debug!("{} (in {})", command, dir.display());

        // The directory is passed per invocation; the process cwd never changes.
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|e| PushitError::Command {
                command: command.clone(),
                dir: dir.to_path_buf(),
                output: format!("failed to start {}: {}", self.program.display(), e),
            })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            log::debug!("{} exited with {}", command, output.status);
            return Err(PushitError::Command {
                command,
                dir: dir.to_path_buf(),
                output: String::from_utf8_lossy(&combined).into_owned(),
            });
        }

        Ok(combined)
    }
}
