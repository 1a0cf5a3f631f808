//! Git command execution layer
//!
//! Every git invocation in pushit goes through the [GitRunner] trait, which
//! runs one command against an explicit working directory and returns its
//! combined output. A non-zero exit is an error carrying that output; callers
//! propagate it and nothing is rolled back.
//!
//! - [system::SystemGit]: spawns the `git` executable
//! - [mock::MockGit]: scripted runner for tests
//! - [SerialGit]: wraps any runner so that at most one command runs at a time,
//!   even when the module and site tasks run concurrently
//!
//! Argument lists are built by the functions in [commands].

pub mod commands;
pub mod mock;
pub mod system;

pub use mock::MockGit;
pub use system::SystemGit;

use crate::error::Result;
use std::path::Path;
use std::sync::Mutex;

/// Runs git commands against a working directory.
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`; the module release task uses the same
/// runner from a background thread.
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` in `dir`, returning stdout followed by stderr.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Combined output of a successful command
    /// * `Err(PushitError::Command)` - Non-zero exit, with the captured output
    fn run(&self, args: &[String], dir: &Path) -> Result<Vec<u8>>;

    /// Run a command and return its output as trimmed text.
    fn run_text(&self, args: &[String], dir: &Path) -> Result<String> {
        let output = self.run(args, dir)?;
        Ok(String::from_utf8_lossy(&output).trim().to_string())
    }
}

impl<R: GitRunner + ?Sized> GitRunner for &R {
    fn run(&self, args: &[String], dir: &Path) -> Result<Vec<u8>> {
        (**self).run(args, dir)
    }
}

/// Serializes every invocation of the wrapped runner behind one mutex.
pub struct SerialGit<R> {
    inner: R,
    lock: Mutex<()>,
}

impl<R: GitRunner> SerialGit<R> {
    pub fn new(inner: R) -> Self {
        SerialGit {
            inner,
            lock: Mutex::new(()),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: GitRunner> GitRunner for SerialGit<R> {
    fn run(&self, args: &[String], dir: &Path) -> Result<Vec<u8>> {
        // A poisoned lock only means another command panicked; the guard
        // protects no data.
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.inner.run(args, dir)
    }
}

/// Render an argument list the way it would be typed.
pub fn display_command(args: &[String]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        if arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
