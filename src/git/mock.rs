use crate::error::{PushitError, Result};
use crate::git::{display_command, GitRunner};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// A git command the mock has completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCall {
    pub args: Vec<String>,
    pub dir: PathBuf,
}

/// Mock runner for testing without actual git operations.
///
/// Commands without a scripted response succeed with empty output. Calls are
/// recorded when they finish, so the recorded order is completion order.
pub struct MockGit {
    responses: HashMap<Vec<String>, Vec<u8>>,
    failures: HashSet<Vec<String>>,
    delays: HashMap<Vec<String>, Duration>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockGit {
    /// Create a new mock with no scripted behavior
    pub fn new() -> Self {
        MockGit {
            responses: HashMap::new(),
            failures: HashSet::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Return `output` whenever `args` is run
    pub fn with_response(mut self, args: &[String], output: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(args.to_vec(), output.into());
        self
    }

    /// Fail whenever `args` is run
    pub fn with_failure(mut self, args: &[String]) -> Self {
        self.failures.insert(args.to_vec());
        self
    }

    /// Sleep for `delay` before completing `args`
    pub fn with_delay(mut self, args: &[String], delay: Duration) -> Self {
        self.delays.insert(args.to_vec(), delay);
        self
    }

    /// All completed calls, in completion order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Position of the first completed call matching `args`, if any
    pub fn position(&self, args: &[String]) -> Option<usize> {
        self.calls().iter().position(|call| call.args == args)
    }

    /// Whether `args` was run in `dir`
    pub fn was_run_in(&self, args: &[String], dir: &Path) -> bool {
        self.calls()
            .iter()
            .any(|call| call.args == args && call.dir == dir)
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for MockGit {
    fn run(&self, args: &[String], dir: &Path) -> Result<Vec<u8>> {
        if let Some(delay) = self.delays.get(args) {
            thread::sleep(*delay);
        }

        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(GitCall {
                args: args.to_vec(),
                dir: dir.to_path_buf(),
            });

        if self.failures.contains(args) {
            return Err(PushitError::Command {
                command: display_command(args),
                dir: dir.to_path_buf(),
                output: "fatal: mocked failure".to_string(),
            });
        }

        Ok(self.responses.get(args).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::commands;

    #[test]
    fn test_mock_scripted_response() {
        let mock = MockGit::new().with_response(&commands::current_branch(), "master\n");
        let out = mock
            .run(&commands::current_branch(), Path::new("/module"))
            .unwrap();
        assert_eq!(out, b"master\n");
    }

    #[test]
    fn test_mock_default_response_is_empty() {
        let mock = MockGit::new();
        assert!(mock
            .run(&commands::push_tags("origin"), Path::new("/module"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mock_failure_is_recorded() {
        let mock = MockGit::new().with_failure(&commands::tag("v1.0.0"));
        let err = mock
            .run(&commands::tag("v1.0.0"), Path::new("/module"))
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(mock.was_run_in(&commands::tag("v1.0.0"), Path::new("/module")));
    }

    #[test]
    fn test_mock_records_order() {
        let mock = MockGit::new();
        mock.run(&commands::update("origin"), Path::new("/a")).unwrap();
        mock.run(&commands::current_branch(), Path::new("/a")).unwrap();

        assert_eq!(mock.position(&commands::update("origin")), Some(0));
        assert_eq!(mock.position(&commands::current_branch()), Some(1));
        assert_eq!(mock.position(&commands::push_tags("origin")), None);
    }
}
