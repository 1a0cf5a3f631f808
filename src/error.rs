use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for pushit operations
#[derive(Error, Debug)]
pub enum PushitError {
    #[error("There was a problem reading the {kind} directory @ {}", path.display())]
    DirectoryNotFound { kind: &'static str, path: PathBuf },

    #[error("Could not locate module '{module}' @ {}", path.display())]
    ModuleNotFound { module: String, path: PathBuf },

    #[error("Could not locate makefile @ '{}'", path.display())]
    MakefileNotFound { path: PathBuf },

    #[error("Topic mismatch: {0}")]
    TopicMismatch(String),

    #[error("Either the module '{module}' or latest tag 'v{tag}' was not found in the makefile. Make sure your site repo is up-to-date before using this utility.")]
    ManifestEntryNotFound { module: String, tag: String },

    #[error("Could not write new makefile @ '{}'. Check permissions and try again.", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("There was a problem running the git command '{command}' in {}. See output above for clues.", dir.display())]
    Command {
        command: String,
        dir: PathBuf,
        output: String,
    },

    #[error("The module release task ended without reporting an outcome")]
    ReleaseAbandoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pushit
pub type Result<T> = std::result::Result<T, PushitError>;

impl PushitError {
    /// Create a topic mismatch error with context
    pub fn topic(msg: impl Into<String>) -> Self {
        PushitError::TopicMismatch(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        PushitError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PushitError::Config(msg.into())
    }

    /// Whether the error leaves the repositories in a state that needs a human.
    ///
    /// Git command failures are never rolled back; everything else is raised
    /// before any tag or push has been attempted.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PushitError::Command { .. } | PushitError::ReleaseAbandoned
        )
    }

    /// Captured output of a failed git command, if this is one.
    pub fn command_output(&self) -> Option<&str> {
        match self {
            PushitError::Command { output, .. } => Some(output.as_str()),
            _ => None,
        }
    }
}
