//! Site makefile (manifest) loading and rewriting.
//!
//! A module's pinned version lives on a single line of the form
//! `projects[<module>][download][tag] = "v<version>"`.

use crate::error::{PushitError, Result};
use std::fs;
use std::path::Path;

/// The manifest's lines, each with its original terminator (`\n` or
/// `\r\n`). The last line has none if the file did not end with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub lines: Vec<String>,
}

/// Result of rewriting a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub manifest: Manifest,
    /// Index of the rewritten line
    pub line: usize,
    /// How many lines matched the search key
    pub matches: usize,
}

/// Moves one module's pin from `current` to `new`.
///
/// Kept separate from any particular [Manifest] so it can be checked against
/// the makefile early and applied again to whatever the site repo holds
/// after it has been fast-forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinUpdate {
    pub module: String,
    pub current: String,
    pub new: String,
}

impl PinUpdate {
    pub fn new(module: impl Into<String>, current: impl Into<String>, new: impl Into<String>) -> Self {
        PinUpdate {
            module: module.into(),
            current: current.into(),
            new: new.into(),
        }
    }

    pub fn apply(&self, manifest: &Manifest) -> Result<Rewrite> {
        manifest.rewrite(&self.module, &self.new, &self.current)
    }
}

/// The line fragment that pins `module` to `version`.
pub fn search_key(module: &str, version: &str) -> String {
    format!("projects[{}][download][tag] = \"v{}\"", module, version)
}

impl Manifest {
    pub fn parse(text: &str) -> Self {
        Manifest {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }

    /// Overwrite `path` with the rendered manifest.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()).map_err(|source| PushitError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace `current` with `new` on the first line pinning `module` to
    /// `current`. Every other line is copied unchanged, and `self` is left
    /// untouched whether or not a line matched.
    pub fn rewrite(&self, module: &str, new: &str, current: &str) -> Result<Rewrite> {
        let current = current.trim();
        let key = search_key(module, current);

        let matching: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains(&key))
            .map(|(idx, _)| idx)
            .collect();

        let Some(&target) = matching.first() else {
            return Err(PushitError::ManifestEntryNotFound {
                module: module.to_string(),
                tag: current.to_string(),
            });
        };

        let mut lines = self.lines.clone();
        lines[target] = lines[target].replace(current, new);

        Ok(Rewrite {
            manifest: Manifest { lines },
            line: target,
            matches: matching.len(),
        })
    }
}
