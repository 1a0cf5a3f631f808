use std::fmt;

/// Warnings raised at the edges of a release: things that do not stop the
/// run but that the operator should know about.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The local topic branch is deleted on the assumption it was merged upstream
    UnguardedTopicDelete { topic: String },
    /// More than one manifest line matched; only the first was rewritten
    DuplicateManifestEntries {
        module: String,
        tag: String,
        count: usize,
    },
    /// `--no-module` skipped the `<module>.module` check
    ModuleMarkerSkipped { module: String },
    /// The release stopped after confirmation; the module and site repos may
    /// disagree
    PartialRelease { tag: String, site_repo: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnguardedTopicDelete { topic } => {
                write!(
                    f,
                    "Deleting local topic branch '{}' on the assumption it has been merged upstream",
                    topic
                )
            }
            BoundaryWarning::DuplicateManifestEntries { module, tag, count } => {
                write!(
                    f,
                    "Found {} makefile entries for module '{}' at 'v{}'; only the first was updated",
                    count, module, tag
                )
            }
            BoundaryWarning::ModuleMarkerSkipped { module } => {
                write!(f, "Not checking for '{}.module' (--no-module)", module)
            }
            BoundaryWarning::PartialRelease { tag, site_repo } => {
                write!(
                    f,
                    "Release of {} stopped part-way; the module repo and the site repo at {} need manual inspection",
                    tag, site_repo
                )
            }
        }
    }
}
