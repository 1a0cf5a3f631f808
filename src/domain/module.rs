use crate::error::{PushitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The module being released: its name and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    pub name: String,
    pub dir: PathBuf,
}

impl ModuleRef {
    /// Resolve the module from its working directory.
    ///
    /// The name is the final segment of the canonical path, so `.` and `..`
    /// name the directory they point at. Unless `no_module` is set, the
    /// directory must contain a `<name>.module` marker file.
    pub fn resolve(dir: &Path, no_module: bool) -> Result<Self> {
        let canonical = fs::canonicalize(dir).map_err(|_| PushitError::DirectoryNotFound {
            kind: "module",
            path: dir.to_path_buf(),
        })?;
        let name = canonical
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| PushitError::DirectoryNotFound {
                kind: "module",
                path: dir.to_path_buf(),
            })?;

        let entries = fs::read_dir(dir).map_err(|_| PushitError::DirectoryNotFound {
            kind: "module",
            path: dir.to_path_buf(),
        })?;

        if !no_module {
            let marker = format!("{}.module", name);
            let found = entries
                .flatten()
                .any(|entry| entry.file_name().to_str() == Some(marker.as_str()));

            if !found {
                return Err(PushitError::ModuleNotFound {
                    module: name,
                    path: dir.to_path_buf(),
                });
            }
        }

        log::debug!("resolved module '{}' at {}", name, dir.display());

        Ok(ModuleRef {
            name,
            dir: dir.to_path_buf(),
        })
    }
}

/// Locate the manifest file inside the site repo directory.
pub fn locate_makefile(site_repo: &Path, makefile: &str) -> Result<PathBuf> {
    let entries = fs::read_dir(site_repo).map_err(|_| PushitError::DirectoryNotFound {
        kind: "site repo",
        path: site_repo.to_path_buf(),
    })?;

    let found = entries
        .flatten()
        .any(|entry| entry.file_name().to_str() == Some(makefile));

    if !found {
        return Err(PushitError::MakefileNotFound {
            path: site_repo.join(makefile),
        });
    }

    Ok(site_repo.join(makefile))
}
