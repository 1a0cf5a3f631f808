use crate::error::{PushitError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn version_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = PATTERN.get() {
        return Ok(re);
    }
    let re = Regex::new(r"^(\d+)\.(\d+)\.(\d+)$")
        .map_err(|e| PushitError::version(format!("Invalid version pattern: {}", e)))?;
    Ok(PATTERN.get_or_init(|| re))
}

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare version string ("1.2.3").
    pub fn parse(text: &str) -> Result<Self> {
        let captures = version_pattern()?.captures(text.trim()).ok_or_else(|| {
            PushitError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                text
            ))
        })?;

        let column = |idx: usize, name: &str| -> Result<u32> {
            captures[idx].parse::<u32>().map_err(|_| {
                PushitError::version(format!("Invalid {} version: {}", name, &captures[idx]))
            })
        };

        Ok(Version {
            major: column(1, "major")?,
            minor: column(2, "minor")?,
            patch: column(3, "patch")?,
        })
    }

    /// Parse a release tag ("v1.2.3"), returning the version text without its
    /// prefix alongside the parsed version.
    pub fn parse_tag(tag: &str) -> Result<(String, Self)> {
        let trimmed = tag.trim();
        let bare = trimmed.strip_prefix('v').ok_or_else(|| {
            PushitError::version(format!(
                "Invalid tag format: '{}' - expected vX.Y.Z",
                trimmed
            ))
        })?;

        let version = Version::parse(bare)?;
        Ok((bare.to_string(), version))
    }

    /// Bump version according to bump type.
    ///
    /// Fails if the bumped column would overflow.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let next = |column: u32, name: &str| {
            column.checked_add(1).ok_or_else(|| {
                PushitError::version(format!("Cannot bump {} version of {}", name, self))
            })
        };

        Ok(match bump_type {
            VersionBump::Major => Version::new(next(self.major, "major")?, 0, 0),
            VersionBump::Minor => Version::new(self.major, next(self.minor, "minor")?, 0),
            VersionBump::Patch => Version::new(self.major, self.minor, next(self.patch, "patch")?),
        })
    }

    /// Tag name for this version
    pub fn tag(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The semver column to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VersionBump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        };
        f.write_str(name)
    }
}
