use crate::error::{PushitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the site repo path
pub const SITE_REPO_ENV: &str = "PUSHIT_SITE_REPO_PATH";

/// Environment variable overriding the site makefile name
pub const SITE_MAKEFILE_ENV: &str = "PUSHIT_SITE_MAKEFILE";

const CONFIG_FILE_NAME: &str = "pushit.toml";

/// Represents the complete configuration for pushit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub site: SiteConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_main_branch() -> String {
    "master".to_string()
}

/// Remote and branch names shared by the module and site repos.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_main_branch")]
    pub main_branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            main_branch: default_main_branch(),
        }
    }
}

/// Site repo settings. Unset values fall back to the environment, then to
/// built-in defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub repo_path: Option<PathBuf>,

    #[serde(default)]
    pub makefile: Option<String>,
}

/// Built-in site repo location: `~/Repos/ncaa-barcelona`.
pub fn default_site_repo() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Repos")
        .join("ncaa-barcelona")
}

pub fn default_site_makefile() -> String {
    "barcelona.make".to_string()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pushit.toml` in current directory
/// 3. `pushit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(PushitError::Config)` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(),
    };

    let Some(path) = path else {
        log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
        return Ok(Config::default());
    };

    let text = fs::read_to_string(&path).map_err(|e| {
        PushitError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&text).map_err(|e| {
        PushitError::config(format!("Cannot parse {}: {}", path.display(), e))
    })?;

    log::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

impl Config {
    /// Site repo path: flag, then environment, then config file, then default.
    pub fn site_repo(&self, flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
        flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.site.repo_path.clone())
            .unwrap_or_else(default_site_repo)
    }

    /// Site makefile name: flag, then environment, then config file, then default.
    pub fn site_makefile(&self, flag: Option<String>, env: Option<String>) -> String {
        flag.or_else(|| env.filter(|v| !v.is_empty()))
            .or_else(|| self.site.makefile.clone())
            .unwrap_or_else(default_site_makefile)
    }

    /// Like [Config::site_repo], reading the environment variable.
    pub fn site_repo_from_env(&self, flag: Option<PathBuf>) -> PathBuf {
        self.site_repo(flag, std::env::var(SITE_REPO_ENV).ok())
    }

    /// Like [Config::site_makefile], reading the environment variable.
    pub fn site_makefile_from_env(&self, flag: Option<String>) -> String {
        self.site_makefile(flag, std::env::var(SITE_MAKEFILE_ENV).ok())
    }
}
