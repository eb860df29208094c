use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{DoctorError, Result};

use super::merge::merge_configs;
use super::model::DoctorConfig;

pub const CONFIG_FILE_NAME: &str = ".repo-doctor.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Result of loading a configuration, with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub config: DoctorConfig,
    /// `None` when the built-in default was used.
    pub source: Option<PathBuf>,
}

impl LoadResult {
    fn default_config() -> Self {
        Self {
            config: DoctorConfig::default(),
            source: None,
        }
    }
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load the configuration that applies to `cwd`.
    ///
    /// When `cwd` sits inside a workspace whose root is `workspace_root`, the
    /// root file is loaded first and a `cwd`-local file is merged over it.
    /// Never fails: unreadable or malformed files fall back to the default.
    fn load(&self, cwd: &Path, workspace_root: Option<&Path>) -> LoadResult;

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;

    /// Load the package-local config in `dir`, if any. Malformed files are
    /// reported and treated as absent.
    fn load_local(&self, dir: &Path) -> Option<DoctorConfig>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Platform-specific configuration directory for repo-doctor.
    ///
    /// - Windows: `%APPDATA%\repo-doctor`
    /// - macOS: `~/Library/Application Support/repo-doctor`
    /// - Linux: `~/.config/repo-doctor` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "repo-doctor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Loads configuration from the filesystem.
///
/// Search order for the implicit configuration:
/// 1. `.repo-doctor.toml` in the workspace root (merged under step 2 when both exist)
/// 2. `.repo-doctor.toml` in the working directory
/// 3. `config.toml` in the platform user config directory
/// 4. `DoctorConfig::default()`
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    fn read_config(&self, path: &Path) -> Result<DoctorConfig> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| DoctorError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        parse_config(&content)
    }

    /// Read a config file if it exists, falling back to `None` on any failure.
    fn try_read(&self, path: &Path) -> Option<DoctorConfig> {
        if !self.fs.exists(path) {
            return None;
        }
        match self.read_config(path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded configuration");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable configuration, using defaults");
                None
            }
        }
    }

    /// Root-level config for `dir`: the local file, else the user config.
    fn load_root(&self, dir: &Path) -> LoadResult {
        let local = dir.join(CONFIG_FILE_NAME);
        if let Some(config) = self.try_read(&local) {
            return LoadResult {
                config,
                source: Some(local),
            };
        }
        if let Some(user) = self.user_config_path()
            && let Some(config) = self.try_read(&user)
        {
            return LoadResult {
                config,
                source: Some(user),
            };
        }
        LoadResult::default_config()
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, cwd: &Path, workspace_root: Option<&Path>) -> LoadResult {
        match workspace_root {
            Some(root) if root != cwd => {
                let base = self.load_root(root);
                match self.load_local(cwd) {
                    Some(child) => LoadResult {
                        config: merge_configs(&base.config, &child),
                        source: Some(cwd.join(CONFIG_FILE_NAME)),
                    },
                    None => base,
                }
            }
            _ => self.load_root(cwd),
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        if !self.fs.exists(path) {
            return Err(DoctorError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = self.read_config(path)?;
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    fn load_local(&self, dir: &Path) -> Option<DoctorConfig> {
        self.try_read(&dir.join(CONFIG_FILE_NAME))
    }
}

/// Parse and validate config file content.
///
/// # Errors
/// Returns an error on TOML syntax/type errors or invalid `ignore` globs.
pub fn parse_config(content: &str) -> Result<DoctorConfig> {
    let config: DoctorConfig = toml::from_str(content)?;
    config.ignore_matcher()?;
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
