//! Global context for vswitch operations.
//!
//! Locates the project the switcher operates on. The project root is the
//! nearest directory at or above the cwd that holds `vswitch.toml`; without
//! one, the cwd itself must hold `CMakeLists.txt`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::config::SwitchConfig;
use crate::util::config::{Config, CONFIG_FILE};

/// File marking a CMake source directory.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(
        "could not find `{}` in `{}` or any parent directory, and `{}` has no `{}`",
        CONFIG_FILE,
        .dir.display(),
        .dir.display(),
        CMAKE_LISTS
    )]
    NotFound { dir: PathBuf },
}

/// Global context containing the invocation's paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext for the process's cwd.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext { cwd })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext { cwd }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Find the project root by searching upward for `vswitch.toml`.
    ///
    /// Without one, the cwd is used as-is if it holds `CMakeLists.txt`, even
    /// when it is a subproject of a larger CMake tree.
    pub fn find_project_root(&self) -> Result<PathBuf, ProjectError> {
        let mut current = self.cwd.clone();
        loop {
            if current.join(CONFIG_FILE).is_file() {
                return Ok(current);
            }
            if !current.pop() {
                break;
            }
        }

        if self.cwd.join(CMAKE_LISTS).is_file() {
            tracing::info!(
                "no `{}` found, using `{}` as the project root",
                CONFIG_FILE,
                self.cwd.display()
            );
            return Ok(self.cwd.clone());
        }

        Err(ProjectError::NotFound {
            dir: self.cwd.clone(),
        })
    }

    /// Locate the project and load its configuration.
    pub fn load_switch_config(&self) -> Result<SwitchConfig> {
        let root = self.find_project_root()?;
        let root = root
            .canonicalize()
            .with_context(|| format!("failed to resolve project root: {}", root.display()))?;

        let config_path = root.join(CONFIG_FILE);
        tracing::debug!("project root: {}", root.display());

        Config::load_if_exists(&config_path)?.resolve(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
    }

    #[test]
    fn test_find_root_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let sub = tmp.path().join("src").join("net");
        std::fs::create_dir_all(&sub).unwrap();

        let ctx = GlobalContext::with_cwd(sub);
        assert_eq!(ctx.find_project_root().unwrap(), tmp.path());
    }

    #[test]
    fn test_find_root_falls_back_to_cmake_lists() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CMAKE_LISTS), "project(x)").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.find_project_root().unwrap(), tmp.path());
    }

    #[test]
    fn test_find_root_fails_without_markers() {
        let tmp = TempDir::new().unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        let err = ctx.find_project_root().unwrap_err();
        assert!(err.to_string().contains(CMAKE_LISTS));
    }

    #[test]
    fn test_load_switch_config_is_absolute() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CMAKE_LISTS), "project(x)").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        let config = ctx.load_switch_config().unwrap();
        assert!(config.project_root().is_absolute());
        assert_eq!(
            config.project_root(),
            tmp.path().canonicalize().unwrap().as_path()
        );
    }
}
