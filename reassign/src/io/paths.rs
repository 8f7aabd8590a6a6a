//! Config directory layout and scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Directory under `~/.config` holding member lists, config and temp artifacts.
pub const CONFIG_DIR_NAME: &str = "notion-api-examples";

/// All canonical paths for a config directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub config_path: PathBuf,
    pub users_path: PathBuf,
    pub users_ignore_path: PathBuf,
    pub page_path: PathBuf,
    pub extracted_path: PathBuf,
    pub updated_people_path: PathBuf,
    pub updated_data_path: PathBuf,
}

impl AppPaths {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let tmp_dir = config_dir.join("tmp");
        Self {
            config_dir: config_dir.clone(),
            tmp_dir: tmp_dir.clone(),
            config_path: config_dir.join("config.toml"),
            users_path: config_dir.join("users.json"),
            users_ignore_path: config_dir.join("users-ignore.json"),
            page_path: tmp_dir.join("page.json"),
            extracted_path: tmp_dir.join("extracted_people.json"),
            updated_people_path: tmp_dir.join("updated_people.json"),
            updated_data_path: tmp_dir.join("updated_data.json"),
        }
    }

    /// `$HOME/.config/notion-api-examples`.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
        Ok(Self::new(home.join(".config").join(CONFIG_DIR_NAME)))
    }

    /// Create the config and temp directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        create_dir(&self.config_dir)?;
        create_dir(&self.tmp_dir)?;
        debug!(config_dir = %self.config_dir.display(), "config directories ready");
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(anyhow!("{} exists but is not a directory", path.display()));
    }
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}
