//! Tool configuration stored at `<config dir>/config.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::fields::{DEFAULT_ARCHIVE_SUFFIX, FieldConfig};

pub const PAGE_ID_PLACEHOLDER: &str = "{page_id}";
pub const DATA_PLACEHOLDER: &str = "{data}";

/// Reassignment configuration (TOML).
///
/// Every field is optional; a missing file or key falls back to the
/// historical defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Status fields in priority order; the first is the primary field.
    pub fields: Vec<String>,

    /// Appended to a status field name to form its archive field.
    pub archive_suffix: String,

    pub cli: CliConfig,
}

/// How to invoke the page CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    pub program: String,

    /// Arguments for fetching a page; must contain `{page_id}`.
    pub fetch_args: Vec<String>,

    /// Arguments for updating a page; must contain `{page_id}` and `{data}`.
    pub update_args: Vec<String>,

    pub timeout_secs: u64,

    /// Captured stdout/stderr beyond this many bytes fails the command.
    pub output_limit_bytes: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: "notion-cli".to_string(),
            fetch_args: vec!["page".to_string(), PAGE_ID_PLACEHOLDER.to_string()],
            update_args: vec![
                "update".to_string(),
                "--data".to_string(),
                DATA_PLACEHOLDER.to_string(),
                PAGE_ID_PLACEHOLDER.to_string(),
            ],
            timeout_secs: 120,
            output_limit_bytes: 16_000_000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let fields = FieldConfig::default();
        Self {
            fields: fields.fields,
            archive_suffix: DEFAULT_ARCHIVE_SUFFIX.to_string(),
            cli: CliConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(anyhow!("cli.program must be non-empty"));
        }
        if !contains_placeholder(&self.fetch_args, PAGE_ID_PLACEHOLDER) {
            return Err(anyhow!("cli.fetch_args must contain {PAGE_ID_PLACEHOLDER}"));
        }
        for placeholder in [PAGE_ID_PLACEHOLDER, DATA_PLACEHOLDER] {
            if !contains_placeholder(&self.update_args, placeholder) {
                return Err(anyhow!("cli.update_args must contain {placeholder}"));
            }
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("cli.timeout_secs must be > 0"));
        }
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("cli.output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            fields: self.fields.clone(),
            archive_suffix: self.archive_suffix.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.field_config().validate()?;
        self.cli.validate()
    }
}

fn contains_placeholder(args: &[String], placeholder: &str) -> bool {
    args.iter().any(|arg| arg.contains(placeholder))
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AppConfig::default()`.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let cfg = AppConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AppConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.field_config(), FieldConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "fields = [\"Backlog\", \"Doing\"]\n\n[cli]\nprogram = \"/opt/bin/notion-cli\"\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.fields, vec!["Backlog".to_string(), "Doing".to_string()]);
        assert_eq!(cfg.archive_suffix, DEFAULT_ARCHIVE_SUFFIX);
        assert_eq!(cfg.cli.program, "/opt/bin/notion-cli");
        assert_eq!(cfg.cli.fetch_args, CliConfig::default().fetch_args);
    }

    #[test]
    fn update_args_without_data_placeholder_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[cli]\nupdate_args = [\"update\", \"{page_id}\"]\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("{data}"));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "fields = []\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("fields must be a non-empty array"));
    }
}
