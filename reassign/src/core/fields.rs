//! Which status fields are reassigned, and how archive fields are named.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_ARCHIVE_SUFFIX: &str = " (previous staff)";

/// Ordered status fields; the first one is the primary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub fields: Vec<String>,
    pub archive_suffix: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            fields: vec![
                "To do".to_string(),
                "Acknowledged".to_string(),
                "Mi nuh need dis".to_string(),
            ],
            archive_suffix: DEFAULT_ARCHIVE_SUFFIX.to_string(),
        }
    }
}

impl FieldConfig {
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            archive_suffix: DEFAULT_ARCHIVE_SUFFIX.to_string(),
        }
    }

    /// Catch-all field for current members not listed anywhere.
    pub fn primary(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    /// `"To do"` -> `"To do (previous staff)"`.
    pub fn archive_name(&self, field: &str) -> String {
        format!("{field}{}", self.archive_suffix)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(anyhow!("fields must be a non-empty array"));
        }
        if self.archive_suffix.is_empty() {
            return Err(anyhow!("archive_suffix must be non-empty"));
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.trim().is_empty() {
                return Err(anyhow!("fields must not contain blank names"));
            }
            if !seen.insert(field.as_str()) {
                return Err(anyhow!("duplicate field '{}'", field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_primary_is_first_field() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.primary(), Some("To do"));
        cfg.validate().expect("default validates");
    }

    #[test]
    fn archive_name_appends_suffix() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.archive_name("Acknowledged"), "Acknowledged (previous staff)");
    }

    #[test]
    fn validate_rejects_duplicates_and_blanks() {
        let err = FieldConfig::new(["To do", "To do"]).validate().unwrap_err();
        assert!(err.to_string().contains("duplicate field"));
        let err = FieldConfig::new(["To do", " "]).validate().unwrap_err();
        assert!(err.to_string().contains("blank"));
        let err = FieldConfig::new(Vec::<String>::new()).validate().unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }
}
