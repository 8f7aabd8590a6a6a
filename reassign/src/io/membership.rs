//! Load current and ignored member id lists.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::core::types::MembershipSets;
use crate::io::paths::AppPaths;

/// Read a member list: a JSON object of arbitrary keys (usually emails) to ids.
///
/// Ids are returned in file order.
pub fn load_id_list(path: &Path) -> Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read member list {}", path.display()))?;
    let entries: IndexMap<String, String> = serde_json::from_str(&contents)
        .with_context(|| format!("parse member list {}", path.display()))?;
    debug!(path = %path.display(), count = entries.len(), "member list loaded");
    Ok(entries.into_values().collect())
}

/// Load `users.json` and `users-ignore.json` from the config directory.
#[instrument(skip_all, fields(config_dir = %paths.config_dir.display()))]
pub fn load_membership(paths: &AppPaths) -> Result<MembershipSets> {
    let current = load_id_list(&paths.users_path)?;
    let ignore = load_id_list(&paths.users_ignore_path)?;
    Ok(MembershipSets::new(current, ignore))
}
