//! Test-only helpers: document builders, a scripted page client and a temp config home.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use indexmap::IndexMap;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::adjust::AdjustContext;
use crate::core::types::{Field, FieldType, MembershipSets, Person, PropertyBag};
use crate::io::page_client::PageClient;
use crate::io::paths::AppPaths;

/// Create a people field holding `ids` in order.
pub fn field(ids: &[&str]) -> Field {
    Field {
        id: Some("prop".to_string()),
        kind: FieldType::People,
        people: ids.iter().copied().map(Person::new).collect(),
    }
}

/// Build a property bag from `(name, field)` pairs.
pub fn bag<const N: usize>(entries: [(&str, Field); N]) -> PropertyBag {
    entries
        .into_iter()
        .map(|(name, field)| (name.to_string(), field))
        .collect()
}

/// Person ids of a field, in order.
pub fn ids(field: &Field) -> Vec<&str> {
    field.people.iter().map(|person| person.id.as_str()).collect()
}

pub fn members(current: &[&str], ignore: &[&str]) -> MembershipSets {
    MembershipSets::new(current.iter().copied(), ignore.iter().copied())
}

/// Raw fetch output for a page with a title plus the given people fields.
///
/// People carry extra attributes the extractor is expected to drop.
pub fn people_page(fields: &[(&str, &[&str])]) -> String {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "Name".to_string(),
        json!({ "id": "title", "type": "title", "title": [] }),
    );
    for (index, (name, people)) in fields.iter().enumerate() {
        let people: Vec<Value> = people
            .iter()
            .map(|id| json!({ "object": "user", "id": id, "name": format!("user {id}") }))
            .collect();
        properties.insert(
            name.to_string(),
            json!({ "id": format!("prop-{index}"), "type": "people", "people": people }),
        );
    }
    json!({ "result": [{ "object": "page", "properties": properties }] }).to_string()
}

/// Member list file contents, ids in list order.
pub fn member_list_json(ids: &[&str]) -> String {
    let entries: IndexMap<String, &str> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| (format!("user-{index:04}@example.com"), *id))
        .collect();
    serde_json::to_string_pretty(&entries).unwrap_or_default()
}

/// Page client returning canned pages and recording update payloads.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    pages: BTreeMap<String, String>,
    updates: RefCell<Vec<(String, Value)>>,
}

impl ScriptedClient {
    pub fn with_page(page_id: &str, raw: impl Into<String>) -> Self {
        let mut client = Self::default();
        client.pages.insert(page_id.to_string(), raw.into());
        client
    }

    pub fn add_page(&mut self, page_id: &str, raw: impl Into<String>) {
        self.pages.insert(page_id.to_string(), raw.into());
    }

    /// `(page_id, properties payload)` for every update received, in order.
    pub fn updates(&self) -> Vec<(String, Value)> {
        self.updates.borrow().clone()
    }
}

impl PageClient for ScriptedClient {
    fn fetch_page(&self, page_id: &str) -> Result<String> {
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| anyhow!("page {page_id} not found"))
    }

    fn update_page(&self, page_id: &str, data_path: &Path) -> Result<()> {
        let contents = fs::read_to_string(data_path)
            .with_context(|| format!("read {}", data_path.display()))?;
        let payload: Value = serde_json::from_str(&contents)?;
        self.updates
            .borrow_mut()
            .push((page_id.to_string(), payload));
        Ok(())
    }
}

/// Temporary config directory with member lists.
pub struct TestHome {
    temp: TempDir,
}

impl TestHome {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp dir")?;
        Ok(Self { temp })
    }

    pub fn paths(&self) -> AppPaths {
        AppPaths::new(self.temp.path().join("config"))
    }

    /// Write both member lists.
    pub fn write_members(&self, current: &[&str], ignore: &[&str]) -> Result<AppPaths> {
        let paths = self.paths();
        paths.ensure_dirs()?;
        fs::write(&paths.users_path, member_list_json(current))?;
        fs::write(&paths.users_ignore_path, member_list_json(ignore))?;
        Ok(paths)
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        let paths = self.paths();
        paths.ensure_dirs()?;
        fs::write(&paths.config_path, contents)?;
        Ok(())
    }

    /// Write member lists and load a full run context from them.
    pub fn context(&self, current: &[&str], ignore: &[&str]) -> Result<AdjustContext> {
        let paths = self.write_members(current, ignore)?;
        AdjustContext::load(paths)
    }
}
