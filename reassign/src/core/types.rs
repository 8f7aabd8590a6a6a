//! Shared deterministic types for people reassignment.
//!
//! These types mirror the people-only JSON shape written to the temp
//! directory and handed back to the page update command.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared property type. Only `people` survives extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    People,
}

/// Reference to a person; every attribute but the id is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
}

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A people-typed page property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Absent when the fetched property carried no id; omitted on write-back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default)]
    pub people: Vec<Person>,
}

/// Field name to people field, in the fetched page's property order.
pub type PropertyBag = IndexMap<String, Field>;

/// `{ "properties": { ... } }`, the shape of the extracted and updated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleDocument {
    pub properties: PropertyBag,
}

/// Current and ignored member ids, read-only once loaded.
///
/// `current` keeps list order (first occurrence wins) because it decides the
/// order in which missing members are appended to the primary field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSets {
    current: Vec<String>,
    current_lookup: BTreeSet<String>,
    ignore: BTreeSet<String>,
}

impl MembershipSets {
    pub fn new<C, I>(current: C, ignore: I) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut current_lookup = BTreeSet::new();
        for id in current {
            let id = id.into();
            if current_lookup.insert(id.clone()) {
                ordered.push(id);
            }
        }
        Self {
            current: ordered,
            current_lookup,
            ignore: ignore.into_iter().map(Into::into).collect(),
        }
    }

    /// Current member ids in list order.
    pub fn current_ids(&self) -> &[String] {
        &self.current
    }

    pub fn ignore_len(&self) -> usize {
        self.ignore.len()
    }

    /// True when the person stays in place: current or ignored member.
    pub fn retains(&self, person_id: &str) -> bool {
        self.current_lookup.contains(person_id) || self.ignore.contains(person_id)
    }
}

/// A person moved from a status field into its archive field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub field: String,
    pub archive_field: String,
    pub person_id: String,
}

/// Changes applied by one reassignment pass.
///
/// `moved` follows configured field order, then list order within a field.
/// `added` follows `MembershipSets::current_ids` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReassignSummary {
    pub moved: Vec<Move>,
    pub added: Vec<String>,
    /// Configured fields skipped because the field or its archive was absent.
    pub skipped_fields: Vec<String>,
}

impl ReassignSummary {
    pub fn is_noop(&self) -> bool {
        self.moved.is_empty() && self.added.is_empty()
    }
}
