//! Reduce a raw page record to its people-typed properties.

use anyhow::{Result, anyhow};
use serde_json::{Map, Value};
use tracing::warn;

use crate::core::types::{Field, FieldType, PeopleDocument, Person, PropertyBag};

const PEOPLE_TYPE: &str = "people";

/// Locate the page record inside fetched JSON.
///
/// The fetch command wraps records as `{"result": [record, ...]}`; the first
/// record is used. A bare record carrying `properties` is accepted as-is.
pub fn page_record(raw: &Value) -> Result<&Value> {
    if let Some(result) = raw.get("result") {
        return result
            .as_array()
            .and_then(|records| records.first())
            .ok_or_else(|| anyhow!("invalid data structure: empty result"));
    }
    Ok(raw)
}

/// Extract all people properties from a page record.
///
/// Returns `Ok(None)` when the record has no people fields, and an
/// invalid-structure error when `properties` is missing.
pub fn extract_people(record: &Value) -> Result<Option<PeopleDocument>> {
    let properties = record
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| anyhow!("invalid data structure: missing properties"))?;

    let bag: PropertyBag = properties
        .iter()
        .filter(|(_, value)| value.get("type").and_then(Value::as_str) == Some(PEOPLE_TYPE))
        .map(|(name, value)| (name.clone(), people_field(name, value)))
        .collect();

    if bag.is_empty() {
        return Ok(None);
    }
    Ok(Some(PeopleDocument { properties: bag }))
}

fn people_field(name: &str, value: &Value) -> Field {
    let id = value.get("id").and_then(Value::as_str).map(str::to_string);
    let people = value
        .get("people")
        .and_then(Value::as_array)
        .map(|entries| people_ids(name, entries))
        .unwrap_or_default();
    Field {
        id,
        kind: FieldType::People,
        people,
    }
}

fn people_ids(name: &str, entries: &[Value]) -> Vec<Person> {
    entries
        .iter()
        .filter_map(|entry| match entry.get("id").and_then(Value::as_str) {
            Some(id) => Some(Person::new(id)),
            None => {
                warn!(field = name, "dropping person entry without id");
                None
            }
        })
        .collect()
}

/// Properties-only payload handed to the page update command.
pub fn properties_payload(doc: &PeopleDocument) -> Result<Map<String, Value>> {
    match serde_json::to_value(&doc.properties)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("properties serialized as non-object: {other}")),
    }
}
