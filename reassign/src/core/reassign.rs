//! Move prior assignees into archive fields and add missing current members.
//!
//! Pure over in-memory documents: no filesystem, no process spawning.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::fields::FieldConfig;
use crate::core::types::{
    MembershipSets, Move, PeopleDocument, Person, PropertyBag, ReassignSummary,
};

/// Reassign people across the configured fields, returning a new document.
///
/// 1. For each configured field (in order) whose archive field also exists,
///    people who are neither current nor ignored move to the archive field.
///    Missing pairs are skipped.
/// 2. Current members absent from every configured field are appended to the
///    primary field, if it exists.
///
/// An id listed in more than one configured field is not deduplicated.
pub fn reassign(
    doc: &PeopleDocument,
    fields: &FieldConfig,
    members: &MembershipSets,
) -> (PeopleDocument, ReassignSummary) {
    let mut properties = doc.properties.clone();
    let mut summary = ReassignSummary::default();

    for field in &fields.fields {
        let archive = fields.archive_name(field);
        match move_previous(&mut properties, field, &archive, members) {
            Some(moved) => {
                summary
                    .moved
                    .extend(moved.into_iter().map(|person_id| Move {
                        field: field.clone(),
                        archive_field: archive.clone(),
                        person_id,
                    }));
            }
            None => {
                debug!(field = %field, archive = %archive, "field pair missing, skipped");
                summary.skipped_fields.push(field.clone());
            }
        }
    }

    summary.added = add_missing_current(&mut properties, fields, members);

    (PeopleDocument { properties }, summary)
}

/// Partition `from` into retained and moved people; append moved to `to`.
///
/// Returns `None` without touching the bag when either field is absent.
fn move_previous(
    properties: &mut PropertyBag,
    from: &str,
    to: &str,
    members: &MembershipSets,
) -> Option<Vec<String>> {
    if !properties.contains_key(to) {
        return None;
    }
    let source = properties.get_mut(from)?;
    let (remaining, moved): (Vec<Person>, Vec<Person>) = source
        .people
        .drain(..)
        .partition(|person| members.retains(&person.id));
    source.people = remaining;

    let moved_ids = moved.iter().map(|person| person.id.clone()).collect();
    properties.get_mut(to)?.people.extend(moved);
    Some(moved_ids)
}

fn add_missing_current(
    properties: &mut PropertyBag,
    fields: &FieldConfig,
    members: &MembershipSets,
) -> Vec<String> {
    let Some(primary) = fields.primary() else {
        return Vec::new();
    };
    if !properties.contains_key(primary) {
        debug!(primary, "primary field missing, no members added");
        return Vec::new();
    }

    let present: BTreeSet<&str> = fields
        .fields
        .iter()
        .filter_map(|field| properties.get(field))
        .flat_map(|field| field.people.iter().map(|person| person.id.as_str()))
        .collect();
    let missing: Vec<String> = members
        .current_ids()
        .iter()
        .filter(|id| !present.contains(id.as_str()))
        .cloned()
        .collect();

    if let Some(field) = properties.get_mut(primary) {
        field.people.extend(missing.iter().map(Person::new));
    }
    missing
}
