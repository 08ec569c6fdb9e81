//! Lesson relabeling
//!
//! Applies resolved homonym identities back onto the lesson set and
//! the flat export rows. A teacher string is extended with the
//! identity's name suffix when its (surname, subject) pair belongs to
//! a named identity; everything else stays a bare surname, which
//! downstream consumers read as "homonymy unresolved or absent".

use crate::homonyms::HomonymRecord;
use crate::timetable::{ClassTimetable, ExportRow};
use std::collections::HashMap;

/// Lookup from (surname, subject) to the resolved name suffix
fn suffix_table(records: &[HomonymRecord]) -> HashMap<(String, String), String> {
    let mut table = HashMap::new();
    for record in records {
        for identity in &record.identities {
            if identity.name.is_empty() {
                continue;
            }
            for subject in &identity.subjects {
                table.insert(
                    (record.surname.clone(), subject.clone()),
                    identity.name.clone(),
                );
            }
        }
    }
    table
}

/// Rewrite teacher strings in the per-class lessons and export rows
pub fn relabel(
    classes: &mut [ClassTimetable],
    rows: &mut [ExportRow],
    records: &[HomonymRecord],
) {
    let table = suffix_table(records);
    if table.is_empty() {
        return;
    }

    for class in classes.iter_mut() {
        for slot in &mut class.lessons {
            for pair in &mut slot.teachers {
                if let Some(name) = table.get(&(pair.teacher.clone(), slot.subject.clone())) {
                    pair.teacher = format!("{} {}", pair.teacher, name);
                }
            }
        }
    }

    for row in rows.iter_mut() {
        if let Some(name) = table.get(&(row.teacher.clone(), row.subject.clone())) {
            row.teacher = format!("{} {}", row.teacher, name);
        }
    }
}
