//! Teacher load aggregation
//!
//! Accumulates weekly hours per teacher surname from the mapped lesson
//! set. The same physical lesson appears once per combined class, so a
//! content fingerprint over (day, period, subject) deduplicates hours
//! before they are counted.

use crate::layout::LoadRules;
use crate::timetable::ClassTimetable;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Deduplication key for one physical lesson hour.
///
/// Deliberately excludes teacher and classroom: the same teacher in
/// the same (day, period, subject) across two classes is one lesson
/// taught to a combined group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LessonFingerprint {
    day: u8,
    period: u8,
    subject: String,
}

/// Accumulated weekly load of one teacher surname
#[derive(Debug, Clone)]
pub struct TeacherLoad {
    /// Teacher surname as it appears in the report
    pub teacher: String,
    /// Total deduplicated weekly hours
    pub total_hours: u32,
    /// Deduplicated weekly hours per subject, sorted by subject
    pub subject_hours: BTreeMap<String, u32>,
    seen: HashSet<LessonFingerprint>,
}

impl TeacherLoad {
    fn new(teacher: &str) -> Self {
        Self {
            teacher: teacher.to_string(),
            total_hours: 0,
            subject_hours: BTreeMap::new(),
            seen: HashSet::new(),
        }
    }

    /// Subjects taught, in sorted order
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subject_hours.keys().map(String::as_str)
    }
}

/// All teacher loads, in first-seen report order.
///
/// First-seen order is preserved because it decides the ordering of
/// unresolved identities in the output.
#[derive(Debug, Clone, Default)]
pub struct LoadBook {
    loads: Vec<TeacherLoad>,
    index: HashMap<String, usize>,
}

impl LoadBook {
    /// Teacher loads in first-seen order
    pub fn loads(&self) -> &[TeacherLoad] {
        &self.loads
    }

    /// Load of one teacher, if seen
    pub fn get(&self, teacher: &str) -> Option<&TeacherLoad> {
        self.index.get(teacher).map(|i| &self.loads[*i])
    }

    fn entry(&mut self, teacher: &str) -> &mut TeacherLoad {
        let next = self.loads.len();
        let i = *self.index.entry(teacher.to_string()).or_insert(next);
        if i == next {
            self.loads.push(TeacherLoad::new(teacher));
        }
        &mut self.loads[i]
    }
}

/// Aggregate teacher loads over every mapped, teacher-bearing slot.
///
/// After accumulation the elective-noise rule applies: a designated
/// subject totalling exactly one weekly hour for a teacher is a
/// stand-in activity, not a real assignment, and is discounted so it
/// cannot pollute the compatibility graph.
pub fn aggregate_loads(classes: &[ClassTimetable], rules: &LoadRules) -> LoadBook {
    let mut book = LoadBook::default();

    for table in classes {
        for slot in &table.lessons {
            let (Some(day), Some(period)) = (slot.day, slot.period) else {
                continue;
            };
            for pair in &slot.teachers {
                let load = book.entry(&pair.teacher);
                let fingerprint = LessonFingerprint {
                    day,
                    period,
                    subject: slot.subject.clone(),
                };
                if load.seen.insert(fingerprint) {
                    load.total_hours += 1;
                    *load.subject_hours.entry(slot.subject.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    for load in &mut book.loads {
        if load.subject_hours.get(&rules.elective_subject) == Some(&1) {
            load.subject_hours.remove(&rules.elective_subject);
            load.total_hours -= 1;
        }
    }

    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::LessonSlot;

    fn slot(subject: &str, teacher: &str, day: u8, period: u8) -> LessonSlot {
        let mut slot = LessonSlot::new(subject);
        slot.push_teacher(teacher);
        slot.day = Some(day);
        slot.period = Some(period);
        slot
    }

    fn class(name: &str, slots: Vec<LessonSlot>) -> ClassTimetable {
        let mut table = ClassTimetable::new(name);
        table.lessons = slots;
        table
    }

    #[test]
    fn test_hours_accumulate_per_subject() {
        let classes = vec![class(
            "1A",
            vec![
                slot("Matematica", "Bianchi", 1, 1),
                slot("Matematica", "Bianchi", 2, 1),
                slot("Fisica", "Bianchi", 3, 1),
            ],
        )];
        let book = aggregate_loads(&classes, &LoadRules::default());

        let load = book.get("Bianchi").unwrap();
        assert_eq!(load.total_hours, 3);
        assert_eq!(load.subject_hours["Matematica"], 2);
        assert_eq!(load.subject_hours["Fisica"], 1);
    }

    #[test]
    fn test_combined_class_lesson_counted_once() {
        // Same (day, period, subject) with a shared teacher in two
        // classes is one physical lesson
        let classes = vec![
            class("1A", vec![slot("Ed. Fisica", "Galli", 1, 3)]),
            class("1B", vec![slot("Ed. Fisica", "Galli", 1, 3)]),
        ];
        let book = aggregate_loads(&classes, &LoadRules::default());

        assert_eq!(book.get("Galli").unwrap().total_hours, 1);
    }

    #[test]
    fn test_distinct_periods_are_distinct_hours() {
        let classes = vec![
            class("1A", vec![slot("Ed. Fisica", "Galli", 1, 3)]),
            class("1B", vec![slot("Ed. Fisica", "Galli", 1, 4)]),
        ];
        let book = aggregate_loads(&classes, &LoadRules::default());

        assert_eq!(book.get("Galli").unwrap().total_hours, 2);
    }

    #[test]
    fn test_lone_elective_hour_discounted() {
        let classes = vec![class(
            "1A",
            vec![
                slot("Religione", "Sala", 1, 1),
                slot("Matematica", "Sala", 1, 2),
            ],
        )];
        let book = aggregate_loads(&classes, &LoadRules::default());

        let load = book.get("Sala").unwrap();
        assert_eq!(load.total_hours, 1);
        assert!(!load.subject_hours.contains_key("Religione"));
    }

    #[test]
    fn test_real_elective_load_kept() {
        let classes = vec![class(
            "1A",
            vec![
                slot("Religione", "Sala", 1, 1),
                slot("Religione", "Sala", 2, 1),
            ],
        )];
        let book = aggregate_loads(&classes, &LoadRules::default());

        assert_eq!(book.get("Sala").unwrap().subject_hours["Religione"], 2);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let classes = vec![class(
            "1A",
            vec![
                slot("Storia", "Verdi", 1, 1),
                slot("Matematica", "Bianchi", 1, 2),
                slot("Storia", "Verdi", 1, 3),
            ],
        )];
        let book = aggregate_loads(&classes, &LoadRules::default());

        let order: Vec<&str> = book.loads().iter().map(|l| l.teacher.as_str()).collect();
        assert_eq!(order, vec!["Verdi", "Bianchi"]);
    }

    #[test]
    fn test_unmapped_slots_ignored() {
        let classes = vec![class("1A", vec![LessonSlot::new("Matematica")])];
        let book = aggregate_loads(&classes, &LoadRules::default());
        assert!(book.loads().is_empty());
    }
}
