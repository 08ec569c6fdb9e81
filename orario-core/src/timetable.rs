//! Normalized timetable data model

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// One teacher of a lesson together with the room they teach it in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherClassroom {
    /// Title-cased candidate name, surname, or abbreviation
    pub teacher: String,
    /// Normalized room, possibly empty
    pub classroom: String,
}

/// One scheduled teaching unit for a class.
///
/// Created when a subject line is read; teachers are appended one at a
/// time; day and period are assigned later by the schedule mapper. Once
/// sealed, a slot never receives another teacher or subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSlot {
    /// Subject name with surrounding periods stripped
    pub subject: String,
    /// Teachers in report order, with their rooms
    pub teachers: Vec<TeacherClassroom>,
    /// Weekday 1..=6, assigned by the schedule mapper
    pub day: Option<u8>,
    /// Period number within the day, assigned by the schedule mapper
    pub period: Option<u8>,
    #[serde(skip)]
    sealed: bool,
}

impl LessonSlot {
    /// Create an empty slot for a subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            teachers: Vec::new(),
            day: None,
            period: None,
            sealed: false,
        }
    }

    /// Append a teacher with an empty classroom placeholder
    pub fn push_teacher(&mut self, teacher: impl Into<String>) {
        debug_assert!(!self.sealed, "teacher appended to a sealed slot");
        self.teachers.push(TeacherClassroom {
            teacher: teacher.into(),
            classroom: String::new(),
        });
    }

    /// Assign `classroom` to the most recently appended teacher that
    /// does not have one yet. Returns false if every pair is filled.
    pub fn fill_classroom(&mut self, classroom: &str) -> bool {
        match self.teachers.iter_mut().rev().find(|t| t.classroom.is_empty()) {
            Some(pair) => {
                pair.classroom = classroom.to_string();
                true
            }
            None => false,
        }
    }

    /// Fill any still-empty classroom with the last non-empty one seen.
    /// Teachers sharing a lesson typically share a room; the report can
    /// omit the repeat.
    pub fn backfill_classrooms(&mut self) {
        let mut last = String::new();
        for pair in &self.teachers {
            if !pair.classroom.is_empty() {
                last = pair.classroom.clone();
            }
        }
        if last.is_empty() {
            return;
        }
        for pair in &mut self.teachers {
            if pair.classroom.is_empty() {
                pair.classroom = last.clone();
            }
        }
    }

    /// Close the slot; further teachers and subjects are an error
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the slot has been sealed
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

/// Ordered lesson sequence for one class, in report order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTimetable {
    /// Class name as printed in the report
    pub class: String,
    /// Lessons in extraction order
    pub lessons: Vec<LessonSlot>,
}

impl ClassTimetable {
    /// Create an empty timetable for a class
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            lessons: Vec::new(),
        }
    }
}

/// One flattened export record, one row per (lesson, teacher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Teacher string, possibly relabeled with a homonym suffix
    pub teacher: String,
    /// Subject name
    pub subject: String,
    /// Class name
    pub class: String,
    /// Normalized room
    pub classroom: String,
    /// Weekday 1..=6
    pub day: u8,
    /// Period number within the day
    pub period: u8,
}

/// Flatten mapped classes into export rows.
///
/// Every slot must carry a day and period by now; a slot without them
/// means the source data cannot be trusted and the whole run aborts,
/// naming the class. Slots without teachers occupy a period but emit
/// no rows.
pub fn export_rows(classes: &[ClassTimetable]) -> Result<Vec<ExportRow>> {
    let mut rows = Vec::new();
    for table in classes {
        for slot in &table.lessons {
            let (Some(day), Some(period)) = (slot.day, slot.period) else {
                return Err(CoreError::IncompleteLesson {
                    class: table.class.clone(),
                });
            };
            for pair in &slot.teachers {
                rows.push(ExportRow {
                    teacher: pair.teacher.clone(),
                    subject: slot.subject.clone(),
                    class: table.class.clone(),
                    classroom: pair.classroom.clone(),
                    day,
                    period,
                });
            }
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped_slot(subject: &str, teacher: &str, day: u8, period: u8) -> LessonSlot {
        let mut slot = LessonSlot::new(subject);
        slot.push_teacher(teacher);
        slot.fill_classroom("1A");
        slot.day = Some(day);
        slot.period = Some(period);
        slot.seal();
        slot
    }

    #[test]
    fn test_fill_classroom_most_recent_first() {
        let mut slot = LessonSlot::new("Fisica");
        slot.push_teacher("Rossi");
        slot.push_teacher("Verdi");
        assert!(slot.fill_classroom("Lab"));
        assert_eq!(slot.teachers[1].classroom, "Lab");
        assert_eq!(slot.teachers[0].classroom, "");
    }

    #[test]
    fn test_backfill_shares_last_room() {
        let mut slot = LessonSlot::new("Fisica");
        slot.push_teacher("Rossi");
        slot.push_teacher("Verdi");
        slot.fill_classroom("Lab");
        slot.backfill_classrooms();
        assert_eq!(slot.teachers[0].classroom, "Lab");
    }

    #[test]
    fn test_export_rows_one_per_teacher() {
        let mut table = ClassTimetable::new("1A");
        let mut slot = LessonSlot::new("Fisica");
        slot.push_teacher("Rossi");
        slot.push_teacher("Verdi");
        slot.fill_classroom("Lab");
        slot.backfill_classrooms();
        slot.day = Some(1);
        slot.period = Some(2);
        slot.seal();
        table.lessons.push(slot);
        table.lessons.push(mapped_slot("Storia", "Bianchi", 1, 3));

        let rows = export_rows(&[table]).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].teacher, "Rossi");
        assert_eq!(rows[0].classroom, "Lab");
        assert_eq!(rows[2].day, 1);
        assert_eq!(rows[2].period, 3);
    }

    #[test]
    fn test_export_rows_unmapped_slot_is_fatal() {
        let mut table = ClassTimetable::new("3B");
        table.lessons.push(LessonSlot::new("Chimica"));
        table.lessons[0].push_teacher("Neri");

        let err = export_rows(&[table]).unwrap_err();
        assert!(err.to_string().contains("3B"));
    }

    #[test]
    fn test_export_rows_teacherless_slot_emits_nothing() {
        let mut table = ClassTimetable::new("2C");
        let mut slot = LessonSlot::new("Disposizione");
        slot.day = Some(2);
        slot.period = Some(1);
        table.lessons.push(slot);

        let rows = export_rows(&[table]).unwrap();
        assert!(rows.is_empty());
    }
}
