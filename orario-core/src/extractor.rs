//! Lesson extractor
//!
//! A line-oriented state machine that recovers lesson slots from the
//! lexed report. Per class the machine cycles through
//! `AwaitingSubject -> AwaitingTeacher -> AwaitingClassroom` and resets
//! at every class boundary. Time lines and the weekday header are
//! invisible to the states; the teacher lookahead is measured in raw
//! lines, where they still count.

use crate::error::{CoreError, Result};
use crate::layout::{subject_class_code, ReportLayout};
use crate::lexer::LexedReport;
use crate::names::{title_case, WORD_DELIMITERS};
use crate::timetable::{ClassTimetable, LessonSlot};

/// Extraction state, reset at each class boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The next accepted line is the subject of a new slot
    AwaitingSubject,
    /// Collecting teachers for the current slot
    AwaitingTeacher,
    /// Awaiting the slot's closing classroom line
    AwaitingClassroom,
}

/// Whether a line reads as a teacher: no hyphen, or a subject-class
/// code whose hyphen must not disqualify it.
fn is_teacher_line(text: &str) -> bool {
    !text.contains('-') || subject_class_code().is_match(text)
}

/// The lookahead variant of the teacher test: a missing line counts as
/// teacher-like, and so do room lines starting with a lab/gym prefix.
fn lookahead_is_teacher(report: &LexedReport, raw_index: usize, layout: &ReportLayout) -> bool {
    match report.text_at_raw(raw_index + layout.teacher_lookahead) {
        None => true,
        Some(ahead) => {
            is_teacher_line(ahead)
                || layout
                    .room_prefixes
                    .iter()
                    .any(|prefix| ahead.starts_with(prefix.as_str()))
        }
    }
}

/// Normalize a classroom line: abbreviate the known multi-word label,
/// strip generic room-prefix words, and keep only the first token of
/// lab/annex rooms.
fn normalize_classroom(text: &str) -> String {
    let mut room = text.replace("Lab. Terr. Occup.", "LTO");
    for label in [
        " Aula Disegno 2",
        "Aula Disegno 2",
        " Aula Disegno",
        "Aula Disegno",
        "Aula ",
        "Aula",
    ] {
        room = room.replace(label, "");
    }
    if room.contains("Lab") {
        room = room.split_whitespace().next().unwrap_or("").to_string();
    }
    room.trim().to_string()
}

/// Normalize a teacher line: lowercase, title-case, strip leading periods
fn normalize_teacher(text: &str) -> String {
    title_case(text, WORD_DELIMITERS)
        .trim_start_matches('.')
        .to_string()
}

/// Extract per-class lesson slots from a lexed report.
///
/// Classes appear in report order; lessons within a class appear in
/// chronological report order, with day and period still unassigned.
pub fn extract_lessons(report: &LexedReport, layout: &ReportLayout) -> Result<Vec<ClassTimetable>> {
    let mut classes: Vec<ClassTimetable> = Vec::new();
    let mut state = State::AwaitingSubject;

    let anchor = layout.class_anchor.to_lowercase();
    let lines = report.lines();
    let mut pos = 0;

    while pos < lines.len() {
        let line = &lines[pos];

        if line.text.to_lowercase().contains(&anchor) {
            // Class boundary: the class name sits a fixed number of raw
            // lines below the anchor.
            let name_index = line.index + layout.class_name_offset;
            let class = report
                .text_at_raw(name_index)
                .ok_or(CoreError::MissingClassName {
                    anchor_line: line.index,
                })?;
            classes.push(ClassTimetable::new(class));
            state = State::AwaitingSubject;
            pos = report.position_after_raw(name_index);
            continue;
        }

        if line.text.contains(&layout.time_marker) || line.text == layout.weekday_header {
            pos += 1;
            continue;
        }

        let Some(current) = classes.last_mut() else {
            // Front matter before the first class header
            pos += 1;
            continue;
        };

        match state {
            State::AwaitingSubject => {
                current
                    .lessons
                    .push(LessonSlot::new(line.text.trim_matches('.')));
                state = State::AwaitingTeacher;
            }
            State::AwaitingTeacher => {
                if is_teacher_line(&line.text) {
                    let slot = current.lessons.last_mut().expect("slot exists in teacher state");
                    slot.push_teacher(normalize_teacher(&line.text));
                    if lookahead_is_teacher(report, line.index, layout) {
                        state = State::AwaitingClassroom;
                    }
                }
            }
            State::AwaitingClassroom => {
                if line.text.to_lowercase().starts_with("o ") {
                    // Alternate room of a split section; not represented
                    pos += 1;
                    continue;
                }
                let slot = current
                    .lessons
                    .last_mut()
                    .expect("slot exists in classroom state");
                slot.fill_classroom(&normalize_classroom(&line.text));
                slot.backfill_classrooms();
                slot.seal();
                state = State::AwaitingSubject;
            }
        }
        pos += 1;
    }

    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ReportLayout {
        ReportLayout::default()
    }

    /// A minimal class block: anchor, five header filler lines, class
    /// name on the sixth, then the given lesson lines.
    fn class_block(class: &str, lesson_lines: &[&str]) -> String {
        let mut text = format!(
            "I.T.I.S. \"Paleocapa\"\nVia Ghislandi 57\nBergamo\nAnno 2021/22\nOrario\nprovvisorio\n{class}\nlunedì martedì mercoledì giovedì venerdì sabato\n",
        );
        for line in lesson_lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    fn extract(raw: &str) -> Vec<ClassTimetable> {
        let report = LexedReport::lex(raw, &layout());
        extract_lessons(&report, &layout()).unwrap()
    }

    #[test]
    fn test_single_lesson_block() {
        // Teacher at raw index i peeks i+3: the room line, which is
        // teacher-like (no hyphen), so the teacher list ends there.
        let raw = class_block("1A", &["Matematica.", "BIANCHI", "8:00", "9:00", "1A"]);
        let classes = extract(&raw);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class, "1A");
        let slot = &classes[0].lessons[0];
        assert_eq!(slot.subject, "Matematica");
        assert_eq!(slot.teachers.len(), 1);
        assert_eq!(slot.teachers[0].teacher, "Bianchi");
        assert_eq!(slot.teachers[0].classroom, "1A");
        assert!(slot.is_sealed());
        assert!(slot.day.is_none());
    }

    #[test]
    fn test_team_teaching_shares_room() {
        // ROSSI peeks three raw lines ahead onto the hyphenated time
        // range: not a teacher, so collection continues with VERDI,
        // whose lookahead hits the room.
        let raw = class_block(
            "4B",
            &[
                "Fisica",
                "ROSSI",
                "8:00",
                "VERDI",
                "10:00-11:00",
                "9:00",
                "Lab Fisica",
            ],
        );
        let classes = extract(&raw);

        let slot = &classes[0].lessons[0];
        assert_eq!(slot.teachers.len(), 2);
        assert_eq!(slot.teachers[0].teacher, "Rossi");
        assert_eq!(slot.teachers[1].teacher, "Verdi");
        // Room went to the last teacher, then back-filled to the first
        assert_eq!(slot.teachers[0].classroom, "Lab");
        assert_eq!(slot.teachers[1].classroom, "Lab");
        assert!(slot.is_sealed());
    }

    #[test]
    fn test_slot_seals_on_first_room_line() {
        // A team-taught slot closes on its single room line; the next
        // accepted line must open a new lesson, not feed the old one.
        let raw = class_block(
            "4B",
            &[
                "Fisica",
                "ROSSI",
                "8:00",
                "VERDI",
                "10:00-11:00",
                "9:00",
                "Lab Fisica",
                "Storia",
                "GALLI",
                "8:00",
                "9:00",
                "22",
            ],
        );
        let classes = extract(&raw);

        assert_eq!(classes[0].lessons.len(), 2);
        let first = &classes[0].lessons[0];
        assert!(first.is_sealed());
        assert_eq!(first.teachers.len(), 2);
        assert_eq!(first.teachers[0].classroom, "Lab");
        let second = &classes[0].lessons[1];
        assert_eq!(second.subject, "Storia");
        assert_eq!(second.teachers[0].teacher, "Galli");
        assert_eq!(second.teachers[0].classroom, "22");
    }

    #[test]
    fn test_hyphenated_line_needs_code_pattern() {
        // A hyphen line matching the subject-class code still reads as
        // a teacher; an arbitrary hyphen line does not.
        assert!(is_teacher_line("A042-Informatica"));
        assert!(!is_teacher_line("10:00-11:00"));
        assert!(is_teacher_line("BIANCHI"));
    }

    #[test]
    fn test_alternate_room_discarded() {
        let raw = class_block(
            "2C",
            &["Inglese", "NERI", "8:00", "9:00", "o 12", "34"],
        );
        let classes = extract(&raw);

        let slot = &classes[0].lessons[0];
        assert_eq!(slot.teachers[0].classroom, "34");
    }

    #[test]
    fn test_classroom_normalization() {
        assert_eq!(normalize_classroom("Aula Disegno 2"), "");
        assert_eq!(normalize_classroom("Lab. Terr. Occup."), "LTO");
        assert_eq!(normalize_classroom("Lab Chimica"), "Lab");
        assert_eq!(normalize_classroom("Aula 15"), "15");
    }

    #[test]
    fn test_two_lessons_in_sequence() {
        let raw = class_block(
            "5IA",
            &[
                "Matematica.",
                "BIANCHI",
                "8:00",
                "9:00",
                "21",
                "Sistemi",
                "FERRARI",
                "9:00",
                "10:00",
                "Lab Sistemi",
            ],
        );
        let classes = extract(&raw);

        assert_eq!(classes[0].lessons.len(), 2);
        assert_eq!(classes[0].lessons[1].subject, "Sistemi");
        assert_eq!(classes[0].lessons[1].teachers[0].teacher, "Ferrari");
        assert_eq!(classes[0].lessons[1].teachers[0].classroom, "Lab");
    }

    #[test]
    fn test_class_boundary_resets_state() {
        let mut raw = class_block("1A", &["Matematica.", "BIANCHI", "8:00", "9:00", "21"]);
        raw.push_str(&class_block("1B", &["Storia", "GALLI", "8:00", "9:00", "22"]));
        let classes = extract(&raw);

        assert_eq!(classes.len(), 2);
        assert_eq!(classes[1].class, "1B");
        assert_eq!(classes[1].lessons[0].teachers[0].teacher, "Galli");
    }

    #[test]
    fn test_missing_class_name_is_fatal() {
        let raw = "I.T.I.S. \"Paleocapa\"\nVia Ghislandi 57\n";
        let report = LexedReport::lex(raw, &layout());
        let err = extract_lessons(&report, &layout()).unwrap_err();
        assert!(matches!(err, CoreError::MissingClassName { anchor_line: 0 }));
    }
}
