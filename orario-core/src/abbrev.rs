//! Abbreviation resolution
//!
//! A companion export identifies teachers only by truncated codes,
//! usually the first four letters of the surname, or three letters
//! plus a given-name initial when surnames collide. Resolution is a
//! small constraint-propagation solver: each pass tries to match every
//! still-unresolved abbreviation against the roster names not yet
//! claimed by another abbreviation, and resolves it only when exactly
//! one candidate remains. Claimed names shrink the candidate sets, so
//! passes repeat until a pass makes no progress.

use crate::layout::subject_class_code;
use crate::names::{compact_upper, starts_with_ci, title_case, NAME_DELIMITERS};
use crate::timetable::ClassTimetable;
use std::collections::HashMap;

/// Safety valve on the fixed-point loop. Convergence stops naturally
/// on the first pass without progress; the cap only guards against a
/// pathological roster.
pub const MAX_PASSES: usize = 64;

/// One resolved abbreviation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AbbreviationMatch {
    /// The abbreviation as seen in the timetable
    pub abbreviation: String,
    /// Title-cased full roster name
    pub full_name: String,
    /// Shortest unambiguous display form of the full name
    pub name: String,
}

/// Resolution result: matches in first-seen abbreviation order, plus
/// the abbreviations that stayed ambiguous or unknown
#[derive(Debug, Clone, Default)]
pub struct ResolutionOutcome {
    /// Resolved abbreviations
    pub matches: Vec<AbbreviationMatch>,
    /// Abbreviations needing manual resolution
    pub unmatched: Vec<String>,
}

/// Distinct teacher abbreviations from a finalized lesson set, in
/// first-seen order
pub fn collect_abbreviations(classes: &[ClassTimetable]) -> Vec<String> {
    let mut seen = Vec::new();
    for table in classes {
        for slot in &table.lessons {
            for pair in &slot.teachers {
                if !seen.contains(&pair.teacher) {
                    seen.push(pair.teacher.clone());
                }
            }
        }
    }
    seen
}

/// Roster names matching an abbreviation.
///
/// Primary rule: the space/apostrophe-stripped name starts with the
/// stripped abbreviation. Fallback when that finds nothing: read the
/// abbreviation as surname-prefix plus given-name initial.
fn candidates<'a>(abbreviation: &str, roster: impl Iterator<Item = &'a String>) -> Vec<&'a String> {
    let roster: Vec<&String> = roster.collect();
    let needle = compact_upper(abbreviation);

    let mut found: Vec<&String> = roster
        .iter()
        .filter(|name| compact_upper(name).starts_with(&needle))
        .copied()
        .collect();

    if found.is_empty() {
        let compact: String = abbreviation.chars().filter(|c| *c != ' ').collect();
        let mut chars = compact.chars();
        if let (Some(initial), rest) = (chars.next_back(), chars.as_str()) {
            if !rest.is_empty() {
                let initial_marker = format!(" {}", initial.to_uppercase());
                found = roster
                    .iter()
                    .filter(|name| {
                        starts_with_ci(name, rest)
                            && name.to_uppercase().contains(&initial_marker)
                    })
                    .copied()
                    .collect();
            }
        }
    }

    found
}

/// The shortest leading-word prefix of `full` (at least 3 characters)
/// that is not itself a strict prefix of another roster name; the full
/// name when every prefix collides.
fn display_name(full: &str, roster: &[String]) -> String {
    let words: Vec<&str> = full.split(' ').collect();
    for take in 1..=words.len() {
        let prefix = words[..take].join(" ");
        if prefix.chars().count() < 3 {
            continue;
        }
        let marker = format!("{} ", prefix);
        let collides = roster
            .iter()
            .any(|other| other != full && starts_with_ci(other, &marker));
        if !collides {
            return prefix;
        }
    }
    full.to_string()
}

/// Resolve teacher abbreviations against a roster of full names and a
/// hand-maintained override table (keys matched case-insensitively).
///
/// Abbreviations matching the subject-class code pattern are not
/// teacher codes at all and are excluded from the unmatched report.
pub fn resolve_abbreviations(
    abbreviations: &[String],
    roster: &[String],
    overrides: &HashMap<String, String>,
) -> ResolutionOutcome {
    let overrides: HashMap<String, &String> = overrides
        .iter()
        .map(|(key, name)| (key.to_uppercase(), name))
        .collect();

    let mut resolved: HashMap<&String, String> = HashMap::new();

    for _pass in 0..MAX_PASSES {
        let mut changed = false;

        for abbreviation in abbreviations {
            if resolved.contains_key(abbreviation) {
                continue;
            }

            if let Some(name) = overrides.get(&abbreviation.to_uppercase()) {
                resolved.insert(abbreviation, (*name).clone());
                changed = true;
                continue;
            }

            let free = roster
                .iter()
                .filter(|name| !resolved.values().any(|taken| taken == *name));
            let found = candidates(abbreviation, free);
            if let [only] = found.as_slice() {
                resolved.insert(abbreviation, (*only).clone());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let mut outcome = ResolutionOutcome::default();
    for abbreviation in abbreviations {
        match resolved.get(abbreviation) {
            Some(full) => outcome.matches.push(AbbreviationMatch {
                abbreviation: abbreviation.clone(),
                name: title_case(&display_name(full, roster), NAME_DELIMITERS),
                full_name: title_case(full, NAME_DELIMITERS),
            }),
            None if subject_class_code().is_match(abbreviation) => {}
            None => outcome.unmatched.push(abbreviation.clone()),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn abbrevs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_plain_surname_prefix_resolves() {
        let outcome = resolve_abbreviations(
            &abbrevs(&["BIAN"]),
            &roster(&["BIANCHI PAOLO", "FERRARI LUCA"]),
            &HashMap::new(),
        );

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].full_name, "Bianchi Paolo");
        assert_eq!(outcome.matches[0].name, "Bianchi");
        assert!(outcome.unmatched.is_empty());
    }

    #[test]
    fn test_homonym_pair_converges_over_two_passes() {
        // ROSS alone is ambiguous between the two Rossi; once ROSM
        // claims Marco via the initial fallback, the second pass can
        // only read ROSS as Andrea. Ordering puts ROSS first so the
        // first pass genuinely leaves it open.
        let outcome = resolve_abbreviations(
            &abbrevs(&["ROSS", "ROSM"]),
            &roster(&["ROSSI ANDREA", "ROSSI MARCO"]),
            &HashMap::new(),
        );

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].abbreviation, "ROSS");
        assert_eq!(outcome.matches[0].full_name, "Rossi Andrea");
        assert_eq!(outcome.matches[1].full_name, "Rossi Marco");
        // Shared surname forces the full display name
        assert_eq!(outcome.matches[0].name, "Rossi Andrea");
        assert!(outcome.unmatched.is_empty());
    }

    #[test]
    fn test_override_table_wins_case_insensitively() {
        let mut overrides = HashMap::new();
        overrides.insert("Weir".to_string(), "WEIRDLY SPELT".to_string());

        let outcome = resolve_abbreviations(
            &abbrevs(&["WEIR"]),
            &roster(&["WEIRDLY SPELT", "WEIRDLY SPOKEN"]),
            &overrides,
        );

        assert_eq!(outcome.matches[0].full_name, "Weirdly Spelt");
    }

    #[test]
    fn test_apostrophes_ignored_when_matching() {
        let outcome = resolve_abbreviations(
            &abbrevs(&["DAMI"]),
            &roster(&["D'AMICO LUCA", "DEMARCO PIA"]),
            &HashMap::new(),
        );

        assert_eq!(outcome.matches[0].full_name, "D'Amico Luca");
        assert_eq!(outcome.matches[0].name, "D'Amico");
    }

    #[test]
    fn test_truly_ambiguous_reported_unmatched() {
        let outcome = resolve_abbreviations(
            &abbrevs(&["ROSS"]),
            &roster(&["ROSSI ANDREA", "ROSSI MARCO"]),
            &HashMap::new(),
        );

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.unmatched, vec!["ROSS".to_string()]);
    }

    #[test]
    fn test_subject_class_code_not_reported() {
        let outcome = resolve_abbreviations(
            &abbrevs(&["A042-Informatica", "XYZQ"]),
            &roster(&["BIANCHI PAOLO"]),
            &HashMap::new(),
        );

        assert_eq!(outcome.unmatched, vec!["XYZQ".to_string()]);
    }

    #[test]
    fn test_display_name_skips_short_prefixes() {
        let full = "BO MARIA".to_string();
        let names = roster(&["BO MARIA", "FERRARI LUCA"]);
        // "BO" is under three characters, so the display falls through
        // to the full name
        assert_eq!(display_name(&full, &names), "BO MARIA");
    }

    #[test]
    fn test_collect_abbreviations_first_seen_order() {
        use crate::timetable::LessonSlot;
        let mut table = ClassTimetable::new("1A");
        let mut slot = LessonSlot::new("Fisica");
        slot.push_teacher("ROSS");
        slot.push_teacher("BIAN");
        table.lessons.push(slot);
        let mut slot = LessonSlot::new("Storia");
        slot.push_teacher("ROSS");
        table.lessons.push(slot);

        assert_eq!(collect_abbreviations(&[table]), vec!["ROSS", "BIAN"]);
    }
}
