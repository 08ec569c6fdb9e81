//! Name normalization helpers shared by extraction and resolution

/// Title-case `text` after lowercasing it, starting a new word after
/// any of `delimiters`. The report shouts teacher names in uppercase;
/// the companion roster does the same, with apostrophes inside surnames
/// (`D'AMICO`) that must also restart capitalization.
pub fn title_case(text: &str, delimiters: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars().flat_map(|c| c.to_lowercase()) {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = delimiters.contains(&ch);
    }
    out
}

/// Delimiters for report teacher lines (plain words)
pub const WORD_DELIMITERS: &[char] = &[' ', '\t'];

/// Delimiters for roster names, where apostrophes split surnames
pub const NAME_DELIMITERS: &[char] = &[' ', '\''];

/// Strip spaces and apostrophes and uppercase, the normal form used
/// when matching abbreviations against roster names.
pub fn compact_upper(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ' ' && *c != '\'')
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Case-insensitive prefix test
pub fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack.to_uppercase().starts_with(&prefix.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_plain() {
        assert_eq!(title_case("BIANCHI", WORD_DELIMITERS), "Bianchi");
        assert_eq!(title_case("rossi mario", WORD_DELIMITERS), "Rossi Mario");
    }

    #[test]
    fn test_title_case_apostrophe() {
        assert_eq!(title_case("D'AMICO LUCA", NAME_DELIMITERS), "D'Amico Luca");
        // Without the apostrophe delimiter the letter after it stays lower
        assert_eq!(title_case("D'AMICO", WORD_DELIMITERS), "D'amico");
    }

    #[test]
    fn test_compact_upper() {
        assert_eq!(compact_upper("De Rossi"), "DEROSSI");
        assert_eq!(compact_upper("D'Amico"), "DAMICO");
    }

    #[test]
    fn test_starts_with_ci() {
        assert!(starts_with_ci("ROSSI ANDREA", "ross"));
        assert!(!starts_with_ci("ROSSI ANDREA", "bian"));
    }
}
