//! Team-name canonicalization.
//!
//! Responsive table markup often renders a team twice in one text node (a
//! short label and a full label, or the same label twice), so the raw cell
//! reads like `"BillsBills"`. Two extraction paths recover a single name:
//!
//! * [`NameExtraction::WholeCell`]: the trimmed cell text, with a whole-string
//!   duplication collapsed to its first half.
//! * [`NameExtraction::TailToken`]: a scan of the last whitespace-delimited
//!   token that starts at the first uppercase letter and keeps contiguous
//!   letters, followed by the same duplication collapse when the candidate is
//!   longer than two letters.
//!
//! Output is case-preserving; consumers compare names case-insensitively.
//! A cell with nothing recoverable yields `None` and the row is dropped.
//!
//! Known limitation: a name that genuinely repeats itself ("Walla Walla" style,
//! written without the space) is collapsed as if it were a rendering artifact.
//! Tail-token recovery also needs an uppercase letter, so a digit-led nickname
//! such as "49ers" is not recoverable on that path.

/// Which recovery path a source uses for its team cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameExtraction {
    WholeCell,
    TailToken,
}

/// Canonicalize one raw team cell using the given extraction path.
pub fn canonicalize(raw: &str, extraction: NameExtraction) -> Option<String> {
    match extraction {
        NameExtraction::WholeCell => canonicalize_cell(raw),
        NameExtraction::TailToken => recover_tail_name(raw),
    }
}

/// Whole-cell path: trim, then collapse a whole-string duplication.
pub fn canonicalize_cell(raw: &str) -> Option<String> {
    let text = raw.trim();
    if !text.chars().any(char::is_alphabetic) {
        return None;
    }
    Some(collapse_duplicate(text).to_string())
}

/// Tail-token path: recover a proper-noun token from a possibly corrupted
/// trailing fragment, then collapse a duplication.
pub fn recover_tail_name(raw: &str) -> Option<String> {
    let token = raw.split_whitespace().last()?;

    let mut name = String::new();
    for ch in token.chars() {
        if ch.is_uppercase() {
            name.push(ch);
        } else if ch.is_alphabetic() {
            if !name.is_empty() {
                name.push(ch);
            }
        } else if !name.is_empty() {
            break;
        }
    }

    match name.chars().count() {
        0 => None,
        // Two letters are an abbreviation, never a doubled name.
        1 | 2 => Some(name),
        _ => Some(collapse_duplicate(&name).to_string()),
    }
}

/// Collapse `text` to its first half when it has an even number of
/// characters and both halves are equal ignoring case. Anything else is
/// returned unchanged.
pub fn collapse_duplicate(text: &str) -> &str {
    let chars = text.chars().count();
    if chars == 0 || chars % 2 != 0 {
        return text;
    }

    let split = text
        .char_indices()
        .nth(chars / 2)
        .map_or(text.len(), |(i, _)| i);
    let (first, second) = text.split_at(split);

    if first.to_lowercase() == second.to_lowercase() {
        first
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_cell_duplication_collapses() {
        assert_eq!(canonicalize_cell("BillsBills").as_deref(), Some("Bills"));
        assert_eq!(canonicalize_cell("  BillsBills ").as_deref(), Some("Bills"));
        assert_eq!(canonicalize_cell("BILLSbills").as_deref(), Some("BILLS"));
        assert_eq!(
            canonicalize_cell("NE PatriotsNE Patriots").as_deref(),
            Some("NE Patriots")
        );
    }

    #[test]
    fn test_whole_cell_leaves_non_duplicates_alone() {
        assert_eq!(canonicalize_cell("Patriots").as_deref(), Some("Patriots"));
        // Odd length
        assert_eq!(canonicalize_cell("Bills Bills").as_deref(), Some("Bills Bills"));
        // Even length, halves differ
        assert_eq!(canonicalize_cell("Jets").as_deref(), Some("Jets"));
    }

    #[test]
    fn test_whole_cell_without_letters_is_absent() {
        assert_eq!(canonicalize_cell(""), None);
        assert_eq!(canonicalize_cell("   "), None);
        assert_eq!(canonicalize_cell("1234"), None);
        assert_eq!(canonicalize_cell("--"), None);
    }

    #[test]
    fn test_tail_scan_recovers_and_collapses() {
        assert_eq!(recover_tail_name("xyzBrownsBrowns").as_deref(), Some("Browns"));
        assert_eq!(
            recover_tail_name("Cleveland xyzBrownsBrowns").as_deref(),
            Some("Browns")
        );
    }

    #[test]
    fn test_tail_scan_stops_at_first_non_letter() {
        assert_eq!(recover_tail_name("Kansas City Chiefs*").as_deref(), Some("Chiefs"));
        assert_eq!(recover_tail_name("z-Chiefs").as_deref(), Some("Chiefs"));
        assert_eq!(recover_tail_name("Ravens2x").as_deref(), Some("Ravens"));
    }

    #[test]
    fn test_tail_scan_keeps_odd_or_distinct_candidates() {
        assert_eq!(recover_tail_name("CLEBrowns").as_deref(), Some("CLEBrowns"));
        assert_eq!(recover_tail_name("McDonald").as_deref(), Some("McDonald"));
    }

    #[test]
    fn test_tail_scan_keeps_two_letter_candidates() {
        assert_eq!(recover_tail_name("Aa").as_deref(), Some("Aa"));
        assert_eq!(recover_tail_name("xNN").as_deref(), Some("NN"));
        assert_eq!(recover_tail_name("BoBo").as_deref(), Some("Bo"));
    }

    #[test]
    fn test_tail_scan_without_uppercase_is_absent() {
        assert_eq!(recover_tail_name(""), None);
        assert_eq!(recover_tail_name("xyz"), None);
        assert_eq!(recover_tail_name("San Francisco 49ers"), None);
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        for raw in ["BillsBills", "NE PatriotsNE Patriots", "Seahawks", "Browns"] {
            let once = canonicalize_cell(raw).unwrap();
            assert_eq!(canonicalize_cell(&once).as_deref(), Some(once.as_str()));
        }
        for raw in ["xyzBrownsBrowns", "Kansas City Chiefs*", "Eagles"] {
            let once = recover_tail_name(raw).unwrap();
            assert_eq!(recover_tail_name(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn test_collapse_handles_multibyte_characters() {
        assert_eq!(collapse_duplicate("ÉtéÉté"), "Été");
        assert_eq!(collapse_duplicate("Été"), "Été");
    }

    #[test]
    fn test_dispatch_by_extraction_path() {
        assert_eq!(
            canonicalize("Dallas CowboysCowboys", NameExtraction::TailToken).as_deref(),
            Some("Cowboys")
        );
        assert_eq!(
            canonicalize("Dallas Cowboys", NameExtraction::WholeCell).as_deref(),
            Some("Dallas Cowboys")
        );
    }
}
