use crate::constants::MISSING_VALUE_PLACEHOLDERS;

/// Coerce one cell of `row` into a non-negative statistic.
///
/// Out-of-range columns, empty cells and placeholder cells ("-", "N/A", "--")
/// read as 0. Otherwise every non-digit character is dropped and the
/// remaining digits are parsed; nothing left, or a value too large for `u32`,
/// also reads as 0.
pub fn coerce_cell<S: AsRef<str>>(row: &[S], index: Option<usize>) -> u32 {
    index
        .and_then(|idx| row.get(idx))
        .map_or(0, |cell| coerce_value(cell.as_ref()))
}

/// Coerce a single raw cell text. Never fails.
pub fn coerce_value(raw: &str) -> u32 {
    let text = raw.trim();
    if text.is_empty() || MISSING_VALUE_PLACEHOLDERS.contains(&text) {
        return 0;
    }

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
