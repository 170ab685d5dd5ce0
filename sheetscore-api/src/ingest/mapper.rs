//! Row → candidate record mapping
//!
//! Total function: every row maps to a candidate. Blank identity cells become
//! `None` (the validator drops them later); points cells that are missing or
//! unparseable become 0.

use crate::models::{CandidateRecord, FieldKind, STUDENT_COLUMNS};

/// Whitespace as spreadsheet exports see it: Unicode white space plus the
/// byte-order mark, which `char::is_whitespace` leaves alone
fn is_cell_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Strip leading and trailing cell whitespace
pub fn trim_cell(text: &str) -> &str {
    text.trim_matches(is_cell_space)
}

/// Trimmed cell text, or `None` when absent or blank
fn identity_value(cell: Option<&String>) -> Option<String> {
    cell.map(|text| trim_cell(text))
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Lenient leading-integer parse
///
/// Skips leading whitespace, accepts an optional sign, then reads decimal
/// digits up to the first non-digit. `"12 pts"` is 12, `"3.9"` is 3. No
/// digits or a negative value resolve to 0; a digit run too large for `i64`
/// saturates to `i64::MAX`.
pub fn parse_points(cell: &str) -> i64 {
    let text = cell.trim_start_matches(is_cell_space);
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digit_len = digits
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digit_len == 0 || negative {
        return 0;
    }

    // Only digits remain, so overflow is the one possible failure
    digits[..digit_len].parse::<i64>().unwrap_or(i64::MAX)
}

/// Map one data row using the fixed column contract
///
/// Cells beyond the last mapped column are ignored.
pub fn map_row(row: &[String]) -> CandidateRecord {
    let mut candidate = CandidateRecord::default();

    for column in STUDENT_COLUMNS.iter() {
        let cell = row.get(column.index);
        match column.kind {
            FieldKind::Identity(field) => candidate.set_identity(field, identity_value(cell)),
            FieldKind::Points(field) => {
                candidate
                    .points
                    .set(field, cell.map(|text| parse_points(text)).unwrap_or(0));
            }
        }
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointsField;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_points_plain_and_lenient() {
        assert_eq!(parse_points("42"), 42);
        assert_eq!(parse_points("  7"), 7);
        assert_eq!(parse_points("+8"), 8);
        assert_eq!(parse_points("12 pts"), 12);
        assert_eq!(parse_points("3.9"), 3);
        assert_eq!(parse_points("007"), 7);
        assert_eq!(parse_points("1,234"), 1);
    }

    #[test]
    fn test_parse_points_defaults_to_zero() {
        assert_eq!(parse_points(""), 0);
        assert_eq!(parse_points("   "), 0);
        assert_eq!(parse_points("abc"), 0);
        assert_eq!(parse_points("-"), 0);
        assert_eq!(parse_points("pts 12"), 0);
        assert_eq!(parse_points("0x1A"), 0);
    }

    #[test]
    fn test_parse_points_never_negative() {
        assert_eq!(parse_points("-5"), 0);
        assert_eq!(parse_points("  -12abc"), 0);
        assert_eq!(parse_points("-0"), 0);
    }

    #[test]
    fn test_parse_points_overflow_saturates() {
        assert_eq!(parse_points("99999999999999999999"), i64::MAX);
        assert_eq!(parse_points("99999999999999999999999 pts"), i64::MAX);
        assert_eq!(parse_points("9223372036854775807"), i64::MAX);
        assert_eq!(parse_points("-99999999999999999999"), 0);
    }

    #[test]
    fn test_parse_points_skips_byte_order_mark() {
        assert_eq!(parse_points("\u{feff}12"), 12);
        assert_eq!(parse_points(" \u{feff} 7"), 7);
        assert_eq!(parse_points("\u{a0}5"), 5);
    }

    #[test]
    fn test_byte_order_mark_only_identity_is_none() {
        let candidate = map_row(&row(&["\u{feff}", "H", "C"]));
        assert!(candidate.student_name.is_none());

        let candidate = map_row(&row(&["\u{feff}Alice\u{feff}", " H\u{feff}", "C"]));
        assert_eq!(candidate.student_name.as_deref(), Some("Alice"));
        assert_eq!(candidate.house_name.as_deref(), Some("H"));
    }

    #[test]
    fn test_identity_cells_trimmed() {
        let candidate = map_row(&row(&["  Alice ", "\tFalcon", "North\n"]));
        assert_eq!(candidate.student_name.as_deref(), Some("Alice"));
        assert_eq!(candidate.house_name.as_deref(), Some("Falcon"));
        assert_eq!(candidate.campus_name.as_deref(), Some("North"));
    }

    #[test]
    fn test_blank_or_missing_identity_is_none() {
        let candidate = map_row(&row(&["   ", ""]));
        assert!(candidate.student_name.is_none());
        assert!(candidate.house_name.is_none());
        assert!(candidate.campus_name.is_none());
    }

    #[test]
    fn test_short_row_defaults_points() {
        let candidate = map_row(&row(&["Alice", "Falcon", "North", "5"]));
        assert_eq!(candidate.points.additional_effort, 5);
        for field in PointsField::ALL.iter().skip(1) {
            assert_eq!(candidate.points.get(*field), 0, "{:?}", field);
        }
    }

    #[test]
    fn test_empty_row_maps() {
        let candidate = map_row(&[]);
        assert_eq!(candidate, CandidateRecord::default());
    }

    #[test]
    fn test_every_points_column_lands_in_its_field() {
        // Column i (3..=18) holds the value i
        let mut cells = vec!["Alice".to_string(), "Falcon".to_string(), "North".to_string()];
        cells.extend((3..19).map(|i| i.to_string()));

        let candidate = map_row(&cells);
        for (offset, field) in PointsField::ALL.iter().enumerate() {
            assert_eq!(candidate.points.get(*field), offset as i64 + 3, "{:?}", field);
        }
    }

    #[test]
    fn test_totals_taken_verbatim() {
        let mut cells = row(&["Alice", "Falcon", "North", "5", "3", "0", "0", "999"]);
        cells.resize(19, String::new());

        let candidate = map_row(&cells);
        assert_eq!(candidate.points.total_academic_points, 999);
    }

    #[test]
    fn test_extra_cells_ignored() {
        let mut cells: Vec<String> = vec!["A".into(), "B".into(), "C".into()];
        cells.extend(std::iter::repeat("1".to_string()).take(16));
        cells.push("extra".into());
        cells.push("77".into());

        let candidate = map_row(&cells);
        assert_eq!(candidate.points.total_academic_and_culture, 1);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let cells = row(&["Bo", "Owl", "South", "1", "x", "-2", "4.5"]);
        assert_eq!(map_row(&cells), map_row(&cells));
    }
}
