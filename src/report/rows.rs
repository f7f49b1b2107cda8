//! Delimited Row Codec
//!
//! Component reports are flat comma-delimited text. Fields containing
//! the delimiter, quotes or line breaks are quoted with `"` and inner
//! quotes doubled. The parser is a small state machine tolerant of
//! unquoted fields with stray spaces.
//!
//! @module report/rows

/// Field delimiter in persisted reports
pub const DELIMITER: char = ',';

// =============================================================================
// FORMATTING
// =============================================================================

fn needs_quoting(field: &str) -> bool {
    field.contains(DELIMITER) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Encode one row; no trailing newline
pub fn format_row(fields: &[&str]) -> String {
    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            row.push(DELIMITER);
        }
        if needs_quoting(field) {
            row.push('"');
            for c in field.chars() {
                if c == '"' {
                    row.push('"');
                }
                row.push(c);
            }
            row.push('"');
        } else {
            row.push_str(field);
        }
    }
    row
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode one row into its fields.
///
/// Never fails: an unterminated quote simply runs to the end of the
/// line, which higher layers flag through column-count checks.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.is_empty() {
            in_quotes = true;
        } else if c == DELIMITER {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_row_roundtrip() {
        let fields = ["shelf", "Casework", "C:/lib/shelf.doc"];
        let row = format_row(&fields);
        assert_eq!(row, "shelf,Casework,C:/lib/shelf.doc");
        assert_eq!(parse_row(&row), fields);
    }

    #[test]
    fn test_quoted_field_roundtrip() {
        let fields = ["shelf, wide", "Case\"work\"", "host::shelf"];
        let row = format_row(&fields);
        assert_eq!(parse_row(&row), fields);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(parse_row("a,,c"), vec!["a", "", "c"]);
        assert_eq!(format_row(&["a", "", "c"]), "a,,c");
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(parse_row("\"open,field"), vec!["open,field"]);
    }
}
