//! Quoted comma-delimited line parsing.
//!
//! The format has no escaped-quote convention: every `"` toggles quoting and
//! is dropped, so `""` inside a field is a no-op rather than a literal quote.
//! This is a known limitation of the roster format, not RFC 4180.

use crate::error::ParseWarning;
use crate::models::Record;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Minimum number of fields for a data row: category, name, details.
pub const MIN_FIELDS: usize = 3;

/// Split one line into fields.
///
/// Never fails. The result always has `1 + unquoted delimiters` entries, so an
/// empty line yields a single empty field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Build a record from parsed fields. Fields past the third are ignored.
///
/// `line` is the 1-based source line, reported in the warning.
pub fn parse_record(fields: &[String], line: usize) -> Result<Record, ParseWarning> {
    match fields {
        [category, name, details, ..] => Ok(Record {
            category: category.trim().to_string(),
            name: name.trim().to_string(),
            details: details.trim().replace("\\n", "\n"),
        }),
        _ => Err(ParseWarning {
            line,
            fields: fields.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_line_simple() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_line_quoted_delimiter() {
        assert_eq!(parse_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_parse_line_empty() {
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn test_parse_line_trailing_delimiter() {
        assert_eq!(parse_line("a,b,"), vec!["a", "b", ""]);
        assert_eq!(parse_line(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_parse_line_doubled_quote_is_not_literal() {
        // "" toggles twice and contributes nothing
        assert_eq!(parse_line("a,say \"\"hi\"\",c"), vec!["a", "say hi", "c"]);
    }

    #[test]
    fn test_parse_line_unterminated_quote_swallows_rest() {
        assert_eq!(parse_line("a,\"b,c,d"), vec!["a", "b,c,d"]);
    }

    #[test]
    fn test_parse_line_field_count_matches_unquoted_delimiters() {
        let lines = [
            "x",
            "x,y",
            "\"1,2,3\",4",
            "Player Roster - Quarterbacks,\"Lamar Jackson – QB\",\"Stats:\\n• MVP, twice\"",
            ",\",\",",
        ];
        for line in lines {
            let mut in_quotes = false;
            let mut delimiters = 0;
            for c in line.chars() {
                if c == '"' {
                    in_quotes = !in_quotes;
                } else if c == ',' && !in_quotes {
                    delimiters += 1;
                }
            }
            assert_eq!(parse_line(line).len(), delimiters + 1, "line: {}", line);
        }
    }

    #[test]
    fn test_parse_record_trims_and_decodes() {
        let fields = owned(&["  Player Roster - QB  ", " Lamar – QB ", "x\\ny"]);
        let record = parse_record(&fields, 2).unwrap();
        assert_eq!(record.category, "Player Roster - QB");
        assert_eq!(record.name, "Lamar – QB");
        assert_eq!(record.details, "x\ny");
    }

    #[test]
    fn test_parse_record_ignores_extra_fields() {
        let fields = owned(&["Coaching Staff", "John Harbaugh – Head Coach", "Since 2008", "extra"]);
        let record = parse_record(&fields, 5).unwrap();
        assert_eq!(record.details, "Since 2008");
    }

    #[test]
    fn test_parse_record_allows_empty_fields() {
        let record = parse_record(&owned(&["", "", ""]), 2).unwrap();
        assert_eq!(record, Record::new("", "", ""));
    }

    #[test]
    fn test_parse_record_too_few_fields() {
        let warning = parse_record(&owned(&["Coaching Staff", "John Harbaugh"]), 4).unwrap_err();
        assert_eq!(warning, ParseWarning { line: 4, fields: 2 });
    }
}
