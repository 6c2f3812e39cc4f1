//! Delimited text (CSV/TSV) parsing.
//!
//! The parser is a single pass over the input: detect the delimiter from the
//! header line, split lines, split fields with a quote toggle, then zip each
//! line against the headers. It never fails; malformed input simply yields a
//! smaller table.

use std::collections::HashSet;

use crate::models::{Delimiter, ParsedTable, Row};

/// Parses raw CSV or TSV text into a [`ParsedTable`].
///
/// - A tab in the header line selects tab-delimited parsing for the whole file
/// - Lines that are blank after trimming are ignored
/// - `"` toggles quoted mode; delimiters inside quotes are kept
/// - Rows shorter than the header are padded with empty strings
/// - Rows where every value is empty are dropped
pub fn parse(raw: &str) -> ParsedTable {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.split('\n').filter(|line| !line.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return ParsedTable::default();
    };

    let delimiter = detect_delimiter(header_line);
    let columns = unique_headers(split_fields(header_line, delimiter));

    let rows = lines
        .map(|line| {
            let mut values = split_fields(line, delimiter).into_iter();
            columns
                .iter()
                .map(|column| (column.clone(), values.next().unwrap_or_default()))
                .collect::<Row>()
        })
        .filter(|row| row.values().any(|value| !value.trim().is_empty()))
        .collect();

    ParsedTable {
        columns,
        rows,
        delimiter,
    }
}

/// Picks tab if the header line contains one, comma otherwise.
pub fn detect_delimiter(header_line: &str) -> Delimiter {
    if header_line.contains('\t') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

/// Splits one physical line into trimmed, unquoted fields.
pub fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    let separator = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == separator && !in_quotes {
            fields.push(clean_field(&current));
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(clean_field(&current));

    fields
}

/// Trims a field and strips one leading and one trailing double quote.
fn clean_field(field: &str) -> String {
    let field = field.trim();
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);
    field.to_string()
}

/// Makes header names unique by suffixing repeats (`Name`, `Name_2`, ...).
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let mut candidate = header.clone();
        let mut suffix = 2;
        while seen.contains(&candidate) {
            candidate = format!("{header}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_quoted_comma() {
        let table = parse("Name,Type,Phone\n\"Acme, Inc\",Food,555-1234\n");

        assert_eq!(table.columns, vec!["Name", "Type", "Phone"]);
        assert_eq!(table.delimiter, Delimiter::Comma);
        assert_eq!(
            table.rows,
            vec![row(&[("Name", "Acme, Inc"), ("Type", "Food"), ("Phone", "555-1234")])]
        );
    }

    #[test]
    fn test_parse_tab_delimited() {
        let table = parse("Name\tCity\nA, B\tAlbany\nC\tTroy\n");

        assert_eq!(table.delimiter, Delimiter::Tab);
        assert_eq!(table.columns, vec!["Name", "City"]);
        assert_eq!(table.rows[0]["Name"], "A, B");
        assert_eq!(table.rows[1]["City"], "Troy");
    }

    #[test]
    fn test_header_without_tab_stays_comma() {
        let table = parse("Name,Notes\nA,has\ttab\n");

        assert_eq!(table.delimiter, Delimiter::Comma);
        assert_eq!(table.rows[0]["Notes"], "has\ttab");
    }

    #[test]
    fn test_blank_and_empty_rows_dropped() {
        let table = parse("A,B\n\n1,2\n  \n,\n\"\",\"\"\n3,\n");

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], row(&[("A", "1"), ("B", "2")]));
        assert_eq!(table.rows[1], row(&[("A", "3"), ("B", "")]));
    }

    #[test]
    fn test_short_rows_padded_long_rows_truncated() {
        let table = parse("A,B,C\n1\n1,2,3,4\n");

        assert_eq!(table.rows[0], row(&[("A", "1"), ("B", ""), ("C", "")]));
        assert_eq!(table.rows[1], row(&[("A", "1"), ("B", "2"), ("C", "3")]));
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse("Name,Phone\r\nAcme,555\r\n\r\n");

        assert_eq!(table.columns, vec!["Name", "Phone"]);
        assert_eq!(table.rows, vec![row(&[("Name", "Acme"), ("Phone", "555")])]);
    }

    #[test]
    fn test_bom_is_ignored() {
        let table = parse("\u{feff}Name\nAcme\n");
        assert_eq!(table.columns, vec!["Name"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n \n").is_empty());

        let header_only = parse("A,B\n");
        assert_eq!(header_only.columns, vec!["A", "B"]);
        assert_eq!(header_only.row_count(), 0);
    }

    #[test]
    fn test_duplicate_headers_made_unique() {
        let table = parse("Name,Name,Name_2\na,b,c\n");

        assert_eq!(table.columns, vec!["Name", "Name_2", "Name_2_2"]);
        assert_eq!(table.rows[0]["Name_2"], "b");
    }

    #[test]
    fn test_split_fields_strips_single_quotes_only() {
        let fields = split_fields(r#"  "a,b" ,""x"",plain"#, Delimiter::Comma);
        assert_eq!(fields, vec!["a,b", "\"x\"", "plain"]);
    }

    #[test]
    fn test_order_preserved() {
        let text = "N\n3\n1\n2\n";
        let values: Vec<_> = parse(text).rows.iter().map(|r| r["N"].clone()).collect();
        assert_eq!(values, vec!["3", "1", "2"]);
    }
}
