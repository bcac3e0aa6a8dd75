// src/storage/csv.rs

//! Minimal CSV reading and writing for the catalog tables.
//!
//! The input and output tables are plain comma-separated files with quoted
//! fields, so a small quote-aware parser and writer cover everything needed.

use std::mem::take;

/// Parse CSV text into rows (quotes + CRLF tolerant). Blank lines are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing unterminated line, but not a phantom empty row.
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Append a single CSV row to the buffer.
pub fn write_row<S: AsRef<str>>(buf: &mut String, row: &[S]) {
    let mut first = true;
    for cell in row {
        if !first {
            buf.push(',');
        } else {
            first = false;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            buf.push('"');
            buf.push_str(&cell.replace('"', "\"\""));
            buf.push('"');
        } else {
            buf.push_str(cell);
        }
    }
    buf.push('\n');
}

/// Render a header plus rows as one CSV document.
pub fn rows_to_string<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> String {
    let mut buf = String::new();
    write_row(&mut buf, header);
    for row in rows {
        write_row(&mut buf, row);
    }
    buf
}

/// Collapse embedded newlines so multi-paragraph fields stay on one CSV line.
pub fn flatten_multiline(value: &str) -> String {
    value.replace('\n', "||")
}
