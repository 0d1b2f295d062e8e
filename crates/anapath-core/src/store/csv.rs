//! Minimal RFC 4180 reader/writer for the ledger tables.

/// A parsed record and the line it started on (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Malformed CSV input.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvError {
    pub line: usize,
    pub reason: &'static str,
}

/// Escape a string for CSV output.
pub fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Append one record, newline-terminated.
pub fn write_row<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Parse a whole document. Blank lines are skipped; quoted fields may span
/// lines; CRLF and LF endings are both accepted.
pub fn parse(input: &str) -> Result<Vec<CsvRow>, CsvError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Whether the current record has seen any content (including separators)
    let mut dirty = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                dirty = true;
            }
            '"' => {
                return Err(CsvError {
                    line,
                    reason: "quote inside unquoted field",
                })
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                dirty = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if dirty {
                    fields.push(std::mem::take(&mut field));
                    rows.push(CsvRow {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                    dirty = false;
                }
                line += 1;
                record_line = line;
            }
            _ => {
                field.push(c);
                dirty = true;
            }
        }
    }

    if in_quotes {
        return Err(CsvError {
            line: record_line,
            reason: "unterminated quoted field",
        });
    }
    if dirty {
        fields.push(field);
        rows.push(CsvRow {
            line: record_line,
            fields,
        });
    }

    Ok(rows)
}
