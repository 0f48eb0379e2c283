//! Minimal RFC 4180 style reading and writing: comma delimiter, `"` quoting
//! with `""` escapes, quoted fields may span lines.

/// One physical record and the line it starts on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLine {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvLine {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Splits `input` into records, dropping blank lines.
/// On an unterminated quote, returns the line the quote was opened on.
pub fn split_records(input: &str) -> Result<Vec<CsvLine>, (usize, String)> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_start = 1;
    let mut quote_start = 1;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                quote_start = line;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                let record = CsvLine {
                    line: record_start,
                    fields: std::mem::take(&mut fields),
                };
                if !record.is_blank() {
                    records.push(record);
                }
                line += 1;
                record_start = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err((quote_start, "unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        let record = CsvLine {
            line: record_start,
            fields,
        };
        if !record.is_blank() {
            records.push(record);
        }
    }
    Ok(records)
}

/// Escapes one cell for writing. Values are written verbatim apart from
/// quoting, so whatever is saved loads back unchanged.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn join_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|cell| escape_field(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(input: &str) -> Vec<Vec<String>> {
        split_records(input)
            .unwrap()
            .into_iter()
            .map(|record| record.fields)
            .collect()
    }

    #[test]
    fn splits_plain_rows_and_skips_blank_lines() {
        let parsed = split_records("a,b\r\n\n1,2\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].fields, vec!["a", "b"]);
        assert_eq!(parsed[1].line, 3);
        assert_eq!(parsed[1].fields, vec!["1", "2"]);
    }

    #[test]
    fn quoted_fields_keep_commas_quotes_and_newlines() {
        let parsed = fields("name,note\n\"Ventas, Norte\",\"dice \"\"hola\"\"\nadios\"\n");
        assert_eq!(parsed[1], vec!["Ventas, Norte", "dice \"hola\"\nadios"]);
    }

    #[test]
    fn last_row_without_newline_is_kept() {
        assert_eq!(fields("a\n1"), vec![vec!["a"], vec!["1"]]);
    }

    #[test]
    fn unterminated_quote_reports_opening_line() {
        assert_eq!(
            split_records("a\n\"open\n"),
            Err((2, "unterminated quoted field".to_string()))
        );
    }

    #[test]
    fn escape_quotes_only_when_needed() {
        assert_eq!(escape_field("Ventas"), "Ventas");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("-Ventas Norte"), "-Ventas Norte");
        assert_eq!(escape_field("=SUM(A1)"), "=SUM(A1)");
    }
}
