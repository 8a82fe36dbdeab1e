//! Source table reader.
//!
//! The input is a headerless two-column CSV: code first, label second.
//! Labels in real classification tables contain commas ("Wände, tragend"),
//! so double-quoted fields with doubled-quote escapes are supported. No
//! further CSV dialect features are needed for these tables.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::instrument;

use crate::domain::entities::RawRecord;
use crate::infrastructure::error::{InfraError, InfraResult};

/// Read all records from a classification table file.
///
/// Blank lines are skipped. A row with a single field keeps its code and
/// gets an empty label; a row with more than two fields is rejected.
#[instrument(level = "debug")]
pub fn read_records(path: &Path) -> InfraResult<Vec<RawRecord>> {
    let file = File::open(path)
        .map_err(|e| InfraError::io(format!("cannot open table: {}", path.display()), e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|e| InfraError::io(format!("cannot read table: {}", path.display()), e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line);
        match fields.len() {
            1 => records.push(RawRecord::new(fields[0].clone(), "")),
            2 => records.push(RawRecord::new(fields[0].clone(), fields[1].clone())),
            n => {
                return Err(InfraError::MalformedRow {
                    path: path.to_path_buf(),
                    row: i + 1,
                    reason: format!("expected 2 fields, found {}", n),
                })
            }
        }
    }

    Ok(records)
}

/// Split one CSV line into fields, respecting double quotes.
///
/// `"a, b",c` → [`a, b`, `c`]; a doubled quote inside a quoted field is a
/// literal quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_fields() {
        assert_eq!(split_fields("203,Walls"), vec!["203", "Walls"]);
    }

    #[test]
    fn test_split_quoted_field_with_comma() {
        assert_eq!(
            split_fields(r#"203001,"Wände, tragend""#),
            vec!["203001", "Wände, tragend"]
        );
    }

    #[test]
    fn test_split_doubled_quote_escape() {
        assert_eq!(
            split_fields(r#"1,"the ""best"" code""#),
            vec!["1", r#"the "best" code"#]
        );
    }

    #[test]
    fn test_split_single_field() {
        assert_eq!(split_fields("203"), vec!["203"]);
    }
}
