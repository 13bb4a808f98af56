//! CSV loading for training data.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row (auto-detected: first row is a header if it contains
//!   any non-numeric, non-empty cell)
//! - Double-quoted fields with embedded commas
//! - The last `target_cols` columns of every row form the expected output

use std::path::Path;

use crate::data::dataset::{Dataset, Example};
use crate::error::{NetError, Result};

/// Parses CSV text into a `Dataset`.
pub fn parse_csv(text: &str, target_cols: usize) -> Result<Dataset> {
    if target_cols == 0 {
        return Err(NetError::InvalidDimension { what: "CSV target columns", value: 0 });
    }

    let mut lines = text.lines().enumerate().peekable();

    if let Some((_, first)) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut examples = Vec::new();
    for (line_idx, line) in lines {
        let row = line_idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        if cells.len() < target_cols + 1 {
            return Err(NetError::Csv {
                row,
                message: format!(
                    "expected at least {} columns, got {}",
                    target_cols + 1,
                    cells.len()
                ),
            });
        }
        let split = cells.len() - target_cols;
        let input = parse_floats(&cells[..split], row)?;
        let expected = parse_floats(&cells[split..], row)?;
        examples.push(Example::new(input, expected));
    }

    if examples.is_empty() {
        return Err(NetError::Csv { row: 0, message: "no data rows".into() });
    }
    Dataset::new(examples)
}

pub fn load_csv<P: AsRef<Path>>(path: P, target_cols: usize) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)?;
    parse_csv(&text, target_cols)
}

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str) -> bool {
    parse_csv_row(line).iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Splits one CSV row, honouring double quotes and `""` escapes.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row: usize) -> Result<Vec<f64>> {
    cells
        .iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| NetError::Csv {
                row,
                message: format!("'{c}' is not a valid number"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_skipped() {
        let ds = parse_csv("x0,x1,y\n0.5,1,2.5\n1,0,3\n", 1).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.examples()[0], Example::new(vec![0.5, 1.0], vec![2.5]));
    }

    #[test]
    fn test_quoted_fields_and_blank_lines() {
        let ds = parse_csv("\"1.5\",2\n\n3,\"4\"\n", 1).unwrap();
        assert_eq!(ds.inputs(), vec![vec![1.5], vec![3.0]]);
    }

    #[test]
    fn test_multiple_target_columns() {
        let ds = parse_csv("1,2,3,4\n", 2).unwrap();
        assert_eq!((ds.input_dim(), ds.output_dim()), (2, 2));
    }

    #[test]
    fn test_bad_number_reports_row() {
        let err = parse_csv("1,2\n3,oops\n", 1).unwrap_err();
        assert!(matches!(err, NetError::Csv { row: 2, .. }), "{err}");
    }

    #[test]
    fn test_too_few_columns() {
        assert!(matches!(parse_csv("1\n", 1), Err(NetError::Csv { row: 1, .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("a,b\n", 1).is_err());
    }

    #[test]
    fn test_escaped_quote_splits_correctly() {
        assert_eq!(parse_csv_row("\"a\"\"b\",c"), vec!["a\"b".to_string(), "c".to_string()]);
    }
}
