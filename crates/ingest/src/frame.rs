//! Whole-file CSV reading with deterministic per-column type inference.
//!
//! Source exports carry no declared schema, so column types are inferred
//! from content with one explicit rule: a column is integer when it has at
//! least one non-empty value and every non-empty value parses as `i64`
//! (after trimming surrounding whitespace); otherwise it is text. Empty
//! cells are NULL in either case and do not affect inference.

use std::path::Path;

use crate::error::IngestResult;

/// Inferred type of a CSV column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferredType {
    /// Every non-empty value parses as `i64`.
    Integer,
    /// Anything else, including all-empty columns.
    Text,
}

/// One typed cell, borrowed from the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellValue<'a> {
    /// Empty cell.
    Null,
    /// Cell in an integer-inferred column.
    Integer(i64),
    /// Cell in a text column.
    Text(&'a str),
}

/// A parsed CSV file held fully in memory.
///
/// The reader is strict: a row whose field count differs from the header is
/// a fatal parse error. Columns beyond the delivery template are parsed into
/// the frame and ignored by insertion.
#[derive(Debug)]
pub struct CsvFrame {
    headers: Vec<String>,
    types: Vec<InferredType>,
    rows: Vec<Vec<Option<String>>>,
}

impl CsvFrame {
    /// Read and type a CSV file. The first row is the header.
    pub fn read(path: &Path) -> IngestResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|value| (!value.is_empty()).then(|| value.to_string()))
                .collect();
            rows.push(row);
        }

        let types = infer_types(headers.len(), &rows);
        Ok(CsvFrame { headers, types, rows })
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a named column, if the file carries it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Inferred type of a column.
    pub fn column_type(&self, column: usize) -> InferredType {
        self.types[column]
    }

    /// Typed view of one cell.
    pub fn cell(&self, row: usize, column: usize) -> CellValue<'_> {
        match &self.rows[row][column] {
            None => CellValue::Null,
            Some(value) => match self.types[column] {
                InferredType::Integer => match value.trim().parse::<i64>() {
                    Ok(parsed) => CellValue::Integer(parsed),
                    Err(_) => CellValue::Text(value),
                },
                InferredType::Text => CellValue::Text(value),
            },
        }
    }

    /// Raw string view of one cell, `None` for empty cells.
    pub fn raw(&self, row: usize, column: usize) -> Option<&str> {
        self.rows[row][column].as_deref()
    }
}

fn infer_types(columns: usize, rows: &[Vec<Option<String>>]) -> Vec<InferredType> {
    (0..columns)
        .map(|column| {
            let mut saw_value = false;
            for row in rows {
                if let Some(value) = &row[column] {
                    saw_value = true;
                    if value.trim().parse::<i64>().is_err() {
                        return InferredType::Text;
                    }
                }
            }
            if saw_value {
                InferredType::Integer
            } else {
                InferredType::Text
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn frame_from(content: &str) -> CsvFrame {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write fixture");
        CsvFrame::read(file.path()).expect("parse fixture")
    }

    #[test]
    fn integer_column_is_inferred_from_content() {
        let frame = frame_from("over,batter\n1,Root\n12,Kohli\n-3,Smith\n");
        assert_eq!(frame.column_type(0), InferredType::Integer);
        assert_eq!(frame.column_type(1), InferredType::Text);
        assert_eq!(frame.cell(2, 0), CellValue::Integer(-3));
        assert_eq!(frame.cell(1, 1), CellValue::Text("Kohli"));
    }

    #[test]
    fn one_non_numeric_value_makes_the_column_text() {
        let frame = frame_from("runs_total\n4\nsix\n2\n");
        assert_eq!(frame.column_type(0), InferredType::Text);
        assert_eq!(frame.cell(0, 0), CellValue::Text("4"));
    }

    #[test]
    fn empty_cells_are_null_and_do_not_affect_inference() {
        let frame = frame_from("over\n1\n\n3\n");
        assert_eq!(frame.column_type(0), InferredType::Integer);
        assert_eq!(frame.cell(1, 0), CellValue::Null);
        assert_eq!(frame.raw(1, 0), None);
    }

    #[test]
    fn all_empty_column_stays_text() {
        let frame = frame_from("wicket,over\n,1\n,2\n");
        assert_eq!(frame.column_type(0), InferredType::Text);
    }

    #[test]
    fn surrounding_whitespace_still_parses_as_integer() {
        let frame = frame_from("over\n 1\n2 \n");
        assert_eq!(frame.column_type(0), InferredType::Integer);
        assert_eq!(frame.cell(0, 0), CellValue::Integer(1));
    }

    #[test]
    fn row_count_excludes_the_header() {
        let frame = frame_from("a,b\n1,x\n2,y\n");
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.headers(), ["a", "b"]);
        assert_eq!(frame.column_index("b"), Some(1));
        assert_eq!(frame.column_index("missing"), None);
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"a,b\n1\n").expect("write fixture");
        assert!(CsvFrame::read(file.path()).is_err());
    }
}
