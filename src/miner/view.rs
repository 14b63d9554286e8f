use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{MineError, MineResult};

/// The materialized result of mining one candidate block: a header row
/// plus a rectangular data matrix. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    headers: Vec<String>,
    data: Vec<Vec<String>>,
}

impl TableView {
    /// Construct a view, rejecting any row whose cell count differs from
    /// the header count. Catching the mismatch here keeps rendering and
    /// export free of ragged-row handling.
    pub fn new(headers: Vec<String>, data: Vec<Vec<String>>) -> MineResult<Self> {
        for (i, row) in data.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(MineError::invalid_shape(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    headers.len()
                )));
            }
        }
        Ok(Self { headers, data })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn data(&self) -> &[Vec<String>] {
        &self.data
    }

    /// Number of columns, derived from the headers.
    pub fn ncol(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows, excluding the header.
    pub fn nrow(&self) -> usize {
        self.data.len()
    }

    /// Serialize the header record followed by one record per data row to
    /// `writer`, fields separated by `delimiter`. The encoder handles any
    /// quoting; flushing happens before return on the success path and the
    /// writer is dropped on every path.
    pub fn write_delimited<W: io::Write>(&self, writer: W, delimiter: u8) -> MineResult<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        wtr.write_record(&self.headers)
            .map_err(|e| MineError::export("writing header record", e))?;
        for row in &self.data {
            wtr.write_record(row)
                .map_err(|e| MineError::export("writing data record", e))?;
        }

        wtr.flush()
            .map_err(|e| MineError::export("flushing output", csv::Error::from(e)))?;
        Ok(())
    }

    /// Write the table to a delimited file at `path`.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P, delimiter: u8) -> MineResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| MineError::file_io(path.to_string_lossy().to_string(), e))?;
        self.write_delimited(file, delimiter)
    }
}

/// Fixed-width rendering: every cell center-aligned to its column's widest
/// entry, columns joined with `" | "`, and an underscore rule directly
/// after the header row.
impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.headers.is_empty() {
            return Ok(());
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.data {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let render_row = |row: &[String]| -> String {
            row.iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:^width$}", cell, width = w))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let header_row = render_row(&self.headers);
        let rule = "_".repeat(header_row.chars().count());
        writeln!(f, "{}", header_row)?;
        write!(f, "{}", rule)?;
        for row in &self.data {
            write!(f, "\n{}", render_row(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shape_validation_rejects_ragged_rows() {
        let result = TableView::new(
            strings(&["A", "B"]),
            vec![strings(&["1", "2"]), strings(&["3"])],
        );
        match result {
            Err(MineError::InvalidShape { message }) => {
                assert!(message.contains("row 1"));
                assert!(message.contains("expected 2"));
            }
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_counts_are_derived() {
        let table = TableView::new(
            strings(&["Name", "Age"]),
            vec![strings(&["Alice", "30"]), strings(&["Bob", "25"])],
        )
        .unwrap();
        assert_eq!(table.ncol(), 2);
        assert_eq!(table.nrow(), 2);
    }

    #[test]
    fn test_render_centers_and_rules() {
        let table = TableView::new(
            strings(&["Name", "Age"]),
            vec![strings(&["Alice", "30"]), strings(&["Bob", "25"])],
        )
        .unwrap();
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Name  | Age");
        assert_eq!(lines[1], "___________");
        assert_eq!(lines[2], "Alice | 30 ");
        assert_eq!(lines[3], " Bob  | 25 ");
    }

    #[test]
    fn test_render_header_only() {
        let table = TableView::new(strings(&["A", "B"]), Vec::new()).unwrap();
        assert_eq!(table.to_string(), "A | B\n_____");
    }

    #[test]
    fn test_delimited_export() {
        let table = TableView::new(
            strings(&["Name", "Age"]),
            vec![strings(&["Alice", "30"]), strings(&["Bob", "25"])],
        )
        .unwrap();

        let mut buf = Vec::new();
        table.write_delimited(&mut buf, b';').unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert_eq!(written, "Name;Age\nAlice;30\nBob;25\n");
    }
}
