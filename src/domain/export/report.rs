//! Tabular report structures.
//!
//! The engine does not write spreadsheet files; it produces typed row
//! sets that an external spreadsheet writer renders. Cells are a small
//! closed union so the writer can choose number formats.

use serde::{Deserialize, Serialize};

/// A single report cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Integer(i64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Integer(value as i64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

/// One sheet: a name, column headers, and rows of cells.
///
/// Rows may be shorter than the column list (grouping header rows and
/// separator rows are common); the writer pads with empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ReportSheet {
    /// Creates an empty sheet with the given name and columns.
    pub fn new(name: impl Into<String>, columns: Vec<&str>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(String::from).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Appends a blank separator row.
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Returns true if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A report: zero or more sheets plus an optional user-visible notice.
///
/// Missing data is not a failure; projections return an empty report
/// with a notice and the caller shows it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sheets: Vec<ReportSheet>,
    pub notice: Option<String>,
}

impl Report {
    /// Creates a report from sheets.
    pub fn new(sheets: Vec<ReportSheet>) -> Self {
        Self {
            sheets,
            notice: None,
        }
    }

    /// Creates an empty report carrying a notice for the user.
    pub fn empty_with_notice(notice: impl Into<String>) -> Self {
        Self {
            sheets: Vec::new(),
            notice: Some(notice.into()),
        }
    }

    /// Returns true if no sheet carries any rows.
    pub fn has_data(&self) -> bool {
        self.sheets.iter().any(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_collects_rows_and_blanks() {
        let mut sheet = ReportSheet::new("Summary", vec!["Rank", "Team"]);
        sheet.push_row(vec![1u32.into(), "Ledger Lions".into()]);
        sheet.push_blank();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], CellValue::Integer(1));
        assert!(sheet.rows[1].is_empty());
        assert!(!sheet.is_empty());
    }

    #[test]
    fn empty_report_carries_notice() {
        let report = Report::empty_with_notice("No data available to export.");
        assert!(!report.has_data());
        assert_eq!(report.notice.as_deref(), Some("No data available to export."));
    }

    #[test]
    fn cell_conversions_cover_common_types() {
        assert_eq!(CellValue::from("x"), CellValue::Text("x".to_string()));
        assert_eq!(CellValue::from(87.5), CellValue::Number(87.5));
        assert_eq!(CellValue::from(3usize), CellValue::Integer(3));
    }
}
